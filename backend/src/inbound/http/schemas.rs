//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; the
//! wrappers here mirror their serialised shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body, query or path could not be parsed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// One or more fields failed validation.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// Credentials or token missing, wrong or expired.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The resource belongs to another user.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected server-side failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Validation failures carry `details.fields`, a map of field name to
/// messages.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Request validation failed")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, such as per-field messages.
    #[schema(example = json!({"fields": {"name": ["This field is required."]}}))]
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    #[rstest]
    fn error_schema_uses_camel_case_trace_id() {
        let json = serde_json::to_value(ErrorSchema::schema()).expect("schema serialises");
        let properties = json.get("properties").expect("object schema");

        assert!(properties.get("traceId").is_some());
        assert!(properties.get("trace_id").is_none());
    }

    #[rstest]
    fn error_code_schema_lists_every_code() {
        let json = serde_json::to_string(&ErrorCodeSchema::schema()).expect("schema serialises");
        for code in [
            "invalid_request",
            "validation_failed",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(json.contains(code), "missing {code}");
        }
    }
}
