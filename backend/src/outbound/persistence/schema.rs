//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is stored lower-cased and unique.
    users (id) {
        id -> Int8,
        email -> Varchar,
        display_name -> Varchar,
        password_hash -> Text,
        date_joined -> Timestamptz,
    }
}

diesel::table! {
    /// Task lists; rows cascade away with their owner.
    lists (id) {
        id -> Int8,
        user_id -> Int8,
        name -> Varchar,
        description -> Nullable<Text>,
        priority -> Varchar,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks; rows cascade away with their list.
    tasks (id) {
        id -> Int8,
        list_id -> Int8,
        name -> Varchar,
        description -> Nullable<Text>,
        priority -> Varchar,
        status -> Varchar,
        is_complete -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(lists -> users (user_id));
diesel::joinable!(tasks -> lists (list_id));

diesel::allow_tables_to_appear_in_same_query!(users, lists, tasks);
