//! Ownership guard applied to every list and task lookup.

use std::fmt;

use tracing::warn;

use crate::domain::{Error, TaskList, UserId};

/// How the guard answers when a resource exists but belongs to someone else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipPolicy {
    /// Report missing resources as not found and foreign ones as forbidden.
    #[default]
    RevealForbidden,
    /// Report foreign resources as not found, hiding their existence.
    ConcealAsNotFound,
}

impl OwnershipPolicy {
    /// Policy selected by the `conceal foreign resources` setting.
    pub fn from_conceal_flag(conceal: bool) -> Self {
        if conceal {
            Self::ConcealAsNotFound
        } else {
            Self::RevealForbidden
        }
    }
}

impl fmt::Display for OwnershipPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RevealForbidden => f.write_str("reveal-forbidden"),
            Self::ConcealAsNotFound => f.write_str("conceal-as-not-found"),
        }
    }
}

/// Checks existence first, then ownership, under an [`OwnershipPolicy`].
///
/// # Examples
/// ```
/// use backend::domain::{ErrorCode, OwnershipGuard, OwnershipPolicy, UserId};
///
/// let guard = OwnershipGuard::new(OwnershipPolicy::RevealForbidden);
/// let err = guard.owned_list(None, UserId::new(1)).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipGuard {
    policy: OwnershipPolicy,
}

impl OwnershipGuard {
    pub fn new(policy: OwnershipPolicy) -> Self {
        Self { policy }
    }

    /// Admit `list` only if it exists and `caller` owns it.
    pub fn owned_list(&self, list: Option<TaskList>, caller: UserId) -> Result<TaskList, Error> {
        let Some(list) = list else {
            return Err(Error::not_found("list not found"));
        };
        if list.owner() == caller {
            return Ok(list);
        }

        warn!(
            list_id = %list.id(),
            caller = %caller,
            policy = %self.policy,
            "denied access to a list owned by another user"
        );
        match self.policy {
            OwnershipPolicy::RevealForbidden => {
                Err(Error::forbidden("list belongs to another user"))
            }
            OwnershipPolicy::ConcealAsNotFound => Err(Error::not_found("list not found")),
        }
    }
}
