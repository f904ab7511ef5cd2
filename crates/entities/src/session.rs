//! Session snapshot definition.

use serde::{Deserialize, Serialize};

/// The identity snapshot held for one session token.
///
/// Captured at login or registration time and never refreshed, even if the
/// underlying user or tenant record changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Authenticated user id.
    pub user_id: i64,
    /// User display name at login time.
    pub user_name: String,
    /// Tenant the user belongs to.
    pub tenant_id: i64,
    /// Tenant display name at login time.
    pub tenant_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_user_is_a_snapshot() {
        let a = SessionUser {
            user_id: 7,
            user_name: "Al".to_string(),
            tenant_id: 3,
            tenant_name: "Acme".to_string(),
        };
        let b = a.clone();

        assert_eq!(a, b);
    }
}
