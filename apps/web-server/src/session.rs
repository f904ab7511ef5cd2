//! In-memory session registry.

use std::collections::HashMap;
use std::sync::RwLock;

use entities::SessionUser;
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

/// Process-lifetime registry mapping opaque session tokens to identity
/// snapshots.
///
/// Internally synchronized; handlers share one registry through the
/// application state and call it through `&self`. Sessions have no expiry:
/// they live until explicit logout or process exit, and all of them
/// invalidate on restart.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionUser>>,
}

impl SessionRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snapshot under a fresh random token and returns the token.
    ///
    /// The caller propagates the token to the client as the `session_id`
    /// cookie with path `/`.
    pub fn create(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().unwrap();
        tracing::debug!(user_id = user.user_id, tenant_id = user.tenant_id, "Session created");
        sessions.insert(token.clone(), user);
        token
    }

    /// Returns the snapshot stored under `token`, if any. Unknown or
    /// malformed tokens simply yield `None`.
    pub fn lookup(&self, token: &str) -> Option<SessionUser> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(token).cloned()
    }

    /// Removes a single token regardless of content.
    pub fn destroy(&self, token: &str) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(token);
    }

    /// Removes every token bound to `user_id`. In normal operation a user
    /// holds at most one session, but concurrent logins are all cleared.
    pub fn destroy_by_user(&self, user_id: i64) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.retain(|_, session| session.user_id != user_id);
    }

    /// Returns the number of live sessions.
    pub fn count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_user(user_id: i64) -> SessionUser {
        SessionUser {
            user_id,
            user_name: "Al".to_string(),
            tenant_id: 1,
            tenant_name: "Acme".to_string(),
        }
    }

    #[test]
    fn test_create_and_lookup() {
        let registry = SessionRegistry::new();
        let token = registry.create(session_user(7));

        let found = registry.lookup(&token).unwrap();
        assert_eq!(found.user_id, 7);
        assert_eq!(found.tenant_name, "Acme");
    }

    #[test]
    fn test_lookup_unknown_token() {
        let registry = SessionRegistry::new();

        assert!(registry.lookup("nope").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_tokens_are_unique() {
        let registry = SessionRegistry::new();
        let a = registry.create(session_user(1));
        let b = registry.create(session_user(1));

        assert_ne!(a, b);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_destroy_single_token() {
        let registry = SessionRegistry::new();
        let token = registry.create(session_user(1));

        registry.destroy(&token);
        assert!(registry.lookup(&token).is_none());
    }

    #[test]
    fn test_destroy_by_user_clears_all_sessions() {
        let registry = SessionRegistry::new();
        let first = registry.create(session_user(1));
        let second = registry.create(session_user(1));
        let other = registry.create(session_user(2));

        registry.destroy_by_user(1);

        assert!(registry.lookup(&first).is_none());
        assert!(registry.lookup(&second).is_none());
        assert!(registry.lookup(&other).is_some());
    }
}
