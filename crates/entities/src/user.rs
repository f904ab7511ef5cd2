//! User entity definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account belonging to exactly one tenant.
///
/// The password is stored and compared as plaintext. Known weakness; a
/// deployment handling real data should substitute a salted one-way hash
/// without changing the login contract (field names, failure messages).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owning tenant (immutable).
    pub tenant_id: i64,
    /// Display name.
    pub name: String,
    /// Email address. Uniqueness per tenant is NOT enforced.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}
