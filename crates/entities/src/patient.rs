//! Patient entity definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A patient record scoped to exactly one tenant.
///
/// All read/write access is filtered by the owning tenant id; that filter is
/// the system's sole isolation guarantee. Date of birth and notes are
/// free-text and optional: the store keeps them as SQL NULL when absent and
/// surfaces them to callers as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owning tenant (immutable).
    pub tenant_id: i64,
    /// Patient name (required).
    pub name: String,
    /// Free-text date of birth, empty when unset.
    pub date_of_birth: String,
    /// Free-text notes, empty when unset.
    pub notes: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}
