//! Tenant entity definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An isolated organizational namespace. All users and patients belong to
/// exactly one tenant.
///
/// Tenants are created once at registration and never mutated or deleted.
/// Name uniqueness is enforced by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique display name.
    pub name: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_serialization() {
        let tenant = Tenant {
            id: 1,
            name: "Acme".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&tenant).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Acme");
    }
}
