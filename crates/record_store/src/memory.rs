//! In-memory record store implementation for testing.

use async_trait::async_trait;
use chrono::Utc;
use entities::{Patient, Tenant, User};
use tokio::sync::RwLock;

use crate::{RecordStore, RecordStoreError, RecordStoreResult};

/// Backing collections. Kept behind one lock so that `register_tenant`
/// stays atomic, like the SQLite transaction it mirrors.
#[derive(Debug, Default)]
struct Tables {
    tenants: Vec<Tenant>,
    users: Vec<User>,
    patients: Vec<Patient>,
}

impl Tables {
    fn insert_tenant(&mut self, name: &str) -> RecordStoreResult<i64> {
        if self.tenants.iter().any(|t| t.name == name) {
            return Err(RecordStoreError::DuplicateName(name.to_string()));
        }
        let id = self.tenants.len() as i64 + 1;
        self.tenants.push(Tenant {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn insert_user(&mut self, tenant_id: i64, name: &str, email: &str, password: &str) -> i64 {
        let id = self.users.len() as i64 + 1;
        self.users.push(User {
            id,
            tenant_id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            created_at: Utc::now(),
        });
        id
    }
}

/// In-memory record store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: RwLock<Tables>,
}

impl MemoryRecordStore {
    /// Creates a new in-memory record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of tenants, for test assertions.
    pub async fn tenant_count(&self) -> usize {
        self.tables.read().await.tenants.len()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create_tenant(&self, name: &str) -> RecordStoreResult<i64> {
        let mut tables = self.tables.write().await;
        tables.insert_tenant(name)
    }

    async fn find_tenant_by_name(&self, name: &str) -> RecordStoreResult<Option<Tenant>> {
        let tables = self.tables.read().await;
        Ok(tables.tenants.iter().find(|t| t.name == name).cloned())
    }

    async fn create_user(
        &self,
        tenant_id: i64,
        name: &str,
        email: &str,
        password: &str,
    ) -> RecordStoreResult<i64> {
        let mut tables = self.tables.write().await;
        Ok(tables.insert_user(tenant_id, name, email, password))
    }

    async fn find_user(&self, tenant_id: i64, email: &str) -> RecordStoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.tenant_id == tenant_id && u.email == email)
            .cloned())
    }

    async fn register_tenant(
        &self,
        name: &str,
        admin_name: &str,
        admin_email: &str,
        admin_password: &str,
    ) -> RecordStoreResult<(i64, i64)> {
        let mut tables = self.tables.write().await;
        let tenant_id = tables.insert_tenant(name)?;
        let user_id = tables.insert_user(tenant_id, admin_name, admin_email, admin_password);
        Ok((tenant_id, user_id))
    }

    async fn create_patient(
        &self,
        tenant_id: i64,
        name: &str,
        date_of_birth: &str,
        notes: &str,
    ) -> RecordStoreResult<i64> {
        let mut tables = self.tables.write().await;
        let id = tables.patients.len() as i64 + 1;
        tables.patients.push(Patient {
            id,
            tenant_id,
            name: name.to_string(),
            date_of_birth: date_of_birth.to_string(),
            notes: notes.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_patients(&self, tenant_id: i64) -> RecordStoreResult<Vec<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables
            .patients
            .iter()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_tenant_name_rejected() {
        let store = MemoryRecordStore::new();

        store.create_tenant("Acme").await.unwrap();
        let err = store.create_tenant("Acme").await.unwrap_err();

        assert!(matches!(err, RecordStoreError::DuplicateName(_)));
        assert_eq!(store.tenant_count().await, 1);
    }

    #[tokio::test]
    async fn test_register_tenant_rejects_duplicates_atomically() {
        let store = MemoryRecordStore::new();

        store
            .register_tenant("Acme", "Al", "al@acme.test", "pw")
            .await
            .unwrap();
        let err = store
            .register_tenant("Acme", "Bo", "bo@acme.test", "pw")
            .await
            .unwrap_err();

        assert!(matches!(err, RecordStoreError::DuplicateName(_)));
        assert_eq!(store.tenant_count().await, 1);
    }

    #[tokio::test]
    async fn test_list_patients_filters_by_tenant() {
        let store = MemoryRecordStore::new();

        let acme = store.create_tenant("Acme").await.unwrap();
        let globex = store.create_tenant("Globex").await.unwrap();
        store.create_patient(acme, "Jane", "1990-01-01", "").await.unwrap();
        store.create_patient(globex, "John", "", "flu").await.unwrap();

        let patients = store.list_patients(acme).await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "Jane");
    }

    #[tokio::test]
    async fn test_find_user_requires_tenant_and_email_match() {
        let store = MemoryRecordStore::new();

        let acme = store.create_tenant("Acme").await.unwrap();
        let globex = store.create_tenant("Globex").await.unwrap();
        store.create_user(acme, "Al", "al@acme.test", "pw").await.unwrap();

        assert!(store.find_user(acme, "al@acme.test").await.unwrap().is_some());
        assert!(store.find_user(globex, "al@acme.test").await.unwrap().is_none());
        assert!(store.find_user(acme, "other@acme.test").await.unwrap().is_none());
    }
}
