//! Record store trait definitions.

use async_trait::async_trait;
use entities::{Patient, Tenant, User};

use crate::RecordStoreResult;

/// Trait for tenant, user and patient storage operations.
///
/// Every method is one atomic unit against the backing store. Implementations
/// must filter all patient access by tenant id; nothing above this trait
/// re-checks ownership.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates a new tenant. Fails with [`DuplicateName`] if the name is
    /// already taken.
    ///
    /// [`DuplicateName`]: crate::RecordStoreError::DuplicateName
    async fn create_tenant(&self, name: &str) -> RecordStoreResult<i64>;

    /// Finds a tenant by exact display name.
    async fn find_tenant_by_name(&self, name: &str) -> RecordStoreResult<Option<Tenant>>;

    /// Creates a new user under the given tenant. Inserts unconditionally;
    /// no uniqueness check on email.
    async fn create_user(
        &self,
        tenant_id: i64,
        name: &str,
        email: &str,
        password: &str,
    ) -> RecordStoreResult<i64>;

    /// Finds a user by exact (tenant, email) match.
    async fn find_user(&self, tenant_id: i64, email: &str) -> RecordStoreResult<Option<User>>;

    /// Creates a tenant together with its first admin user in a single
    /// transaction, returning `(tenant_id, user_id)`. A failed user insert
    /// rolls the tenant back.
    async fn register_tenant(
        &self,
        name: &str,
        admin_name: &str,
        admin_email: &str,
        admin_password: &str,
    ) -> RecordStoreResult<(i64, i64)>;

    /// Creates a patient scoped to the given tenant. The caller validates
    /// that `name` is non-empty; empty `date_of_birth`/`notes` are stored
    /// as NULL.
    async fn create_patient(
        &self,
        tenant_id: i64,
        name: &str,
        date_of_birth: &str,
        notes: &str,
    ) -> RecordStoreResult<i64>;

    /// Lists all patients for the tenant in insertion order, with NULL
    /// date-of-birth and notes surfaced as empty strings.
    async fn list_patients(&self, tenant_id: i64) -> RecordStoreResult<Vec<Patient>>;
}
