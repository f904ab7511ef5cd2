//! SQLite record store implementation.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use entities::{Patient, Tenant, User};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, Pool, Sqlite};

use crate::{RecordStore, RecordStoreError, RecordStoreResult};

/// Schema statements, applied idempotently on startup.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS tenants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tenant_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (tenant_id) REFERENCES tenants(id)
    )",
    "CREATE TABLE IF NOT EXISTS patients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tenant_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        date_of_birth TEXT,
        notes TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (tenant_id) REFERENCES tenants(id)
    )",
];

/// Database row for Tenant.
#[derive(Debug, FromRow)]
struct TenantRow {
    id: i64,
    name: String,
    created_at: NaiveDateTime,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            created_at: row.created_at.and_utc(),
        }
    }
}

/// Database row for User.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    tenant_id: i64,
    name: String,
    email: String,
    password: String,
    created_at: NaiveDateTime,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            email: row.email,
            password: row.password,
            created_at: row.created_at.and_utc(),
        }
    }
}

/// Database row for Patient. NULL date-of-birth and notes become empty
/// strings on the way out.
#[derive(Debug, FromRow)]
struct PatientRow {
    id: i64,
    tenant_id: i64,
    name: String,
    date_of_birth: Option<String>,
    notes: Option<String>,
    created_at: NaiveDateTime,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            date_of_birth: row.date_of_birth.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
            created_at: row.created_at.and_utc(),
        }
    }
}

/// Maps a UNIQUE constraint violation on the tenant name to `DuplicateName`.
fn map_insert_error(err: sqlx::Error, name: &str) -> RecordStoreError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            RecordStoreError::DuplicateName(name.to_string())
        }
        other => RecordStoreError::Database(other),
    }
}

/// SQLite-backed record store.
///
/// Each operation checks a connection out of the pool for its duration; no
/// connection or transaction is held across requests.
pub struct SqliteRecordStore {
    pool: Pool<Sqlite>,
}

impl SqliteRecordStore {
    /// Connects to the database and creates the schema if absent.
    pub async fn connect(database_url: &str) -> RecordStoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    /// Applies the schema statements. Safe to call on an existing database.
    async fn init_schema(&self) -> RecordStoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn create_tenant(&self, name: &str) -> RecordStoreResult<i64> {
        let result = sqlx::query("INSERT INTO tenants (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, name))?;

        Ok(result.last_insert_rowid())
    }

    async fn find_tenant_by_name(&self, name: &str) -> RecordStoreResult<Option<Tenant>> {
        let row: Option<TenantRow> =
            sqlx::query_as("SELECT id, name, created_at FROM tenants WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Tenant::from))
    }

    async fn create_user(
        &self,
        tenant_id: i64,
        name: &str,
        email: &str,
        password: &str,
    ) -> RecordStoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO users (tenant_id, name, email, password) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(tenant_id)
        .bind(name)
        .bind(email)
        .bind(password)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn find_user(&self, tenant_id: i64, email: &str) -> RecordStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, tenant_id, name, email, password, created_at
             FROM users WHERE tenant_id = ?1 AND email = ?2",
        )
        .bind(tenant_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn register_tenant(
        &self,
        name: &str,
        admin_name: &str,
        admin_email: &str,
        admin_password: &str,
    ) -> RecordStoreResult<(i64, i64)> {
        let mut tx = self.pool.begin().await?;

        let tenant_id = sqlx::query("INSERT INTO tenants (name) VALUES (?1)")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, name))?
            .last_insert_rowid();

        let user_id = sqlx::query(
            "INSERT INTO users (tenant_id, name, email, password) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(tenant_id)
        .bind(admin_name)
        .bind(admin_email)
        .bind(admin_password)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;

        Ok((tenant_id, user_id))
    }

    async fn create_patient(
        &self,
        tenant_id: i64,
        name: &str,
        date_of_birth: &str,
        notes: &str,
    ) -> RecordStoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO patients (tenant_id, name, date_of_birth, notes)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(tenant_id)
        .bind(name)
        .bind((!date_of_birth.is_empty()).then_some(date_of_birth))
        .bind((!notes.is_empty()).then_some(notes))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list_patients(&self, tenant_id: i64) -> RecordStoreResult<Vec<Patient>> {
        let rows: Vec<PatientRow> = sqlx::query_as(
            "SELECT id, tenant_id, name, date_of_birth, notes, created_at
             FROM patients WHERE tenant_id = ?1 ORDER BY id",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Patient::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (tempfile::TempDir, SqliteRecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("test.db").display());
        let store = SqliteRecordStore::connect(&url).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_duplicate_tenant_name_rejected() {
        let (_dir, store) = temp_store().await;

        store.create_tenant("Acme").await.unwrap();
        let err = store.create_tenant("Acme").await.unwrap_err();

        assert!(matches!(err, RecordStoreError::DuplicateName(name) if name == "Acme"));
    }

    #[tokio::test]
    async fn test_register_tenant_creates_both_rows() {
        let (_dir, store) = temp_store().await;

        let (tenant_id, user_id) = store
            .register_tenant("Acme", "Al", "al@acme.test", "pw")
            .await
            .unwrap();

        let tenant = store.find_tenant_by_name("Acme").await.unwrap().unwrap();
        assert_eq!(tenant.id, tenant_id);

        let user = store.find_user(tenant_id, "al@acme.test").await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.name, "Al");
        assert_eq!(user.password, "pw");
    }

    #[tokio::test]
    async fn test_register_tenant_duplicate_rolls_back() {
        let (_dir, store) = temp_store().await;

        store
            .register_tenant("Acme", "Al", "al@acme.test", "pw")
            .await
            .unwrap();
        let err = store
            .register_tenant("Acme", "Bo", "bo@acme.test", "pw2")
            .await
            .unwrap_err();

        assert!(matches!(err, RecordStoreError::DuplicateName(_)));

        // The second admin must not exist under the original tenant either.
        let tenant = store.find_tenant_by_name("Acme").await.unwrap().unwrap();
        assert!(store.find_user(tenant.id, "bo@acme.test").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_dob_and_notes_round_trip_as_empty_strings() {
        let (_dir, store) = temp_store().await;

        let tenant_id = store.create_tenant("Acme").await.unwrap();
        store
            .create_patient(tenant_id, "Jane Doe", "1990-01-01", "")
            .await
            .unwrap();

        let patients = store.list_patients(tenant_id).await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "Jane Doe");
        assert_eq!(patients[0].date_of_birth, "1990-01-01");
        assert_eq!(patients[0].notes, "");
    }

    #[tokio::test]
    async fn test_patients_are_tenant_scoped() {
        let (_dir, store) = temp_store().await;

        let acme = store.create_tenant("Acme").await.unwrap();
        let globex = store.create_tenant("Globex").await.unwrap();

        store.create_patient(acme, "Jane", "", "").await.unwrap();
        store.create_patient(globex, "John", "", "").await.unwrap();

        let acme_patients = store.list_patients(acme).await.unwrap();
        assert_eq!(acme_patients.len(), 1);
        assert_eq!(acme_patients[0].name, "Jane");

        let globex_patients = store.list_patients(globex).await.unwrap();
        assert_eq!(globex_patients.len(), 1);
        assert_eq!(globex_patients[0].name, "John");
    }

    #[tokio::test]
    async fn test_duplicate_user_email_is_permitted() {
        let (_dir, store) = temp_store().await;

        let tenant_id = store.create_tenant("Acme").await.unwrap();
        let first = store
            .create_user(tenant_id, "Al", "al@acme.test", "pw")
            .await
            .unwrap();
        let second = store
            .create_user(tenant_id, "Al Again", "al@acme.test", "pw2")
            .await
            .unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("test.db").display());

        let store = SqliteRecordStore::connect(&url).await.unwrap();
        let tenant_id = store.create_tenant("Acme").await.unwrap();
        drop(store);

        // Reconnecting re-runs the schema against existing tables.
        let store = SqliteRecordStore::connect(&url).await.unwrap();
        let tenant = store.find_tenant_by_name("Acme").await.unwrap().unwrap();
        assert_eq!(tenant.id, tenant_id);
    }
}
