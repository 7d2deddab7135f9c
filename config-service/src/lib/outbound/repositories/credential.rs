use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::credential::errors::StoreError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::Username;
use crate::credential::ports::IdentityStore;

pub struct PostgresIdentityStore {
    pool: PgPool,
}

impl PostgresIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_credential(row: PgRow) -> Result<Credential, StoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    let username = Username::new(username)
        .map_err(|e| StoreError::Unavailable(format!("Invalid stored credential: {}", e)))?;

    Ok(Credential {
        id: CredentialId(id),
        username,
        password_hash,
        created_at,
    })
}

#[async_trait]
impl IdentityStore for PostgresIdentityStore {
    async fn save(&self, credential: Credential) -> Result<Credential, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.username.as_str())
        .bind(&credential.password_hash)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StoreError::UniqueViolation(credential.username.as_str().to_string());
                }
            }
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(credential)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at
            FROM credentials
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        row.map(row_to_credential).transpose()
    }

    async fn find_by_id(&self, id: &CredentialId) -> Result<Option<Credential>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at
            FROM credentials
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        row.map(row_to_credential).transpose()
    }
}
