//! User repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::user::UserEntity;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, company, \
     job_title, email_verified, newsletter_subscription, marketing_emails, is_active, \
     date_joined, last_login";

/// Repository for platform user accounts.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let entity = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Find user by email (the login key).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.find_entity_by_email(email).await?.map(Into::into))
    }

    /// Find the full user row including the password hash.
    ///
    /// Only the login path needs this; everything else goes through the
    /// credential-free domain model.
    pub async fn find_entity_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        sqlx::query_as::<_, UserEntity>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// Check if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
    }

    /// Record a successful login.
    pub async fn update_last_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Replace a user's password hash.
    pub async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
