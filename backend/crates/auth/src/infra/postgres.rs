//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{RoleId, UserId};
use platform::password::HashedPassword;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entity::{NewRole, NewUser, ProfileUpdate, Role, User};
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::value_object::{Email, UserState};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = "id, email, first_name, last_name, password_hash, role_id, state, created_at, updated_at";

/// PostgreSQL-backed user and role repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, first_name, last_name, role_id, state)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(user.last_name.as_deref())
        .bind(user.role_id.value())
        .bind(UserState::Fresh.id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email, exclude: Option<UserId>) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email.as_str())
        .bind(exclude.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = $2, first_name = $3, role_id = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .bind(update.email.as_str())
        .bind(&update.first_name)
        .bind(update.role_id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn update_names(
        &self,
        user_id: UserId,
        first_name: &str,
        last_name: &str,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .bind(first_name)
        .bind(last_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn activate(&self, user_id: UserId, password_hash: &HashedPassword) -> AuthResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, state = $3, updated_at = NOW()
            WHERE id = $1 AND state = $4
            "#,
        )
        .bind(user_id.value())
        .bind(password_hash.as_phc_string())
        .bind(UserState::Verified.id())
        .bind(UserState::Fresh.id())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_state(&self, user_id: UserId, state: UserState) -> AuthResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET state = $2, updated_at = NOW()
            WHERE id = $1 AND state <> $3
            "#,
        )
        .bind(user_id.value())
        .bind(state.id())
        .bind(UserState::Deleted.id())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_with_roles(&self) -> AuthResult<Vec<(User, Role)>> {
        let rows = sqlx::query_as::<_, UserWithRoleRow>(
            r#"
            SELECT
                u.id, u.email, u.first_name, u.last_name, u.password_hash,
                u.role_id, u.state, u.created_at, u.updated_at,
                r.name AS role_name,
                r.permissions AS role_permissions,
                r.created_at AS role_created_at
            FROM users u
            JOIN roles r ON r.id = u.role_id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserWithRoleRow::into_pair).collect()
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAuthRepository {
    async fn create(&self, role: &NewRole) -> AuthResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (name, permissions)
            VALUES ($1, $2)
            RETURNING id, name, permissions, created_at
            "#,
        )
        .bind(&role.name)
        .bind(Json(&role.permissions))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::RoleNameTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(row.into_role())
    }

    async fn find_by_id(&self, role_id: RoleId) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, permissions, created_at FROM roles WHERE id = $1",
        )
        .bind(role_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoleRow::into_role))
    }

    async fn find_by_name(&self, name: &str) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, permissions, created_at FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoleRow::into_role))
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    first_name: String,
    last_name: Option<String>,
    password_hash: Option<String>,
    role_id: i64,
    state: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let state = UserState::from_id(self.state)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user state: {}", self.state)))?;
        let password_hash = self
            .password_hash
            .map(HashedPassword::from_phc_string)
            .transpose()?;

        Ok(User {
            id: UserId::from_raw(self.id),
            email: Email::from_db(self.email),
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash,
            role_id: RoleId::from_raw(self.role_id),
            state,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    permissions: Value,
    created_at: DateTime<Utc>,
}

impl RoleRow {
    fn into_role(self) -> Role {
        Role {
            id: RoleId::from_raw(self.id),
            name: self.name,
            permissions: self.permissions,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserWithRoleRow {
    #[sqlx(flatten)]
    user: UserRow,
    role_name: String,
    role_permissions: Value,
    role_created_at: DateTime<Utc>,
}

impl UserWithRoleRow {
    fn into_pair(self) -> AuthResult<(User, Role)> {
        let role = Role {
            id: RoleId::from_raw(self.user.role_id),
            name: self.role_name,
            permissions: self.role_permissions,
            created_at: self.role_created_at,
        };
        Ok((self.user.into_user()?, role))
    }
}
