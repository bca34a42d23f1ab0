//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{
    ChangeInfoInput, CreateRoleInput, CreateUserInput, SignInInput, SignInOutput,
    UpdateUserInput,
};
use crate::domain::entity::{Role, User};
use crate::domain::value_object::UserState;

// ============================================================================
// Roles
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    #[serde(default)]
    pub name: String,
    pub permissions: Option<Value>,
}

impl From<CreateRoleRequest> for CreateRoleInput {
    fn from(req: CreateRoleRequest) -> Self {
        Self {
            name: req.name,
            permissions: req.permissions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub permissions: Value,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id.value(),
            name: role.name,
            permissions: role.permissions,
        }
    }
}

// ============================================================================
// Admin user management
// ============================================================================

/// Body for both user creation and administrator update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role_id: i64,
}

impl From<UserProfileRequest> for CreateUserInput {
    fn from(req: UserProfileRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role_id: req.role_id,
        }
    }
}

impl From<UserProfileRequest> for UpdateUserInput {
    fn from(req: UserProfileRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role_id: req.role_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub state: UserState,
    pub created_at: DateTime<Utc>,
    pub role: RoleResponse,
}

impl From<(User, Role)> for UserResponse {
    fn from((user, role): (User, Role)) -> Self {
        Self {
            id: user.id.value(),
            email: user.email.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            state: user.state,
            created_at: user.created_at,
            role: role.into(),
        }
    }
}

// ============================================================================
// Password set / sign in / self-service
// ============================================================================

/// Code normally arrives in the `?code=` query; the body field is a fallback
#[derive(Debug, Clone, Deserialize)]
pub struct CodeQuery {
    pub code: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordRequest {
    pub code: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "confirm_password")]
    pub confirm_password: String,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl From<SignInRequest> for SignInInput {
    fn from(req: SignInRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            remember_me: req.remember_me,
        }
    }
}

/// Token fields keep the snake_case names existing clients read
#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<SignInOutput> for SignInResponse {
    fn from(output: SignInOutput) -> Self {
        Self {
            id: output.id.value(),
            email: output.email,
            role: output.role,
            access_token: output.tokens.access_token,
            refresh_token: output.tokens.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfoRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<ChangeInfoRequest> for ChangeInfoInput {
    fn from(req: ChangeInfoRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_password_accepts_both_spellings() {
        let snake: SetPasswordRequest =
            serde_json::from_str(r#"{"password":"a","confirm_password":"b"}"#).unwrap();
        let camel: SetPasswordRequest =
            serde_json::from_str(r#"{"password":"a","confirmPassword":"b"}"#).unwrap();

        assert_eq!(snake.confirm_password, "b");
        assert_eq!(camel.confirm_password, "b");
        assert!(snake.code.is_none());
    }

    #[test]
    fn test_profile_request_reads_role_id() {
        let req: UserProfileRequest =
            serde_json::from_str(r#"{"name":"Alice","email":"a@x.io","roleId":3}"#).unwrap();
        assert_eq!(req.role_id, 3);
    }
}
