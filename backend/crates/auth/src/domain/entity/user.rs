//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::{RoleId, UserId};
use platform::password::HashedPassword;

use crate::domain::value_object::{Email, UserState};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: Option<String>,
    /// Absent until the user completes the password-set flow
    pub password_hash: Option<HashedPassword>,
    pub role_id: RoleId,
    pub state: UserState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown in audit details and mail greetings
    pub fn display_name(&self) -> String {
        audit::display_name(&self.first_name, self.last_name.as_deref())
    }
}

/// Data for an administrator-created account. The row starts `Fresh`
/// with no password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role_id: RoleId,
}

/// Administrator edit of another user's profile
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub email: Email,
    pub first_name: String,
    pub role_id: RoleId,
}
