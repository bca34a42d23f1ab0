//! User State Value Object
//!
//! Lifecycle of an account:
//!
//! ```text
//! Fresh ──set password──▶ Verified
//!   │                        │
//!   └──────deactivate────────┴──▶ Disabled
//!
//! any ──delete──▶ Deleted (terminal)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum UserState {
    /// Created by an administrator, no password yet
    #[default]
    Fresh = 0,

    /// Password set, may sign in
    Verified = 1,

    /// Deactivated by an administrator
    Disabled = 2,

    /// Soft-deleted, never leaves this state
    Deleted = 3,
}

impl UserState {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Fresh => "FRESH",
            Self::Verified => "VERIFIED",
            Self::Disabled => "DISABLED",
            Self::Deleted => "DELETED",
        }
    }

    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Verified)
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Fresh),
            1 => Some(Self::Verified),
            2 => Some(Self::Disabled),
            3 => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for state in [
            UserState::Fresh,
            UserState::Verified,
            UserState::Disabled,
            UserState::Deleted,
        ] {
            assert_eq!(UserState::from_id(state.id()), Some(state));
        }
        assert_eq!(UserState::from_id(9), None);
    }

    #[test]
    fn test_only_verified_can_login() {
        assert!(UserState::Verified.can_login());
        assert!(!UserState::Fresh.can_login());
        assert!(!UserState::Disabled.can_login());
        assert!(!UserState::Deleted.can_login());
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&UserState::Disabled).unwrap();
        assert_eq!(json, "\"DISABLED\"");
    }
}
