//! Role vocabulary
//!
//! Role names as they appear in session claims and the `roles` table,
//! and the allowed-sets each protected route group is gated on.
//! Matching against these is exact and case-sensitive.

pub const ADMIN: &str = "ADMIN";
pub const MANAGER: &str = "MANAGER";
pub const EMPLOYEE: &str = "EMPLOYEE";

/// Role creation, deactivation, audit log access
pub const ADMINS: &[&str] = &[ADMIN];

/// Catalog management and user listing
pub const MANAGERS: &[&str] = &[ADMIN, MANAGER];

/// Any authenticated staff member
pub const STAFF: &[&str] = &[ADMIN, MANAGER, EMPLOYEE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets_are_nested() {
        for role in ADMINS {
            assert!(MANAGERS.contains(role));
        }
        for role in MANAGERS {
            assert!(STAFF.contains(role));
        }
        assert!(!MANAGERS.contains(&EMPLOYEE));
    }
}
