//! Well-known role name constants.
//!
//! These must match the CHECK constraint in `20260301000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Check whether a role name is one of the accepted values.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
