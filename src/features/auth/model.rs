use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of admin-panel roles.
///
/// Kept flat on purpose: each route names the roles it accepts instead of
/// deriving permissions from a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

/// Account usability, carried as a token claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Suspended,
    Pending,
    Banned,
}

/// Identity attached to the request after the auth middleware has run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub role: UserRole,
    pub status: AccountStatus,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Content mutations (create/update/reorder/upload) are open to
    /// admins and managers; employees are read-only.
    pub fn can_manage_content(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Manager)
    }
}

/// Claims carried by the `accessToken` cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub exp: u64,
    pub iat: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(UserRole::Admin).unwrap(),
            serde_json::json!("ADMIN")
        );
        assert_eq!(
            serde_json::to_value(UserRole::Employee).unwrap(),
            serde_json::json!("EMPLOYEE")
        );
        assert_eq!(
            serde_json::to_value(AccountStatus::Suspended).unwrap(),
            serde_json::json!("SUSPENDED")
        );
    }

    #[test]
    fn content_management_is_admin_or_manager() {
        let user = |role| AuthenticatedUser {
            sub: "user-1".to_string(),
            role,
            status: AccountStatus::Active,
        };

        assert!(user(UserRole::Admin).can_manage_content());
        assert!(user(UserRole::Manager).can_manage_content());
        assert!(!user(UserRole::Employee).can_manage_content());

        assert!(user(UserRole::Admin).is_admin());
        assert!(!user(UserRole::Manager).is_admin());
    }
}
