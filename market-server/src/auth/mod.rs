//! Authentication and authorization
//!
//! JWT bearer auth plus the explicit actor capability checked by the
//! workflow engine and ledger guard:
//! - [`JwtService`] - token issue/validate
//! - [`CurrentUser`] - authenticated actor (id + role), axum extractor
//!
//! Admin gating is never delegated to the storage layer: operations take
//! the actor and call [`CurrentUser::require_admin`] themselves.

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use shared::models::Role;

use crate::utils::AppError;

/// Authenticated actor attached to the request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Admin capability check, surfaced before any ledger read.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role required".to_string()))
        }
    }

    #[cfg(test)]
    pub fn test_admin() -> Self {
        Self {
            user_id: 1,
            name: "Test Admin".to_string(),
            role: Role::Admin,
        }
    }

    #[cfg(test)]
    pub fn test_user(user_id: i64) -> Self {
        Self {
            user_id,
            name: format!("Test User {user_id}"),
            role: Role::User,
        }
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| JwtError::InvalidToken("Malformed subject".to_string()))?;
        Ok(Self {
            user_id,
            name: claims.name,
            role: claims.role,
        })
    }
}
