//! Shared authorization predicates.

use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};

/// Require the caller to hold the Admin role.
pub fn require_admin(role: UserRole) -> AppResult<()> {
    if role.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_passes() {
        assert!(require_admin(UserRole::Admin).is_ok());
        assert!(matches!(
            require_admin(UserRole::BranchManager).unwrap_err(),
            AppError::Forbidden
        ));
        assert!(matches!(
            require_admin(UserRole::User).unwrap_err(),
            AppError::Forbidden
        ));
    }
}
