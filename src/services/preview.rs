use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::resolver::{self, ResolvedVideoRef};

use super::{ServiceError, ServiceResult};

/// Resolve a raw URL for the preview page and the in-form preview action.
///
/// Resolution failures are user-correctable, so they surface as form errors
/// rather than internal ones.
pub fn preview_video(url: &str, user: &AuthenticatedUser) -> ServiceResult<ResolvedVideoRef> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    resolver::resolve(url).map_err(|e| ServiceError::Form(e.to_string()))
}
