use crate::middleware::ApiResponse;
use crate::personal::{self, AboutInfo, ProfileView};

/// GET /api/profile - profile with social icons resolved
pub async fn profile_get() -> ApiResponse<ProfileView> {
    ApiResponse::success(ProfileView::from(personal::personal_info()))
}

/// GET /api/about
pub async fn about_get() -> ApiResponse<AboutInfo> {
    ApiResponse::success(personal::about_info())
}
