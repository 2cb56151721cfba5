use contracts::shared::api::ApiError;
use contracts::system::auth::{LoginResponse, OtpRequest, OtpVerifyRequest, UserInfo};

use crate::shared::http;

/// Ask the API to text a one-time code to `phone`
pub async fn request_otp(phone: String) -> Result<(), ApiError> {
    http::post_public::<_, serde_json::Value>("/auth/otp/request", &OtpRequest { phone })
        .await
        .map(|_| ())
}

/// Exchange phone + code for a bearer token
pub async fn verify_otp(phone: String, otp: String) -> Result<LoginResponse, ApiError> {
    http::post_public("/auth/otp/verify", &OtpVerifyRequest { phone, otp })
        .await?
        .ok_or_else(|| ApiError::Decode("login response has no token".to_string()))
}

/// Get current user info
pub async fn me() -> Result<UserInfo, ApiError> {
    http::get("/auth/me").await
}

/// Revoke the token server-side
pub async fn logout() -> Result<(), ApiError> {
    http::post_unit::<()>("/auth/logout", None).await
}
