use serde::{Deserialize, Serialize};

pub mod gate;

/// Step 1: ask the API to text a one-time code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequest {
    pub phone: String,
}

/// Step 2: exchange phone + code for a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub phone: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.phone)
    }
}

/// Phone number normalization: keeps a leading `+` and digits only.
///
/// Returns `None` when fewer than 8 digits remain.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(|c| c.is_ascii_digit()));
    let digits = out.trim_start_matches('+').len();
    if digits < 8 {
        None
    } else {
        Some(out)
    }
}

/// One-time codes are 4 to 6 digits
pub fn is_valid_otp(code: &str) -> bool {
    let code = code.trim();
    (4..=6).contains(&code.len()) && code.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(
            normalize_phone(" +966 50-123 4567 "),
            Some("+966501234567".to_string())
        );
        assert_eq!(normalize_phone("0501234567"), Some("0501234567".to_string()));
        assert_eq!(normalize_phone("12-34"), None);
    }

    #[test]
    fn test_otp_format() {
        assert!(is_valid_otp("1234"));
        assert!(is_valid_otp(" 123456 "));
        assert!(!is_valid_otp("123"));
        assert!(!is_valid_otp("12a4"));
    }

    #[test]
    fn test_display_name_falls_back_to_phone() {
        let user = UserInfo {
            id: 1,
            name: Some(" ".to_string()),
            phone: "+966501234567".to_string(),
            is_admin: true,
        };
        assert_eq!(user.display_name(), "+966501234567");
    }
}
