//! Input rules shared by registration and the profile endpoints.

use crate::error::ApiError;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 20;

/// Largest accepted profile image, measured on the encoded data URI.
pub const PROFILE_IMAGE_MAX: usize = 3 * 1024 * 1024;

/// Trim a username and check its length in UTF-16 code units, the unit
/// browsers count in.
pub fn username(raw: &str) -> Result<String, ApiError> {
    let name = raw.trim();
    let len = name.encode_utf16().count();
    if len < USERNAME_MIN {
        return Err(ApiError::validation("Username must be at least 3 characters long"));
    }
    if len > USERNAME_MAX {
        return Err(ApiError::validation("Username must be less than 20 characters"));
    }
    Ok(name.to_string())
}

pub fn email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `None` clears the image. A value must be a `data:image/` URI of bounded size.
pub fn profile_image(image: Option<&str>) -> Result<(), ApiError> {
    let Some(image) = image else {
        return Ok(());
    };
    if !image.starts_with("data:image/") {
        return Err(ApiError::validation("Invalid image format"));
    }
    if image.len() > PROFILE_IMAGE_MAX {
        return Err(ApiError::validation("Image too large"));
    }
    Ok(())
}

/// A required text field: present and not blank.
pub fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_bounds() {
        assert!(username("").is_err());
        assert!(username("ab").is_err());
        assert!(username("   ab   ").is_err());
        assert_eq!(username(" abc ").unwrap(), "abc");
        assert!(username(&"a".repeat(20)).is_ok());
        assert!(username(&"a".repeat(21)).is_err());
    }

    #[test]
    fn test_username_counts_utf16_units() {
        assert!(username("ééé").is_ok());
        // Each of these takes two UTF-16 units.
        assert!(username("😀a").is_ok());
        assert!(username(&"😀".repeat(10)).is_ok());
        assert!(username(&format!("{}a", "😀".repeat(10))).is_err());
    }

    #[test]
    fn test_email_normalized() {
        assert_eq!(email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn test_profile_image() {
        assert!(profile_image(None).is_ok());
        assert!(profile_image(Some("data:image/png;base64,AAAA")).is_ok());
        assert!(profile_image(Some("https://example.com/a.png")).is_err());
        let huge = format!("data:image/png;base64,{}", "A".repeat(PROFILE_IMAGE_MAX));
        assert!(profile_image(Some(&huge)).is_err());
    }

    #[test]
    fn test_required() {
        assert_eq!(required(Some("x".into())), Some("x".into()));
        assert_eq!(required(Some("  ".into())), None);
        assert_eq!(required(None), None);
    }
}
