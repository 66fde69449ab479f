//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input does not match an accepted phone format.
    #[error("phone must be +<10-15 digits> or ddd-ddd-dddd")]
    InvalidFormat,
}

/// A customer phone number.
///
/// Phone numbers are optional on a customer; when present they must match
/// one of two shapes:
///
/// - International: `+` followed by 10 to 15 digits (`+15551234567`)
/// - Dashed: three groups of 3-3-4 digits (`555-123-4567`)
///
/// ## Examples
///
/// ```
/// use brightdesk_core::Phone;
///
/// assert!(Phone::parse("+15551234567").is_ok());
/// assert!(Phone::parse("555-123-4567").is_ok());
///
/// assert!(Phone::parse("12345").is_err());
/// assert!(Phone::parse("555-1234-567").is_err());
/// assert!(Phone::parse("+1555").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::InvalidFormat`] unless the input is `+` plus
    /// 10-15 digits, or exactly `ddd-ddd-dddd`.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if is_international(s) || is_dashed(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneError::InvalidFormat)
        }
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// `+` followed by 10 to 15 ASCII digits, nothing else.
fn is_international(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('+') else {
        return false;
    };
    (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly `ddd-ddd-dddd`.
fn is_dashed(s: &str) -> bool {
    let mut parts = s.split('-');
    let (Some(a), Some(b), Some(c), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    a.len() == 3
        && b.len() == 3
        && c.len() == 4
        && [a, b, c]
            .iter()
            .all(|part| part.bytes().all(|byte| byte.is_ascii_digit()))
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_international() {
        assert!(Phone::parse("+1234567890").is_ok()); // 10 digits
        assert!(Phone::parse("+15551234567").is_ok());
        assert!(Phone::parse("+123456789012345").is_ok()); // 15 digits
    }

    #[test]
    fn test_parse_dashed() {
        assert!(Phone::parse("555-123-4567").is_ok());
        assert!(Phone::parse("000-000-0000").is_ok());
    }

    #[test]
    fn test_rejects_wrong_lengths() {
        assert!(Phone::parse("+123456789").is_err()); // 9 digits
        assert!(Phone::parse("+1234567890123456").is_err()); // 16 digits
        assert!(Phone::parse("12345").is_err());
        assert!(Phone::parse("").is_err());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(Phone::parse("5551234567").is_err()); // digits without +
        assert!(Phone::parse("555-1234-567").is_err());
        assert!(Phone::parse("55-123-45678").is_err());
        assert!(Phone::parse("555-123-456a").is_err());
        assert!(Phone::parse("+1555123456a").is_err());
        assert!(Phone::parse("555-123-4567-").is_err());
        assert!(Phone::parse("+ 1234567890").is_err());
    }

    #[test]
    fn test_display_and_as_str() {
        let phone = Phone::parse("+15551234567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
        assert_eq!(format!("{phone}"), "+15551234567");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("555-123-4567").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"555-123-4567\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
