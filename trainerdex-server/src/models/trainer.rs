//! Trainer name and email validation
//!
//! Required-field checks run here, before the uniqueness checks and the
//! write. A blank value never reaches the store.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Any whitespace inside an email, including the ideographic space U+3000.
static EMAIL_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\x{3000}]").expect("invalid email space regex"));

/// Validated trainer name (non-blank)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrainerName(String);

impl TrainerName {
    /// Create a trainer name, rejecting blank input.
    ///
    /// # Example
    /// ```
    /// use trainerdex_server::models::TrainerName;
    ///
    /// assert!(TrainerName::new("Zeiyu").is_ok());
    /// assert!(TrainerName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TrainerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated trainer email (non-blank, no embedded spaces)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrainerEmail(String);

impl TrainerEmail {
    /// Create a trainer email.
    ///
    /// # Rules
    /// - Must not be blank
    /// - Must not contain whitespace, including full-width spaces
    ///
    /// # Example
    /// ```
    /// use trainerdex_server::models::TrainerEmail;
    ///
    /// assert!(TrainerEmail::new("Zeiyu498@merry.bluebe").is_ok());
    /// assert!(TrainerEmail::new("zeiyu @merry.bluebe").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if EMAIL_SPACE_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must not contain spaces",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TrainerEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
