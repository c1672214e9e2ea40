use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::domain::{ContactSubmission, ValidInput};

/// Required submission fields, in reporting precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submission was rejected. The display text is returned to callers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("Invalid email address")]
    InvalidEmailFormat,
}

// local@label(.label)*.tld, no whitespace anywhere, tld >= 2 chars
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*\.[^\s@.]{2,}$").expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check presence of all three fields, then the email shape.
///
/// Blank (whitespace-only) values count as missing. When several fields are
/// missing the first of `name`, `email`, `message` is reported.
pub fn validate(
    name: Option<&str>,
    email: Option<&str>,
    message: Option<&str>,
) -> Result<ValidInput, ValidationError> {
    fn present(v: Option<&str>) -> Option<&str> {
        v.filter(|s| !s.trim().is_empty())
    }
    let (name, email, message) = (present(name), present(email), present(message));

    let name = name.ok_or(ValidationError::MissingField(Field::Name))?;
    let email = email.ok_or(ValidationError::MissingField(Field::Email))?;
    let message = message.ok_or(ValidationError::MissingField(Field::Message))?;

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    Ok(ValidInput {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<ValidInput, ValidationError> {
        validate(self.name.as_deref(), self.email.as_deref(), self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVALID_EMAILS: [&str; 6] = [
        "invalid-email",
        "test@",
        "@example.com",
        "test.example.com",
        "test@.com",
        "test@example",
    ];

    #[test]
    fn accepts_well_formed_submission() {
        let v = validate(Some("John Smith"), Some("john.smith@example.com"), Some("Hello!")).unwrap();
        assert_eq!(v.name, "John Smith");
        assert_eq!(v.email, "john.smith@example.com");
        assert_eq!(v.message, "Hello!");
    }

    #[test]
    fn reports_each_missing_field() {
        assert_eq!(
            validate(Some("John"), Some("john@example.com"), None),
            Err(ValidationError::MissingField(Field::Message))
        );
        assert_eq!(
            validate(Some("John"), None, Some("Hello there")),
            Err(ValidationError::MissingField(Field::Email))
        );
        assert_eq!(
            validate(None, Some("john@example.com"), Some("Hello")),
            Err(ValidationError::MissingField(Field::Name))
        );
    }

    #[test]
    fn empty_submission_reports_name_first() {
        let err = ContactSubmission::default().validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Name));
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert_eq!(
            validate(Some("   "), Some("a@b.co"), Some("hi")),
            Err(ValidationError::MissingField(Field::Name))
        );
        assert_eq!(
            validate(Some("A"), Some(""), Some("hi")),
            Err(ValidationError::MissingField(Field::Email))
        );
        assert_eq!(
            validate(Some("A"), Some("a@b.co"), Some("\n\t")),
            Err(ValidationError::MissingField(Field::Message))
        );
    }

    #[test]
    fn presence_is_checked_before_email_shape() {
        // bad email and missing message: the missing field wins
        assert_eq!(
            validate(Some("A"), Some("not-an-email"), None),
            Err(ValidationError::MissingField(Field::Message))
        );
    }

    #[test]
    fn rejects_malformed_emails_with_email_in_message() {
        for email in INVALID_EMAILS {
            let err = validate(Some("John Smith"), Some(email), Some("Test message")).unwrap_err();
            assert_eq!(err, ValidationError::InvalidEmailFormat, "email {email:?}");
            assert!(err.to_string().to_lowercase().contains("email"));
        }
    }

    #[test]
    fn email_shape_edge_cases() {
        for ok in ["a@b.co", "first.last@sub.example.org", "x+tag@example.io"] {
            assert!(is_valid_email(ok), "{ok} should pass");
        }
        for bad in [
            " john@example.com",
            "john@example.com ",
            "jo hn@example.com",
            "a@@example.com",
            "a@b@example.com",
            "a@example.c",
            "a@example.",
            "a@example..com",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should fail");
        }
    }

    #[test]
    fn missing_email_message_names_the_field() {
        let err = validate(Some("A"), None, Some("hi")).unwrap_err();
        assert_eq!(err.to_string(), "email is required");
    }
}
