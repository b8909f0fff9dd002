use crate::error::ActivityError;
use std::fmt;
use std::str::FromStr;

/// A student email that passed the structural checks applied at signup and
/// unregister.
///
/// The input is trimmed; the remainder must be free of whitespace and control
/// characters, must not carry U+FFFD left behind by lossy percent-decoding,
/// must hold exactly one `@` and have non-empty local and domain parts. Case is preserved, so
/// `Alex@mergington.edu` and `alex@mergington.edu` are different participants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantEmail(String);

impl ParticipantEmail {
    /// Validates `raw`.
    ///
    /// # Errors
    /// Returns [`ActivityError::Validation`] describing the first rule broken.
    pub fn parse(raw: &str) -> Result<Self, ActivityError> {
        let email = raw.trim();

        if email.is_empty() {
            return Err(ActivityError::validation("email must not be empty"));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(ActivityError::validation("email must not contain whitespace"));
        }
        if email.chars().any(|c| c.is_control() || c == char::REPLACEMENT_CHARACTER) {
            return Err(ActivityError::validation(
                "email must be valid UTF-8 text without control characters",
            ));
        }

        let mut parts = email.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ActivityError::validation("email must contain exactly one '@'"));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(ActivityError::validation("email must have a local part and a domain"));
        }

        Ok(Self(email.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for ParticipantEmail {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ParticipantEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_plain_addresses() {
        let email = ParticipantEmail::parse("  michael@mergington.edu ").expect("valid");
        assert_eq!(email.as_str(), "michael@mergington.edu");
    }

    #[test]
    fn keeps_case() {
        let email: ParticipantEmail = "Alex@Mergington.edu".parse().expect("valid");
        assert_eq!(email.to_string(), "Alex@Mergington.edu");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "",
            "   ",
            "no-at-sign",
            "two@@mergington.edu",
            "a@b@c",
            "@mergington.edu",
            "alex@",
            "al ex@mergington.edu",
        ] {
            let err = ParticipantEmail::parse(raw).expect_err(raw);
            assert!(matches!(err, ActivityError::Validation { .. }), "{raw}: {err}");
        }
    }

    #[test]
    fn rejects_undecodable_and_control_characters() {
        let expected = "email must be valid UTF-8 text without control characters";
        for raw in ["\u{FFFD}@mergington.edu", "alex@merg\u{FFFD}ton.edu", "al\u{0}ex@x.edu"] {
            let err = ParticipantEmail::parse(raw).expect_err(raw);
            assert_eq!(err.detail(), expected, "{raw:?}");
        }
    }
}
