//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The local part contains a character outside `A-Z a-z 0-9 . _ % + -`.
    #[error("email local part cannot contain {0:?}")]
    InvalidLocalPart(char),
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The domain contains a character outside `A-Z a-z 0-9 . -`.
    #[error("email domain cannot contain {0:?}")]
    InvalidDomain(char),
    /// The domain has no `.tld` suffix of two or more letters.
    #[error("email domain must end with a top-level domain of at least two letters")]
    InvalidTopLevelDomain,
}

/// An email address.
///
/// Validation is deliberately conservative: the whole input must match
/// `local@domain.tld`.
///
/// ## Constraints
///
/// - No length limit beyond the grammar itself
/// - Local part: one or more of `A-Z a-z 0-9 . _ % + -`
/// - Domain: one or more of `A-Z a-z 0-9 . -`, followed by `.` and a
///   top-level domain of two or more ASCII letters
/// - No whitespace anywhere, exactly one @ symbol
///
/// ## Examples
///
/// ```
/// use little_lemon_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("tilly@littlelemon.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// // Invalid emails
/// assert!(Email::parse("").is_err());              // empty
/// assert!(Email::parse("not-an-email").is_err());  // missing @
/// assert!(Email::parse("a@b.c").is_err());         // one-letter TLD
/// assert!(Email::parse("a b@c.com").is_err());     // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Does not contain an @ symbol
    /// - Has an empty or malformed local part or domain
    /// - Does not end with a top-level domain of two or more letters
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if let Some(c) = local.chars().find(|c| !is_local_char(*c)) {
            return Err(EmailError::InvalidLocalPart(c));
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }
        // A second @ lands here as an invalid domain character.
        if let Some(c) = domain.chars().find(|c| !is_domain_char(*c)) {
            return Err(EmailError::InvalidDomain(c));
        }

        // The TLD is letters only, so it must follow the last dot.
        let (host, tld) = domain
            .rsplit_once('.')
            .ok_or(EmailError::InvalidTopLevelDomain)?;
        if host.is_empty() {
            return Err(EmailError::EmptyDomain);
        }
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(EmailError::InvalidTopLevelDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

const fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

const fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
