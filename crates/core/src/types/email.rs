//! Validated email address type.
//!
//! Confirmation emails are queued with the recipient address frozen into the
//! outbox row, so an address is validated once, when it enters the domain,
//! and treated as well-formed everywhere after that.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string failed to parse as an [`Email`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum EmailError {
    /// Empty input.
    #[error("address is empty")]
    Empty,
    /// Input over the RFC 5321 length limit.
    #[error("address exceeds {max} characters")]
    TooLong {
        /// The cap that was exceeded.
        max: usize,
    },
    /// No @ separator anywhere in the input.
    #[error("address has no @ separator")]
    MissingAtSymbol,
    /// Nothing before the @.
    #[error("address has nothing before the @")]
    EmptyLocalPart,
    /// Nothing after the @.
    #[error("address has nothing after the @")]
    EmptyDomain,
}

/// An email address that passed structural validation.
///
/// Validation is deliberately shallow: a non-empty local part and domain
/// around an @ separator, inside the RFC 5321 length cap. Anything stricter
/// is the SMTP conversation's problem, not this type's.
///
/// ```
/// use smartcart_core::Email;
///
/// let to = Email::parse("ada@example.com").unwrap();
/// assert_eq!(to.as_str(), "ada@example.com");
///
/// assert!(Email::parse("not-an-address").is_err());
/// assert!(Email::parse("@example.com").is_err());
/// assert!(Email::parse("ada@").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum address length per RFC 5321.
    pub const MAX_LENGTH: usize = 254;

    /// Validate and wrap an address.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found: empty input, over-long
    /// input, a missing @, or an empty part on either side of it.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        if input.is_empty() {
            return Err(EmailError::Empty);
        }
        if input.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = input.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(input.to_owned()))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
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

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Email {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Email {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        // Rows were validated on the way in; decoding does not re-parse.
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Email {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_addresses() {
        for ok in [
            "ada@example.com",
            "ada.lovelace@example.com",
            "ada+orders@example.com",
            "ada@mail.example.co.uk",
            "a@b",
        ] {
            assert!(Email::parse(ok).is_ok(), "rejected {ok}");
        }
    }

    #[test]
    fn test_rejects_structurally_broken_addresses() {
        assert!(matches!(Email::parse(""), Err(EmailError::Empty)));
        assert!(matches!(
            Email::parse("no-separator"),
            Err(EmailError::MissingAtSymbol)
        ));
        assert!(matches!(
            Email::parse("@example.com"),
            Err(EmailError::EmptyLocalPart)
        ));
        assert!(matches!(Email::parse("ada@"), Err(EmailError::EmptyDomain)));
    }

    #[test]
    fn test_rejects_over_long_addresses() {
        let long = format!("{}@example.com", "a".repeat(Email::MAX_LENGTH));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_splits_on_first_at_symbol() {
        // A second @ lands in the domain and is tolerated here; the SMTP
        // layer is the authority on deliverability.
        assert!(Email::parse("a@b@c").is_ok());
    }

    #[test]
    fn test_serde_is_transparent() {
        let email = Email::parse("ada@example.com").unwrap();
        assert_eq!(
            serde_json::to_string(&email).unwrap(),
            "\"ada@example.com\""
        );

        let back: Email = serde_json::from_str("\"ada@example.com\"").unwrap();
        assert_eq!(back, email);
    }

    #[test]
    fn test_display_and_from_str_round_trip() {
        let email: Email = "ada@example.com".parse().unwrap();
        assert_eq!(email.to_string(), "ada@example.com");
        assert_eq!(email.as_str(), "ada@example.com");
    }
}
