//! Remote product reference type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`RemoteProductId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum RemoteProductIdError {
    /// The input string is empty.
    #[error("remote product id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("remote product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("remote product id cannot contain whitespace")]
    Whitespace,
}

/// A reference to a product in the remote Shopify catalog.
///
/// Shopify identifies products with opaque gid strings
/// (e.g., `gid://shopify/Product/123`). This type does not interpret the
/// id beyond structural sanity checks; equality is exact string equality.
///
/// ## Constraints
///
/// - Length: 1-255 characters
/// - No whitespace
///
/// ## Examples
///
/// ```
/// use storekeeper_core::RemoteProductId;
///
/// assert!(RemoteProductId::parse("gid://shopify/Product/123").is_ok());
/// assert!(RemoteProductId::parse("").is_err());
/// assert!(RemoteProductId::parse("has space").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RemoteProductId(String);

impl RemoteProductId {
    /// Maximum length of a remote product id.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `RemoteProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 255 characters,
    /// or contains whitespace.
    pub fn parse(s: &str) -> Result<Self, RemoteProductIdError> {
        if s.is_empty() {
            return Err(RemoteProductIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(RemoteProductIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(RemoteProductIdError::Whitespace);
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for RemoteProductId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for RemoteProductId {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for RemoteProductId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
