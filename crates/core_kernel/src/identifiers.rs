//! Prefixed identifiers for gateway entities
//!
//! Orders and payments are keyed by opaque strings of the form
//! `<tag>_<16 alphanumerics>` (e.g. `order_F3kT9mQxW2aLpZs1`). The random
//! body is drawn from the full alphanumeric alphabet, so a collision needs
//! two draws out of 62^16 to coincide; uniqueness is still enforced by the
//! storage layer, never assumed from the generator.
//!
//! Merchants use plain UUIDs since they are seeded rather than minted per
//! request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Alphabet for identifier bodies: digits plus both letter cases.
const ID_ALPHABET: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Length of the random body following the entity tag.
const ID_BODY_LEN: usize = 16;

/// Error returned when parsing a prefixed identifier from a string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("identifier must start with '{expected}_', got '{actual}'")]
    WrongPrefix { expected: &'static str, actual: String },

    #[error("identifier body must be {expected} alphanumeric characters")]
    MalformedBody { expected: usize },
}

macro_rules! define_entity_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a new identifier with a random alphanumeric body
            pub fn generate() -> Self {
                Self(format!(
                    "{}_{}",
                    $prefix,
                    nanoid::nanoid!(ID_BODY_LEN, &ID_ALPHABET)
                ))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the entity tag this identifier type carries
            pub fn prefix() -> &'static str {
                $prefix
            }

            /// Wraps an already-validated string without re-checking it.
            ///
            /// Intended for values read back from storage, where the
            /// constraint was enforced at insert time.
            pub fn from_trusted(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let body = s.strip_prefix(concat!($prefix, "_")).ok_or_else(|| {
                    IdParseError::WrongPrefix {
                        expected: $prefix,
                        actual: s.to_string(),
                    }
                })?;
                if body.len() != ID_BODY_LEN || !body.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(IdParseError::MalformedBody {
                        expected: ID_BODY_LEN,
                    });
                }
                Ok(Self(s.to_string()))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_entity_id!(OrderId, "order");
define_entity_id!(PaymentId, "pay");

/// Merchant identifier backed by a UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantId(Uuid);

impl MerchantId {
    /// Creates a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MerchantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MerchantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl From<Uuid> for MerchantId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<MerchantId> for Uuid {
    fn from(id: MerchantId) -> Uuid {
        id.0
    }
}
