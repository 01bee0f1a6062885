//! Secret type tags.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SecretError;

/// Type tag stored alongside each encrypted record.
///
/// The tag is the only thing the server knows about a secret's shape; it
/// must always match the variant the blob was sealed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretKind {
    Password,
    Card,
    Text,
    Binary,
}

impl SecretKind {
    /// Canonical wire form of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Card => "card",
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecretKind {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(Self::Password),
            "card" => Ok(Self::Card),
            "text" => Ok(Self::Text),
            "binary" => Ok(Self::Binary),
            other => Err(SecretError::UnknownKind(other.to_string())),
        }
    }
}
