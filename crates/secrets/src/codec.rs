//! The closed secret sum type and its seal/open dispatch.

use serde::{Deserialize, Serialize};

use lockbox_crypto as crypto;

use crate::{error::SecretError, kind::SecretKind};

/// A login/password credential pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSecret {
    pub login: String,
    pub password: String,
}

/// A payment card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSecret {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub holder: String,
}

/// One plaintext secret. Exactly four shapes exist; adding a new one means
/// extending this enum and the dispatch in [`Secret::open`], nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Secret {
    Password(PasswordSecret),
    Card(CardSecret),
    Text(String),
    Binary(Vec<u8>),
}

impl Secret {
    /// The type tag this variant seals under.
    pub fn kind(&self) -> SecretKind {
        match self {
            Self::Password(_) => SecretKind::Password,
            Self::Card(_) => SecretKind::Card,
            Self::Text(_) => SecretKind::Text,
            Self::Binary(_) => SecretKind::Binary,
        }
    }

    /// Serialize this variant to its canonical bytes and encrypt them.
    pub fn seal(&self, key: &[u8]) -> Result<Vec<u8>, SecretError> {
        let plaintext = match self {
            Self::Password(p) => serde_json::to_vec(p).map_err(|_| SecretError::MalformedPayload)?,
            Self::Card(c) => serde_json::to_vec(c).map_err(|_| SecretError::MalformedPayload)?,
            Self::Text(t) => t.clone().into_bytes(),
            Self::Binary(b) => b.clone(),
        };
        Ok(crypto::encrypt(key, &plaintext)?)
    }

    /// Decrypt `blob` and decode it as the variant `kind` names.
    ///
    /// The tag selects the decoder before any bytes are touched; decode
    /// failures after a successful decrypt mean the tag and the blob
    /// disagree.
    pub fn open(kind: SecretKind, key: &[u8], blob: &[u8]) -> Result<Self, SecretError> {
        let plaintext = crypto::decrypt(key, blob)?;
        match kind {
            SecretKind::Password => serde_json::from_slice(&plaintext)
                .map(Self::Password)
                .map_err(|_| SecretError::MalformedPayload),
            SecretKind::Card => serde_json::from_slice(&plaintext)
                .map(Self::Card)
                .map_err(|_| SecretError::MalformedPayload),
            SecretKind::Text => String::from_utf8(plaintext)
                .map(Self::Text)
                .map_err(|_| SecretError::MalformedPayload),
            SecretKind::Binary => Ok(Self::Binary(plaintext)),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [0x42; 32];

    fn password_secret() -> Secret {
        Secret::Password(PasswordSecret {
            login: "user@example.com".into(),
            password: "hunter2".into(),
        })
    }

    #[test]
    fn password_round_trip() {
        let secret = password_secret();
        let blob = secret.seal(&KEY).unwrap();
        let opened = Secret::open(SecretKind::Password, &KEY, &blob).unwrap();
        assert_eq!(opened, secret);
    }

    #[test]
    fn card_round_trip() {
        let secret = Secret::Card(CardSecret {
            number: "4111 1111 1111 1111".into(),
            expiry: "12/27".into(),
            cvv: "123".into(),
            holder: "J DOE".into(),
        });
        let blob = secret.seal(&KEY).unwrap();
        let opened = Secret::open(SecretKind::Card, &KEY, &blob).unwrap();
        assert_eq!(opened, secret);
    }

    #[test]
    fn text_round_trip() {
        let secret = Secret::Text("recovery phrase: correct horse".into());
        let blob = secret.seal(&KEY).unwrap();
        let opened = Secret::open(SecretKind::Text, &KEY, &blob).unwrap();
        assert_eq!(opened, secret);
    }

    #[test]
    fn binary_round_trip() {
        let secret = Secret::Binary(vec![0, 159, 146, 150, 255]);
        let blob = secret.seal(&KEY).unwrap();
        let opened = Secret::open(SecretKind::Binary, &KEY, &blob).unwrap();
        assert_eq!(opened, secret);
    }

    #[test]
    fn empty_binary_round_trip() {
        let secret = Secret::Binary(Vec::new());
        let blob = secret.seal(&KEY).unwrap();
        let opened = Secret::open(SecretKind::Binary, &KEY, &blob).unwrap();
        assert_eq!(opened, secret);
    }

    #[test]
    fn wrong_key_propagates_crypto_error() {
        let blob = password_secret().seal(&KEY).unwrap();
        let result = Secret::open(SecretKind::Password, &[0x43; 32], &blob);
        assert!(matches!(result, Err(SecretError::Crypto(_))));
    }

    #[test]
    fn mismatched_tag_is_malformed() {
        // Raw text bytes are not the JSON shape the password tag promises.
        let blob = Secret::Text("just some text".into()).seal(&KEY).unwrap();
        let result = Secret::open(SecretKind::Password, &KEY, &blob);
        assert!(matches!(result, Err(SecretError::MalformedPayload)));
    }

    #[test]
    fn non_utf8_bytes_fail_as_text() {
        let blob = Secret::Binary(vec![0xFF, 0xFE, 0xFD]).seal(&KEY).unwrap();
        let result = Secret::open(SecretKind::Text, &KEY, &blob);
        assert!(matches!(result, Err(SecretError::MalformedPayload)));
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(password_secret().kind(), SecretKind::Password);
        assert_eq!(Secret::Text(String::new()).kind(), SecretKind::Text);
        assert_eq!(Secret::Binary(Vec::new()).kind(), SecretKind::Binary);
    }
}
