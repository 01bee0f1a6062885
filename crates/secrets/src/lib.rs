//! Typed secret variants and their envelope codec.
//!
//! The four secret shapes form a closed sum type. [`Secret::seal`] turns a
//! variant into the authenticated ciphertext the server stores;
//! [`Secret::open`] reverses it given the record's type tag. Structured
//! variants (password, card) serialize to field-tagged JSON before
//! encryption; text and binary encrypt their raw bytes directly.
//!
//! Plaintext exists only transiently on the client: before `seal` and after
//! `open`. Nothing in this crate persists it.

pub mod codec;
pub mod error;
pub mod kind;

pub use {
    codec::{CardSecret, PasswordSecret, Secret},
    error::SecretError,
    kind::SecretKind,
};
