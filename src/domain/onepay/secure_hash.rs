//! HMAC-SHA256 secure hash shared by checkout signing and return verification.

use std::fmt;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::ValidationError;

/// Merchant secure secret, decoded from its hex representation.
///
/// OnePay keys the HMAC with the raw bytes, not the hex text.
pub struct SecureSecret(Secret<Vec<u8>>);

impl SecureSecret {
    /// Decodes a hex encoded secret.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidSecureSecret` for empty or non-hex input.
    pub fn from_hex(hex_secret: &str) -> Result<Self, ValidationError> {
        if hex_secret.is_empty() {
            return Err(ValidationError::MissingRequired("ONEPAY_SECURE_SECRET"));
        }
        let bytes = hex::decode(hex_secret).map_err(|_| ValidationError::InvalidSecureSecret)?;
        Ok(Self(Secret::new(bytes)))
    }

    /// Computes the secure hash of a canonical string.
    pub fn sign(&self, canonical: &str) -> SecureHash {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.0.expose_secret())
            .expect("HMAC accepts any key");
        mac.update(canonical.as_bytes());
        SecureHash(hex::encode_upper(mac.finalize().into_bytes()))
    }
}

impl fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureSecret([REDACTED])")
    }
}

/// Uppercase hex HMAC-SHA256 digest (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecureHash(String);

impl SecureHash {
    pub const LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Compares against a hash received from the gateway.
    ///
    /// Case-insensitive, constant time over equal-length inputs.
    pub fn matches(&self, received: &str) -> bool {
        let received = received.trim().to_ascii_uppercase();
        constant_time_compare(self.0.as_bytes(), received.as_bytes())
    }
}

impl fmt::Display for SecureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SecureHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
