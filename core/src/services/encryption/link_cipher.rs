//! AES-256-GCM cipher for emailed link parameters

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{
    engine::general_purpose::{STANDARD as BASE64, URL_SAFE_NO_PAD},
    Engine,
};
use rand::{rngs::OsRng, RngCore};

use crate::errors::{DomainError, DomainResult};

const NONCE_LEN: usize = 12;

/// Encrypts short strings (emails, codes) for query parameters
///
/// Output is URL-safe base64 (no padding) of `nonce || ciphertext`, with a
/// fresh random nonce per message.
pub struct LinkCipher {
    cipher: Aes256Gcm,
}

impl LinkCipher {
    /// Create from a base64-encoded 32 byte key
    pub fn from_base64_key(encoded: &str) -> DomainResult<Self> {
        let key = BASE64.decode(encoded.trim()).map_err(|e| DomainError::Configuration {
            message: format!("AES_ENCRYPTION_KEY is not valid base64: {}", e),
        })?;
        Self::with_key(&key)
    }

    /// Create from raw key bytes
    pub fn with_key(key: &[u8]) -> DomainResult<Self> {
        if key.len() != 32 {
            return Err(DomainError::Configuration {
                message: format!("AES-256 key must be 32 bytes, got {}", key.len()),
            });
        }

        let key = Key::<Aes256Gcm>::from_slice(key);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Generate a random nonce for AES-GCM
    fn generate_nonce() -> [u8; NONCE_LEN] {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }

    pub fn encrypt(&self, plaintext: &str) -> DomainResult<String> {
        let nonce = Self::generate_nonce();
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|e| DomainError::internal(format!("Encryption failed: {}", e)))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Decrypt a value produced by `encrypt`
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - Tampered, truncated or foreign input
    pub fn decrypt(&self, encoded: &str) -> DomainResult<String> {
        let sealed = URL_SAFE_NO_PAD
            .decode(encoded.trim().trim_end_matches('='))
            .map_err(|_| DomainError::validation("link parameter is not valid"))?;

        if sealed.len() <= NONCE_LEN {
            return Err(DomainError::validation("link parameter is not valid"));
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| DomainError::validation("link parameter is not valid"))?;

        String::from_utf8(plaintext).map_err(|_| DomainError::validation("link parameter is not valid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> LinkCipher {
        LinkCipher::with_key(&[7u8; 32]).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt() {
        let cipher = cipher();
        let sealed = cipher.encrypt("ada@example.com").unwrap();

        assert!(!sealed.contains('+') && !sealed.contains('/') && !sealed.contains('='));
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "ada@example.com");
    }

    #[test]
    fn test_nonce_differs_per_message() {
        let cipher = cipher();
        assert_ne!(cipher.encrypt("123456").unwrap(), cipher.encrypt("123456").unwrap());
    }

    #[test]
    fn test_tampered_or_foreign_input_is_rejected() {
        let cipher = cipher();
        let mut raw = URL_SAFE_NO_PAD.decode(cipher.encrypt("123456").unwrap()).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let sealed = URL_SAFE_NO_PAD.encode(raw);

        assert!(matches!(cipher.decrypt(&sealed), Err(DomainError::Validation { .. })));
        assert!(matches!(cipher.decrypt("short"), Err(DomainError::Validation { .. })));

        let other = LinkCipher::with_key(&[9u8; 32]).unwrap();
        let foreign = other.encrypt("123456").unwrap();
        assert!(cipher.decrypt(&foreign).is_err());
    }

    #[test]
    fn test_key_must_be_32_bytes() {
        assert!(matches!(
            LinkCipher::with_key(&[1u8; 16]),
            Err(DomainError::Configuration { .. })
        ));
        assert!(LinkCipher::from_base64_key("!!not base64!!").is_err());

        let encoded = BASE64.encode([3u8; 32]);
        assert!(LinkCipher::from_base64_key(&encoded).is_ok());
    }
}
