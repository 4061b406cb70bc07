use crate::domain::error::PaymentError;
use crate::domain::ports::CardEncryption;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use sha2::{Digest, Sha256};

const NONCE_LEN: usize = 12;

/// AES-256-GCM card encryption. The configured secret is hashed to a fixed
/// 32-byte key; each ciphertext carries its own random nonce, base64-encoded
/// as `nonce || ciphertext`.
pub struct AesCardEncryption {
    cipher: Aes256Gcm,
}

impl AesCardEncryption {
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(&digest);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }
}

impl CardEncryption for AesCardEncryption {
    fn encrypt(&self, plaintext: &str) -> Result<String, PaymentError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| PaymentError::Crypto("card data encryption failed".into()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(out))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, PaymentError> {
        let raw = BASE64
            .decode(ciphertext)
            .map_err(|_| PaymentError::Crypto("malformed card data envelope".into()))?;
        if raw.len() <= NONCE_LEN {
            return Err(PaymentError::Crypto("malformed card data envelope".into()));
        }

        let (nonce, body) = raw.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), body)
            .map_err(|_| PaymentError::Crypto("card data decryption failed".into()))?;

        String::from_utf8(plaintext)
            .map_err(|_| PaymentError::Crypto("card data decryption failed".into()))
    }
}
