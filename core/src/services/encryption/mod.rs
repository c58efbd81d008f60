//! Encryption of values embedded in emailed links

mod link_cipher;

pub use link_cipher::LinkCipher;
