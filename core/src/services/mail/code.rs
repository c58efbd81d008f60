//! Random numeric codes

use rand::Rng;

use crate::domain::entities::mail::CODE_LENGTH;

/// Generate a code of `CODE_LENGTH` random decimal digits
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
