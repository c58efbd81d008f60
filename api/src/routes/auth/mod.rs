//! Authentication route handlers
//!
//! Login, refresh and signup all answer with the stored user record, which
//! carries the freshly issued token pair. The password hash is never
//! serialized.

pub mod login;
pub mod refresh;
pub mod reset_password;
pub mod signup;

pub use login::login;
pub use refresh::refresh_token;
pub use reset_password::reset_user_password;
pub use signup::signup;
