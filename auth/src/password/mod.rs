pub mod argon2;
pub mod errors;
pub mod plaintext;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
pub use plaintext::constant_time_eq;
