pub mod claims;
pub mod codec;
pub mod config;
pub mod errors;

pub use claims::ClaimSet;
pub use codec::TokenCodec;
pub use config::TokenConfig;
pub use errors::JwtError;
