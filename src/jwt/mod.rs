pub mod builder;
pub mod claims;
pub mod codec;
pub mod header;
pub mod verifier;

pub use builder::TokenBuilder;
pub use claims::{Audience, Payload};
pub use codec::{SignedToken, TokenCodec};
pub use header::Header;
pub use verifier::{TokenVerifier, DEFAULT_CLOCK_SKEW_SECONDS};
