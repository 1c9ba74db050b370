//! Compact, JWT-shaped signed tokens.
//!
//! A token is `header.payload.signature`, each part base64url-encoded without padding. The header
//! carries the signing algorithm (`EdDSA` or `ES256`), the payload is arbitrary JSON and the issuer
//! claim (`iss`) is a `did:wk` that the signature is checked against.

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod error;
mod header;
mod signature;
mod signer;
mod token;
mod verifier;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use error::*;
pub use header::*;
pub use signature::*;
pub use signer::*;
pub use token::*;
pub use verifier::*;
