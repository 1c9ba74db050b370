//! Signing keys and `did:wk` signer identifiers used by zerocap tokens.
//!
//! Supported key types:
//! - `ed25519` (`EdDSA`)
//! - `NIST P-256` (`ES256`)

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod did;
mod ed25519;
mod error;
mod jws;
mod key;
mod p256;
mod traits;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use did::*;
pub use ed25519::*;
pub use error::*;
pub use jws::*;
pub use key::*;
pub use p256::*;
pub use traits::*;
