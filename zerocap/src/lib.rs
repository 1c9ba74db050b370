//! Capability-based authorization.
//!
//! A capability is a signed grant of a [`Permission`] from an issuer to an audience on behalf of a
//! subject. Capabilities can be re-delegated to form a [`DelegationChain`] that leads back to a
//! root capability the subject issued to itself. This crate issues capabilities, checks that a
//! chain is well-formed and signed, and decides whether a presented request covers a permission.
//!
//! Signing and signature checks are done by [`zerocap_jwt`], and signer identifiers are `did:wk`
//! identifiers from [`zerocap_key`].

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod authorize;
mod builder;
mod chain;
mod config;
mod delegation;
mod error;
mod guard;
mod issuer;
mod payload;
mod permission;
mod time;
mod verifier;


//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use builder::*;
pub use chain::*;
pub use config::*;
pub use delegation::*;
pub use error::*;
pub use guard::*;
pub use issuer::*;
pub use payload::*;
pub use permission::*;
pub use time::*;
pub use verifier::*;
