//! Core components for signing AWS query protocol requests.
//!
//! This crate holds the service-independent pieces of awsig: the error
//! type, hashing and time helpers, the deconstructed request
//! representation, and the traits that connect credential loading to
//! request signing.
//!
//! ## Overview
//!
//! - **Context**: ambient capabilities (environment access) handed to
//!   credential providers.
//! - **Traits**: [`ProvideCredential`] loads credentials,
//!   [`SignRequest`] signs one request in place, [`SigningCredential`]
//!   gates credential reuse.
//! - **Signer**: the orchestrator that caches a valid credential and
//!   delegates signing.
//!
//! The concrete SigV4 signer for the query protocol lives in the
//! `awsig-query` crate; this crate knows nothing about any particular
//! signing scheme.
//!
//! ## Example
//!
//! ```
//! use awsig_core::{Context, OsEnv};
//!
//! let ctx = Context::new().with_env(OsEnv);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod env;
pub use env::{Env, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
