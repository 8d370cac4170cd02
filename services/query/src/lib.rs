//! AWS SigV4 signer for the query protocol.
//!
//! The query protocol is the form-encoded POST style spoken by services
//! like SES classic and IAM: nested operation parameters flatten into
//! dotted/indexed `key=value` pairs, the pairs become the request body,
//! and the request is authenticated with an `Authorization` header
//! computed by [Signature Version 4][sigv4].
//!
//! [sigv4]: https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html
//!
//! ## Example
//!
//! ```no_run
//! use awsig_core::{Context, OsEnv, Signer};
//! use awsig_query::{DefaultCredentialProvider, ParamMap, QueryRequestBuilder, RequestSigner};
//!
//! # async fn example() -> awsig_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(
//!     ctx,
//!     DefaultCredentialProvider::new(),
//!     RequestSigner::new("email", "us-east-1"),
//! );
//!
//! let params = ParamMap::new()
//!     .with("Action", "SendEmail")
//!     .with("Source", "sender@example.com");
//! let req = QueryRequestBuilder::new("email", "us-east-1").build(&params)?;
//!
//! let (mut parts, body) = req.into_parts();
//! signer.sign(&mut parts, &body).await?;
//! // Hand http::Request::from_parts(parts, body) to your HTTP transport.
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::Config;

mod constants;

mod credential;
pub use credential::Credential;

mod cache;
pub use cache::SigningKeyCache;

mod params;
pub use params::{ParamMap, ParamValue};

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, DefaultCredentialProvider, EnvCredentialProvider,
    StaticCredentialProvider,
};

mod request;
pub use request::QueryRequestBuilder;

mod sign_request;
pub use sign_request::RequestSigner;
