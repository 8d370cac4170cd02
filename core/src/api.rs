use crate::{Context, Result};
use std::fmt::Debug;

/// A credential that can be checked for usability before signing.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is still valid for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// Loads a credential from somewhere: static values, the environment, a
/// config struct.
///
/// Returning `Ok(None)` means this source has nothing to offer and is not
/// an error; chains use it to fall through to the next provider.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load a credential from this source.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// Signs one request in place.
///
/// Implementations read the request parts and the payload bytes (the
/// payload hash participates in the canonical request) and insert whatever
/// headers the protocol requires. Signing never performs I/O.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request with the given credential.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        payload: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()>;
}
