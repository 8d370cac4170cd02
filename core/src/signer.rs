use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};

/// Signer is the front door: it loads a credential, keeps it while it
/// stays valid, and signs requests with it.
///
/// Cloning is cheap and clones share the cached credential.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = C>>,
    builder: Arc<dyn SignRequest<Credential = C>>,
    credential: Arc<Mutex<Option<C>>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Sign the request parts in place against the given payload bytes.
    ///
    /// The cached credential is reused while `is_valid` holds; otherwise
    /// the loader runs again before signing.
    pub async fn sign(&self, req: &mut http::request::Parts, payload: &[u8]) -> Result<()> {
        let credential = self.credential.lock().expect("lock poisoned").clone();
        let credential = if credential.is_valid() {
            credential
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        self.builder
            .sign_request(&self.ctx, req, payload, credential.as_ref())
            .await
    }
}
