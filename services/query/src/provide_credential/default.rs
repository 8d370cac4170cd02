use crate::provide_credential::EnvCredentialProvider;
use crate::Credential;
use async_trait::async_trait;
use awsig_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider resolves credentials via the default chain.
///
/// Resolution order:
///
/// 1. Environment variables
///
/// Use [`with_chain`](Self::with_chain) to resolve from additional
/// sources, e.g. a [`ConfigCredentialProvider`](crate::ConfigCredentialProvider)
/// or a custom provider.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
