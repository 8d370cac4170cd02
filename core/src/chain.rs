use crate::{Context, ProvideCredential, Result};
use async_trait::async_trait;
use std::fmt::{self, Debug};

/// A chain of credential providers, tried in order.
///
/// The first provider that yields a credential wins. A provider that
/// errors is logged and skipped; only an empty chain (or one where every
/// provider comes up empty) resolves to `None`.
pub struct ProvideCredentialChain<C> {
    providers: Vec<Box<dyn ProvideCredential<Credential = C>>>,
}

impl<C: Send + Sync + Unpin + 'static> ProvideCredentialChain<C> {
    /// Create a new empty credential provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a credential provider to the chain.
    pub fn push(mut self, provider: impl ProvideCredential<Credential = C> + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Create a chain from a vector of providers.
    pub fn from_vec(providers: Vec<Box<dyn ProvideCredential<Credential = C>>>) -> Self {
        Self { providers }
    }
}

impl<C: Send + Sync + Unpin + 'static> Default for ProvideCredentialChain<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for ProvideCredentialChain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers_count", &self.providers.len())
            .finish()
    }
}

#[async_trait]
impl<C: Send + Sync + Unpin + 'static> ProvideCredential for ProvideCredentialChain<C> {
    type Credential = C;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        for provider in &self.providers {
            match provider.provide_credential(ctx).await {
                Ok(Some(cred)) => {
                    log::debug!("loaded credential from provider: {provider:?}");
                    return Ok(Some(cred));
                }
                Ok(None) => {
                    log::debug!("no credential in provider: {provider:?}");
                }
                Err(e) => {
                    log::warn!("provider {provider:?} failed, trying next: {e:?}");
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Debug, Clone)]
    struct Token(String);

    #[derive(Debug)]
    struct Fixed(&'static str);

    #[async_trait]
    impl ProvideCredential for Fixed {
        type Credential = Token;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
            Ok(Some(Token(self.0.to_string())))
        }
    }

    #[derive(Debug)]
    struct Empty;

    #[async_trait]
    impl ProvideCredential for Empty {
        type Credential = Token;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
            Ok(None)
        }
    }

    #[derive(Debug)]
    struct Failing;

    #[async_trait]
    impl ProvideCredential for Failing {
        type Credential = Token;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
            Err(Error::unexpected("provider broke"))
        }
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let chain = ProvideCredentialChain::new()
            .push(Failing)
            .push(Empty)
            .push(Fixed("first"))
            .push(Fixed("second"));

        let got = chain
            .provide_credential(&Context::new())
            .await
            .expect("chain must not error")
            .expect("credential must be found");
        assert_eq!(got.0, "first");
    }

    #[tokio::test]
    async fn test_all_empty_resolves_none() {
        let chain = ProvideCredentialChain::new().push(Empty).push(Failing);

        let got = chain
            .provide_credential(&Context::new())
            .await
            .expect("chain must not error");
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_empty_chain_resolves_none() {
        let chain: ProvideCredentialChain<Token> = ProvideCredentialChain::new();

        let got = chain
            .provide_credential(&Context::new())
            .await
            .expect("chain must not error");
        assert!(got.is_none());
    }
}
