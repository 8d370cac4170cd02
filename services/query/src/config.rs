/// Static configuration for credential loading.
///
/// Fields left as `None` simply make [`ConfigCredentialProvider`] come up
/// empty; validation of non-empty values happens at signing time.
///
/// [`ConfigCredentialProvider`]: crate::ConfigCredentialProvider
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Access key id to use.
    pub access_key_id: Option<String>,
    /// Secret access key to use.
    pub secret_access_key: Option<String>,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
}
