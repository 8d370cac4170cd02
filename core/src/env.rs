use std::collections::HashMap;
use std::fmt::Debug;

/// Permits reading environment variables.
///
/// Credential providers look up their configuration through this trait so
/// tests can substitute a fixed environment instead of mutating the real
/// process environment.
pub trait Env: Debug + Send + Sync + 'static {
    /// Fetch the environment variable `key` from the current process.
    fn var(&self, key: &str) -> Option<String>;

    /// Take a snapshot of all environment variables.
    fn vars(&self) -> HashMap<String, String>;
}

/// Implements [`Env`] by reading the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().to_string())
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// A fixed environment, for testing.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to serve.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}
