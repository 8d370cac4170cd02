use crate::env::{Env, StaticEnv};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the ambient capabilities a signing call may need.
///
/// The signing pipeline itself is pure; only credential providers reach
/// through the context, currently for environment access. A default
/// context serves an empty environment, so callers that pass credentials
/// directly never touch the process environment.
///
/// ## Example
///
/// ```
/// use awsig_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// ```
#[derive(Clone)]
pub struct Context {
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("env", &self.env).finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context serving an empty environment.
    pub fn new() -> Self {
        Self {
            env: Arc::new(StaticEnv::default()),
        }
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Fetch one environment variable.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Snapshot all environment variables.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_has_empty_env() {
        let ctx = Context::new();
        assert!(ctx.env_var("PATH").is_none());
        assert!(ctx.env_vars().is_empty());
    }

    #[test]
    fn test_with_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([("A".to_string(), "b".to_string())]),
        });
        assert_eq!(ctx.env_var("A"), Some("b".to_string()));
    }
}
