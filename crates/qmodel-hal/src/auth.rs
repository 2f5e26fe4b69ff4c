//! Bearer token sourcing.

/// Default environment variable holding the platform token.
pub const TOKEN_ENV_VAR: &str = "QMODEL_TOKEN";

/// Reads the bearer token from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    env_var: String,
}

impl EnvTokenProvider {
    /// Create a new environment variable token provider.
    pub fn new(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
        }
    }

    /// Create provider for `QMODEL_TOKEN`.
    pub fn qmodel() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }

    /// Read the token if the variable is set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.env_var).ok().filter(|t| !t.is_empty())
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::qmodel()
    }
}
