//! API credential resolution
//!
//! The key can come from the --api-key flag, the config file, or the
//! GEMINI_API_KEY environment variable, checked in that order.

use log::debug;

/// Environment variable consulted as the last credential source.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// A single source of an API credential.
pub trait CredentialProvider {
    fn name(&self) -> &'static str;
    fn resolve(&self) -> Option<String>;
}

/// Credential passed on the command line.
pub struct FlagProvider(pub Option<String>);

impl CredentialProvider for FlagProvider {
    fn name(&self) -> &'static str {
        "command-line flag"
    }

    fn resolve(&self) -> Option<String> {
        non_empty(self.0.as_deref())
    }
}

/// Credential stored in the config file.
pub struct ConfigProvider(pub Option<String>);

impl CredentialProvider for ConfigProvider {
    fn name(&self) -> &'static str {
        "config file"
    }

    fn resolve(&self) -> Option<String> {
        non_empty(self.0.as_deref())
    }
}

/// Credential read from an environment variable.
pub struct EnvProvider {
    pub var: &'static str,
}

impl Default for EnvProvider {
    fn default() -> Self {
        Self { var: API_KEY_ENV }
    }
}

impl CredentialProvider for EnvProvider {
    fn name(&self) -> &'static str {
        "environment variable"
    }

    fn resolve(&self) -> Option<String> {
        non_empty(std::env::var(self.var).ok().as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Ordered chain of credential sources; the first one that resolves wins.
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialChain {
    pub fn new(flag: Option<String>, config_key: Option<String>) -> Self {
        Self {
            providers: vec![
                Box::new(FlagProvider(flag)),
                Box::new(ConfigProvider(config_key)),
                Box::new(EnvProvider::default()),
            ],
        }
    }

    pub fn with_providers(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    pub fn resolve(&self) -> Option<String> {
        for provider in &self.providers {
            if let Some(key) = provider.resolve() {
                debug!("Using API key from {}", provider.name());
                return Some(key);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_takes_precedence() {
        let chain = CredentialChain::new(
            Some("flag-key".to_string()),
            Some("config-key".to_string()),
        );
        assert_eq!(chain.resolve(), Some("flag-key".to_string()));
    }

    #[test]
    fn test_blank_flag_falls_through_to_config() {
        let chain = CredentialChain::new(Some("   ".to_string()), Some("config-key".to_string()));
        assert_eq!(chain.resolve(), Some("config-key".to_string()));
    }

    #[test]
    fn test_env_is_last_resort() {
        std::env::set_var("JOBFIT_TEST_KEY", "env-key");
        let chain = CredentialChain::with_providers(vec![
            Box::new(FlagProvider(None)),
            Box::new(ConfigProvider(None)),
            Box::new(EnvProvider {
                var: "JOBFIT_TEST_KEY",
            }),
        ]);
        assert_eq!(chain.resolve(), Some("env-key".to_string()));
        std::env::remove_var("JOBFIT_TEST_KEY");
    }

    #[test]
    fn test_exhausted_chain_resolves_nothing() {
        let chain = CredentialChain::with_providers(vec![
            Box::new(FlagProvider(None)),
            Box::new(ConfigProvider(Some(String::new()))),
        ]);
        assert_eq!(chain.resolve(), None);
    }
}
