use thiserror::Error;

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_PROMPT: &str = "> ";

const MAX_DEPTH_KEY: &str = "LOX_MAX_DEPTH";
const PROMPT_KEY: &str = "LOX_PROMPT";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`LOX_MAX_DEPTH` must be a positive integer, got `{0}`")]
    InvalidMaxDepth(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Deepest nesting the parser accepts and deepest tree the evaluator walks.
    pub max_depth: usize,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(raw) = lookup(MAX_DEPTH_KEY) {
            config.max_depth = match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => return Err(ConfigError::InvalidMaxDepth(raw)),
            };
        }

        if let Some(prompt) = lookup(PROMPT_KEY) {
            config.prompt = prompt;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(from_pairs(&[]), Ok(Config::default()));
    }

    #[test]
    fn reads_variables() {
        let config = from_pairs(&[("LOX_MAX_DEPTH", " 32 "), ("LOX_PROMPT", "lox> ")]).unwrap();
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.prompt, "lox> ");
    }

    #[test]
    fn rejects_bad_depth() {
        assert_eq!(
            from_pairs(&[("LOX_MAX_DEPTH", "0")]),
            Err(ConfigError::InvalidMaxDepth("0".to_string()))
        );
        assert!(from_pairs(&[("LOX_MAX_DEPTH", "deep")]).is_err());
    }
}
