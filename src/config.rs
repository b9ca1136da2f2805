//! Configuration loading.
//!
//! Loaded from an explicit path, .refinr.yml in the current directory, or
//! ~/.config/refinr/refinr.yml, with defaults for everything.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use refinr::llm::AnthropicConfig;
use refinr::policy::{DEFAULT_MAX_ITERATIONS, DEFAULT_SCORE_THRESHOLD};

/// Top-level configuration for refinr.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Refinement loop settings.
    pub refinement: RefinementConfig,

    /// LLM collaborator settings.
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .refinr.yml in current directory
    /// 3. ~/.config/refinr/refinr.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(".refinr.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .refinr.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .refinr.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("refinr").join("refinr.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration before any step runs.
    pub fn validate(&self) -> Result<()> {
        if self.refinement.max_iterations == 0 {
            eyre::bail!("refinement.max-iterations must be > 0");
        }
        if !(0..=10).contains(&self.refinement.score_threshold) {
            eyre::bail!("refinement.score-threshold must be between 0 and 10");
        }
        if self.llm.timeout_ms == 0 {
            eyre::bail!("llm.timeout-ms must be > 0");
        }
        Ok(())
    }
}

/// Refinement loop settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefinementConfig {
    /// Score at or above which the loop halts.
    #[serde(rename = "score-threshold")]
    pub score_threshold: i64,

    /// Hard cap on generation iterations.
    #[serde(rename = "max-iterations")]
    pub max_iterations: u32,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// LLM collaborator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier.
    pub model: String,

    /// Max tokens per response.
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Timeout per LLM call in milliseconds.
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Environment variable holding the API key.
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Base URL for the Messages API.
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let base = AnthropicConfig::default();
        Self {
            model: base.model,
            max_tokens: base.max_tokens,
            timeout_ms: base.timeout.as_millis() as u64,
            api_key_env: base.api_key_env,
            base_url: base.base_url,
        }
    }
}

impl LlmConfig {
    /// Convert to the client-level configuration.
    pub fn to_anthropic(&self) -> AnthropicConfig {
        AnthropicConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_millis(self.timeout_ms),
            base_url: self.base_url.clone(),
            api_key_env: self.api_key_env.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.refinement.score_threshold, 9);
        assert_eq!(config.refinement.max_iterations, 4);
        assert_eq!(config.llm.timeout_ms, 300_000);
        assert_eq!(config.llm.api_key_env, "ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_iterations() {
        let config = Config {
            refinement: RefinementConfig {
                max_iterations: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_threshold() {
        let config = Config {
            refinement: RefinementConfig {
                score_threshold: 11,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
refinement:
  score-threshold: 7
  max-iterations: 2
llm:
  model: claude-3-haiku-20240307
  timeout-ms: 60000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.refinement.score_threshold, 7);
        assert_eq!(config.refinement.max_iterations, 2);
        assert_eq!(config.llm.model, "claude-3-haiku-20240307");
        assert_eq!(config.llm.timeout_ms, 60000);
        // Other fields should have defaults
        assert_eq!(config.llm.api_key_env, "ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refinement:\n  max-iterations: 3").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.refinement.max_iterations, 3);
        assert_eq!(config.refinement.score_threshold, 9);
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let path = PathBuf::from("/nonexistent/refinr.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_to_anthropic() {
        let llm = LlmConfig {
            model: "claude-3-haiku-20240307".to_string(),
            timeout_ms: 1_000,
            ..Default::default()
        };
        let anthropic = llm.to_anthropic();
        assert_eq!(anthropic.model, "claude-3-haiku-20240307");
        assert_eq!(anthropic.timeout, Duration::from_secs(1));
    }
}
