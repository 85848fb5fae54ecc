//! Application and decoder configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MIMETREE_CONFIG` (environment variable)
//! 2. `~/.config/mimetree/config.toml` (Linux/macOS)
//!    `%APPDATA%\mimetree\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{MimeError, Result};

/// Charset assumed when a part declares none.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Transfer encoding assumed when a part declares none.
pub const DEFAULT_TRANSFER_ENCODING: &str = "7bit";

/// Multipart nesting depth after which parts are decoded as leaves.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Decoder defaults.
    pub decode: DecodeConfig,
    /// Output rendering settings.
    pub output: OutputConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// Defaults applied by the decoder when a message leaves something unstated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Charset used when `Content-Type` has no `charset=` parameter.
    pub default_charset: String,
    /// Encoding used when `Content-Transfer-Encoding` is absent.
    pub default_transfer_encoding: String,
    /// Maximum multipart nesting depth.
    pub max_depth: usize,
}

/// Output rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: "text" or "json".
    pub format: String,
    /// Characters of content shown per part in text output (0 = everything).
    pub preview_chars: usize,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            default_charset: DEFAULT_CHARSET.to_string(),
            default_transfer_encoding: DEFAULT_TRANSFER_ENCODING.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            preview_chars: 200,
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = config_file_path()
        .ok_or_else(|| MimeError::Config("Could not determine config file path".into()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MimeError::io(parent, e))?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| MimeError::Config(e.to_string()))?;
    std::fs::write(&path, contents).map_err(|e| MimeError::io(&path, e))?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(path)
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("MIMETREE_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|d| d.join("mimetree").join("config.toml"))
}

/// Return the cache directory used for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mimetree")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("mimetree.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.decode.default_charset, "UTF-8");
        assert_eq!(cfg.decode.default_transfer_encoding, "7bit");
        assert_eq!(cfg.decode.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(cfg.output.format, "text");
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.decode, cfg.decode);
        assert_eq!(parsed.output.preview_chars, cfg.output.preview_chars);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[decode]
default_charset = "windows-1252"

[output]
format = "json"
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.decode.default_charset, "windows-1252");
        assert_eq!(cfg.output.format, "json");
        assert_eq!(cfg.decode.default_transfer_encoding, "7bit");
        assert_eq!(cfg.decode.max_depth, 32);
        assert_eq!(cfg.output.preview_chars, 200);
    }

    #[test]
    fn test_log_file_uses_cache_override() {
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(PathBuf::from("/tmp/mimetree-test"));
        assert_eq!(
            log_file_path(&cfg),
            PathBuf::from("/tmp/mimetree-test/mimetree.log")
        );
    }
}
