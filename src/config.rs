//! Configuration loading.
//!
//! The default configuration file is `registry-validator.toml` in the current
//! working directory. Every field has a default, so the file may be omitted
//! entirely:
//!
//! ```toml
//! [registry]
//! domain = "registry.example.com"
//!
//! [urls]
//! icon_relative_prefixes = ["./", "../../../../.icons/"]
//!
//! [authorization]
//! org = "acme"
//! members = ["alice", "bob"]
//! ```

use crate::error::ValidatorError;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "registry-validator.toml";

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub urls: UrlConfig,
    pub authorization: AuthorizationConfig,
}

/// Repository layout and the canonical module domain.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Domain used to build the expected Terraform `source` value,
    /// `<domain>/<namespace>/<name>/coder`.
    pub domain: String,
    /// Registry root directory, relative to the repository root.
    pub registry_dir: String,
    /// Shared top-level assets directory, relative to the repository root.
    pub assets_dir: String,
}

/// Allow-lists for icon and avatar URLs.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct UrlConfig {
    /// Prefixes a relative module/template `icon` must start with.
    pub icon_relative_prefixes: Vec<String>,
    /// Prefixes a relative contributor `avatar` must start with.
    pub avatar_relative_prefixes: Vec<String>,
    /// File extensions (with leading dot) accepted for avatars.
    pub avatar_extensions: Vec<String>,
}

/// Inputs for the verified-flag authorization gate.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AuthorizationConfig {
    /// Organization whose members may change the `verified` flag.
    pub org: String,
    /// Known organization members. An empty roster means membership is
    /// unknown, which is treated as least privilege.
    pub members: Vec<String>,
    /// Upper bound for a single membership lookup.
    pub lookup_timeout_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            domain: "registry.coder.com".to_string(),
            registry_dir: "registry".to_string(),
            assets_dir: ".icons".to_string(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        UrlConfig {
            icon_relative_prefixes: vec!["./".to_string(), "../../../../.icons/".to_string()],
            avatar_relative_prefixes: vec!["./".to_string()],
            avatar_extensions: [".png", ".jpeg", ".jpg", ".gif", ".svg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        AuthorizationConfig {
            org: "coder".to_string(),
            members: vec![],
            lookup_timeout_ms: 5_000,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. Otherwise try [`DEFAULT_CONFIG_FILE`] in the current directory.
    /// 3. Fall back to [`Config::default()`].
    ///
    /// # Errors
    ///
    /// [`ValidatorError::ConfigNotFound`] for a missing explicit path,
    /// [`ValidatorError::Io`] when the file cannot be read, and
    /// [`ValidatorError::ConfigParse`] for invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Config, ValidatorError> {
        let config_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => return Err(ValidatorError::ConfigNotFound(p.to_path_buf())),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        let Some(path) = config_path else {
            return Ok(Config::default());
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ValidatorError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ValidatorError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        config.warn_on_suspicious_values();
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Settings that load fine but will almost certainly misbehave.
    pub fn suspicious_values(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.urls.icon_relative_prefixes.is_empty() {
            warnings.push(
                "urls.icon_relative_prefixes is empty; every relative icon URL will be rejected"
                    .to_string(),
            );
        }
        if self.urls.avatar_relative_prefixes.is_empty() {
            warnings.push(
                "urls.avatar_relative_prefixes is empty; every relative avatar URL will be rejected"
                    .to_string(),
            );
        }
        if self.urls.icon_relative_prefixes.iter().any(|p| p.is_empty())
            || self.urls.avatar_relative_prefixes.iter().any(|p| p.is_empty())
        {
            warnings.push("an empty relative URL prefix matches every relative URL".to_string());
        }
        if self.authorization.lookup_timeout_ms == 0 {
            warnings.push(
                "authorization.lookup_timeout_ms is 0; every org membership lookup will time out"
                    .to_string(),
            );
        }
        warnings
    }

    fn warn_on_suspicious_values(&self) {
        for warning in self.suspicious_values() {
            tracing::warn!("{warning}");
        }
    }
}
