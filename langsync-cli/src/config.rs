//! `langsync.toml` loading and merging with command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use langsync::SyncOptions;
use langsync::provider::{DEFAULT_GOOGLE_ENDPOINT, DEFAULT_TIMEOUT};
use serde::Deserialize;

use crate::validation::validate_language_code;

/// File looked up in the synced directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "langsync.toml";

/// Translation backend selectable from the command line or config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google's public translate endpoint
    #[default]
    Google,
    /// Offline pseudo-localization (`[fr] Hello`)
    Pseudo,
    /// Copy the source text unchanged
    Passthrough,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProviderKind::Google => "google",
            ProviderKind::Pseudo => "pseudo",
            ProviderKind::Passthrough => "passthrough",
        };
        f.write_str(name)
    }
}

/// Contents of a `langsync.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source_language: Option<String>,
    pub delimiter: Option<char>,
    pub markers: Option<Vec<String>>,
    pub extension: Option<String>,
    pub provider: Option<ProviderKind>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid config: {}", e))
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_language: Option<String>,
    pub provider: Option<ProviderKind>,
    pub dry_run: bool,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: SyncOptions,
    pub provider: ProviderKind,
    pub endpoint: String,
    pub timeout: Duration,
}

/// Reads `explicit`, or `<directory>/langsync.toml` when it exists.
///
/// A missing implicit file yields the defaults; a missing explicit one is an error.
pub fn load_config(directory: &Path, explicit: Option<&Path>) -> Result<FileConfig, String> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let implicit = directory.join(CONFIG_FILE_NAME);
            if !implicit.is_file() {
                return Ok(FileConfig::default());
            }
            implicit
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    FileConfig::from_toml_str(&content).map_err(|e| format!("{} ({})", e, path.display()))
}

/// Applies defaults, then the file, then command-line overrides.
pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<ResolvedConfig, String> {
    let mut options = SyncOptions::new().with_dry_run(overrides.dry_run);

    if let Some(delimiter) = file.delimiter {
        if delimiter.is_whitespace() {
            return Err("Delimiter cannot be whitespace".to_string());
        }
        options = options.with_delimiter(delimiter);
    }
    if let Some(markers) = file.markers {
        options = options.with_master_markers(markers);
        if options.master_markers.is_empty() {
            return Err("At least one master marker is required".to_string());
        }
    }
    if let Some(extension) = file.extension {
        options = options.with_extension(extension);
    }
    if let Some(lang) = overrides.source_language.or(file.source_language) {
        validate_language_code(&lang)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
        options = options.with_source_language(lang.trim());
    }

    if file.timeout_secs == Some(0) {
        return Err("timeout_secs must be greater than zero".to_string());
    }

    Ok(ResolvedConfig {
        options,
        provider: overrides.provider.or(file.provider).unwrap_or_default(),
        endpoint: file
            .endpoint
            .unwrap_or_else(|| DEFAULT_GOOGLE_ENDPOINT.to_string()),
        timeout: file
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = FileConfig::from_toml_str(indoc! {r#"
            source_language = "en-GB"
            delimiter = "/"
            markers = ["base"]
            extension = "json"
            provider = "pseudo"
            endpoint = "http://localhost:8080/translate"
            timeout_secs = 5
        "#})
        .unwrap();

        assert_eq!(config.source_language.as_deref(), Some("en-GB"));
        assert_eq!(config.delimiter, Some('/'));
        assert_eq!(config.markers, Some(vec!["base".to_string()]));
        assert_eq!(config.provider, Some(ProviderKind::Pseudo));
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = FileConfig::from_toml_str("sourceLanguage = \"en\"\n").unwrap_err();
        assert!(err.starts_with("Invalid config"));
    }

    #[test]
    fn test_missing_implicit_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(temp_dir.path(), None).unwrap();
        assert_eq!(config, FileConfig::default());

        let resolved = resolve(config, Overrides::default()).unwrap();
        assert_eq!(resolved.provider, ProviderKind::Google);
        assert_eq!(resolved.endpoint, DEFAULT_GOOGLE_ENDPOINT);
        assert_eq!(resolved.timeout, DEFAULT_TIMEOUT);
        assert_eq!(resolved.options.source_language, "en");
        assert_eq!(resolved.options.delimiter, '.');
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("other.toml");
        let err = load_config(temp_dir.path(), Some(&explicit)).unwrap_err();
        assert!(err.contains("Cannot read config"));
    }

    #[test]
    fn test_command_line_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "source_language = \"de\"\nprovider = \"passthrough\"\n",
        )
        .unwrap();

        let config = load_config(temp_dir.path(), None).unwrap();
        let resolved = resolve(
            config.clone(),
            Overrides {
                source_language: Some("fr".to_string()),
                provider: Some(ProviderKind::Pseudo),
                dry_run: true,
            },
        )
        .unwrap();
        assert_eq!(resolved.options.source_language, "fr");
        assert_eq!(resolved.provider, ProviderKind::Pseudo);
        assert!(resolved.options.dry_run);

        let resolved = resolve(config, Overrides::default()).unwrap();
        assert_eq!(resolved.options.source_language, "de");
        assert_eq!(resolved.provider, ProviderKind::Passthrough);
    }

    #[test]
    fn test_config_source_language_is_validated() {
        let config = FileConfig::from_toml_str("source_language = \"not a language\"\n").unwrap();
        let err = resolve(config, Overrides::default()).unwrap_err();
        assert!(err.starts_with("Language code validation failed"));

        let config = FileConfig::from_toml_str("source_language = \" pt-BR \"\n").unwrap();
        let resolved = resolve(config, Overrides::default()).unwrap();
        assert_eq!(resolved.options.source_language, "pt-BR");
    }

    #[test]
    fn test_resolve_rejects_bad_values() {
        let config = FileConfig {
            markers: Some(vec!["  ".to_string()]),
            ..FileConfig::default()
        };
        assert!(resolve(config, Overrides::default()).is_err());

        let config = FileConfig {
            delimiter: Some(' '),
            ..FileConfig::default()
        };
        assert!(resolve(config, Overrides::default()).is_err());

        let config = FileConfig {
            timeout_secs: Some(0),
            ..FileConfig::default()
        };
        assert!(resolve(config, Overrides::default()).is_err());
    }
}
