//! Options controlling how a directory is scanned and reconciled.

use crate::flatten::DEFAULT_DELIMITER;

/// Marker tokens that identify the master file by name.
pub const DEFAULT_MASTER_MARKERS: [&str; 2] = ["en", "english"];

/// Behavior options for [`crate::scan`] and [`crate::Reconciler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Character joining nested keys in flat key paths.
    pub delimiter: char,
    /// Language of the master file, passed to the translation provider.
    pub source_language: String,
    /// Case-insensitive tokens searched for in file stems to find the master.
    pub master_markers: Vec<String>,
    /// Extension (without the dot) of candidate locale files.
    pub extension: String,
    /// Translate and report, but never write target files.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            source_language: "en".to_string(),
            master_markers: DEFAULT_MASTER_MARKERS.iter().map(|m| m.to_string()).collect(),
            extension: "json".to_string(),
            dry_run: false,
        }
    }
}

impl SyncOptions {
    /// Creates default sync options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key path delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the source language code.
    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = language.into();
        self
    }

    /// Replaces the master marker tokens. Markers are stored lowercased.
    pub fn with_master_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.master_markers = markers
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    /// Sets the locale file extension; a leading dot is ignored.
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    /// Enables/disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
