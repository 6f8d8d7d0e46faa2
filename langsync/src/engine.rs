//! The reconciliation engine: fills keys missing from target locale files.
//!
//! A run loads the master once, then handles each target independently and
//! in order:
//!
//! 1. load and flatten the target (a failure skips only this file),
//! 2. diff the key paths against the master,
//! 3. translate the missing keys in lexicographic key order,
//! 4. rebuild the tree and replace the file on disk.
//!
//! Values already present in a target are never touched, and a target with no
//! missing keys is not rewritten, so repeated runs are stable byte for byte.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    error::Error,
    events::{EventSink, SyncEvent},
    flatten::{FlatKeyMap, flatten, unflatten},
    language::{LanguageTag, tag_for},
    locator::FileSet,
    options::SyncOptions,
    provider::{FailSoft, Outcome, Translator},
    traits::Parser,
    tree::Tree,
};

/// Result of reconciling one target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Missing keys were filled in.
    Updated {
        translated: usize,
        failed: usize,
        written: bool,
    },
    /// Nothing was missing; the file was left untouched.
    UpToDate,
    /// The file could not be loaded or written and was left untouched.
    Skipped { reason: String },
}

/// Per-file entry of a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: LanguageTag,
    pub missing: usize,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Summary of a completed run.
///
/// A run counts as completed whenever the master loaded, whatever happened
/// to the individual targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub master: PathBuf,
    pub master_keys: usize,
    pub source_language: String,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Updated { .. }))
    }

    pub fn up_to_date(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::UpToDate))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    /// Keys filled in across all files, including fallbacks to source text.
    pub fn translated(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Updated { translated, failed, .. } => translated + failed,
                _ => 0,
            })
            .sum()
    }

    /// Keys for which the provider failed and the source text was kept.
    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Updated { failed, .. } => failed,
                _ => 0,
            })
            .sum()
    }

    pub fn file(&self, path: &Path) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == path)
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| predicate(&f.outcome)).count()
    }
}

/// Missing keys of one target, computed without translating anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    pub path: PathBuf,
    pub language: LanguageTag,
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Loads a locale file and flattens it.
pub fn load_flat(path: &Path, delimiter: char) -> Result<FlatKeyMap, Error> {
    let tree = Tree::read_from(path)?;
    Ok(flatten(&tree, delimiter))
}

/// Reports the missing keys of every target in `file_set` without writing.
pub fn status(file_set: &FileSet, options: &SyncOptions) -> Result<Vec<FileStatus>, Error> {
    let master = load_flat(&file_set.master, options.delimiter)
        .map_err(|err| Error::master_load(&file_set.master, err))?;

    Ok(file_set
        .targets
        .iter()
        .map(|path| {
            let language = tag_for(path);
            match load_flat(path, options.delimiter) {
                Ok(flat) => FileStatus {
                    path: path.clone(),
                    language,
                    missing: master.missing_from(&flat),
                    error: None,
                },
                Err(err) => FileStatus {
                    path: path.clone(),
                    language,
                    missing: Vec::new(),
                    error: Some(Error::target_load(path, err).to_string()),
                },
            }
        })
        .collect())
}

/// Keeps target files in sync with a master using a translation provider.
pub struct Reconciler<T> {
    translator: FailSoft<T>,
    options: SyncOptions,
}

impl<T: Translator> Reconciler<T> {
    pub fn new(translator: T, options: SyncOptions) -> Self {
        Self {
            translator: FailSoft::new(translator),
            options,
        }
    }

    /// Runs one sync over `file_set`, reporting progress to `sink`.
    ///
    /// Only a master that cannot be loaded fails the run; every target-level
    /// problem is recorded in the returned report.
    pub fn run<S: EventSink>(&self, file_set: &FileSet, sink: &mut S) -> Result<RunReport, Error> {
        let master_path = &file_set.master;
        sink.emit(SyncEvent::RunStarted {
            master: master_path.clone(),
            targets: file_set.targets.len(),
        });

        let master = load_flat(master_path, self.options.delimiter).map_err(|err| {
            tracing::error!(master = %master_path.display(), %err, "failed to load master file");
            Error::master_load(master_path, err)
        })?;
        sink.emit(SyncEvent::MasterLoaded {
            master: master_path.clone(),
            keys: master.len(),
        });

        let mut report = RunReport {
            master: master_path.clone(),
            master_keys: master.len(),
            source_language: self.options.source_language.clone(),
            dry_run: self.options.dry_run,
            files: Vec::with_capacity(file_set.targets.len()),
        };

        for target in &file_set.targets {
            report.files.push(self.sync_file(target, &master, sink));
        }

        sink.emit(SyncEvent::RunCompleted {
            updated: report.updated(),
            up_to_date: report.up_to_date(),
            skipped: report.skipped(),
            translated: report.translated(),
        });
        Ok(report)
    }

    fn sync_file<S: EventSink>(&self, path: &Path, master: &FlatKeyMap, sink: &mut S) -> FileReport {
        let language = tag_for(path);
        let _span = tracing::debug_span!("sync_file", path = %path.display(), %language).entered();
        sink.emit(SyncEvent::FileStarted {
            path: path.to_path_buf(),
            language: language.clone(),
        });

        let (mut flat, empty_branches) = match Tree::read_from(path) {
            Ok(tree) => (flatten(&tree, self.options.delimiter), tree.empty_branches()),
            Err(err) => {
                let err = Error::target_load(path, err);
                tracing::warn!(%err, "skipping target file");
                return self.skip(path, language, 0, err.to_string(), sink);
            }
        };

        let missing = master.missing_from(&flat);
        sink.emit(SyncEvent::MissingKeys {
            path: path.to_path_buf(),
            count: missing.len(),
        });

        if missing.is_empty() {
            sink.emit(SyncEvent::FileCompleted {
                path: path.to_path_buf(),
                translated: 0,
                failed: 0,
                written: false,
            });
            return FileReport {
                path: path.to_path_buf(),
                language,
                missing: 0,
                outcome: FileOutcome::UpToDate,
            };
        }

        let total = missing.len();
        let mut translated = 0;
        let mut failed = 0;
        for (index, key) in missing.into_iter().enumerate() {
            let source_text = master.get(&key).unwrap_or_default();
            let outcome = self.translator.translate(
                source_text,
                &self.options.source_language,
                language.as_str(),
            );
            match &outcome {
                Outcome::Translated(_) => {
                    translated += 1;
                    sink.emit(SyncEvent::KeyTranslated {
                        path: path.to_path_buf(),
                        key: key.clone(),
                        index: index + 1,
                        total,
                    });
                }
                Outcome::Fallback { error, .. } => {
                    failed += 1;
                    sink.emit(SyncEvent::KeyFailed {
                        path: path.to_path_buf(),
                        key: key.clone(),
                        error: error.to_string(),
                    });
                }
            }
            flat.insert(key, outcome.into_text());
        }

        let tree = unflatten(&flat, self.options.delimiter);
        let written = !self.options.dry_run;
        if written && !empty_branches.is_empty() {
            tracing::warn!(
                dropped = ?empty_branches,
                "rewrite drops empty nested objects from target file"
            );
        }
        if written && let Err(err) = tree.write_to(path) {
            tracing::warn!(%err, "failed to write target file");
            return self.skip(path, language, total, format!("write failed: {}", err), sink);
        }

        tracing::debug!(translated, failed, written, "target file reconciled");
        sink.emit(SyncEvent::FileCompleted {
            path: path.to_path_buf(),
            translated,
            failed,
            written,
        });
        FileReport {
            path: path.to_path_buf(),
            language,
            missing: total,
            outcome: FileOutcome::Updated {
                translated,
                failed,
                written,
            },
        }
    }

    fn skip<S: EventSink>(
        &self,
        path: &Path,
        language: LanguageTag,
        missing: usize,
        reason: String,
        sink: &mut S,
    ) -> FileReport {
        sink.emit(SyncEvent::FileSkipped {
            path: path.to_path_buf(),
            reason: reason.clone(),
        });
        FileReport {
            path: path.to_path_buf(),
            language,
            missing,
            outcome: FileOutcome::Skipped { reason },
        }
    }
}
