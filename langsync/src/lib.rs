#![forbid(unsafe_code)]
//! Keep nested JSON locale files in sync with a master translation file.
//!
//! A directory holds one master file (the source language, e.g. `strings_en.json`)
//! and any number of target locale files. langsync finds the keys each target
//! is missing, asks a translation provider for them and writes the target back
//! with the new entries merged into its existing structure.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langsync::{PseudoTranslator, Reconciler, SyncEvent, SyncOptions, scan};
//!
//! let options = SyncOptions::new().with_source_language("en");
//! let file_set = scan("locales", &options)?;
//!
//! let reconciler = Reconciler::new(PseudoTranslator, options);
//! let report = reconciler.run(&file_set, &mut |event: SyncEvent| println!("{:?}", event))?;
//! println!("{} files updated", report.updated());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Building blocks
//!
//! - [`flatten`] / [`unflatten`]: nested [`Tree`] ⇄ [`FlatKeyMap`] keyed by `a.b.c` paths
//! - [`scan`]: master detection and target discovery ([`FileSet`])
//! - [`tag_for`]: language tag from a file name (`strings_pt-BR.json` → `pt`)
//! - [`Translator`] / [`FailSoft`]: provider boundary with fall-back-to-source semantics
//! - [`Reconciler`]: the sync run itself, emitting [`SyncEvent`]s

pub mod engine;
pub mod error;
pub mod events;
pub mod flatten;
pub mod language;
pub mod locator;
pub mod options;
pub mod provider;
pub mod traits;
pub mod tree;

// Re-export most used types for easy consumption
pub use crate::{
    engine::{FileOutcome, FileReport, FileStatus, Reconciler, RunReport, load_flat, status},
    error::Error,
    events::{EventSink, NullSink, SyncEvent},
    flatten::{DEFAULT_DELIMITER, FlatKeyMap, flatten, unflatten},
    language::{LanguageTag, tag_for},
    locator::{FileSet, scan},
    options::SyncOptions,
    provider::{
        FailSoft, GoogleTranslator, Outcome, PassthroughTranslator, ProviderError,
        PseudoTranslator, Translator,
    },
    traits::Parser,
    tree::{Node, Tree},
};

/// Scans `directory` and runs one sync over it.
pub fn sync_directory<P, T, S>(
    directory: P,
    translator: T,
    options: SyncOptions,
    sink: &mut S,
) -> Result<RunReport, Error>
where
    P: AsRef<std::path::Path>,
    T: Translator,
    S: EventSink,
{
    let file_set = scan(directory, &options)?;
    Reconciler::new(translator, options).run(&file_set, sink)
}
