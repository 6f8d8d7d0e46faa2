//! Discovery of the master file and its target locale files in a directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    error::Error,
    language::{LanguageTag, tag_for},
    options::SyncOptions,
};

/// The master file plus the target files to keep in sync with it.
///
/// A file set is a snapshot of one directory scan; it is not refreshed when
/// the directory changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSet {
    pub master: PathBuf,
    pub targets: Vec<PathBuf>,
}

impl FileSet {
    /// Target paths paired with their derived language tags.
    pub fn tagged_targets(&self) -> impl Iterator<Item = (&Path, LanguageTag)> {
        self.targets.iter().map(|p| (p.as_path(), tag_for(p)))
    }
}

/// Scans `directory` (non-recursively) for locale files and picks the master.
///
/// Candidates are files with the configured extension, ordered by file name so
/// the result does not depend on the platform's listing order. The master is
/// the best marker match: a stem or last `_` segment equal to a marker
/// (`strings_en`, `english`) beats a region variant of it (`strings_en-GB`),
/// which beats a stem that merely contains a marker. Ties go to the first
/// candidate by name.
pub fn scan<P: AsRef<Path>>(directory: P, options: &SyncOptions) -> Result<FileSet, Error> {
    let directory = directory.as_ref();
    let candidates = list_candidates(directory, &options.extension)?;
    tracing::debug!(
        directory = %directory.display(),
        candidates = candidates.len(),
        "scanned directory"
    );

    let master_index = pick_master(&candidates, &options.master_markers).ok_or_else(|| {
        Error::NoMasterFound {
            directory: directory.to_path_buf(),
            markers: options.master_markers.clone(),
        }
    })?;

    let mut targets = candidates;
    let master = targets.remove(master_index);
    tracing::debug!(master = %master.display(), targets = targets.len(), "selected master file");

    Ok(FileSet { master, targets })
}

fn list_candidates(directory: &Path, extension: &str) -> Result<Vec<PathBuf>, Error> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches_extension {
            candidates.push(path);
        }
    }
    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(candidates)
}

/// How closely a file stem matches a master marker. Lower ranks win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MarkerMatch {
    /// The whole stem or its last `_` segment equals a marker (`strings_en`).
    Exact,
    /// The language tag, region stripped, equals a marker (`strings_en-GB`).
    BaseTag,
    /// The stem merely contains a marker (`content_de`).
    Substring,
}

fn marker_match(path: &Path, stem: &str, markers: &[String]) -> Option<MarkerMatch> {
    let segment = stem.rsplit_once('_').map_or(stem, |(_, last)| last);
    if markers.iter().any(|m| m == stem || m == segment) {
        return Some(MarkerMatch::Exact);
    }
    let tag = tag_for(path);
    if markers.iter().any(|m| m == tag.as_str()) {
        return Some(MarkerMatch::BaseTag);
    }
    markers
        .iter()
        .any(|m| stem.contains(m.as_str()))
        .then_some(MarkerMatch::Substring)
}

/// Index of the best-ranked candidate; ties go to the first by file name.
fn pick_master(candidates: &[PathBuf], markers: &[String]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(index, path)| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            marker_match(path, &stem, markers).map(|rank| (rank, index))
        })
        .min()
        .map(|(_, index)| index)
}
