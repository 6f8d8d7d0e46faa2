//! Language tags derived from locale file names.

use std::{
    fmt::{Display, Formatter},
    path::Path,
};

use serde::Serialize;

/// A short lowercase language code such as `fr` or `pt`.
///
/// Tags are not checked against any list of known languages; whatever the
/// file name yields is handed to the translation provider as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        LanguageTag(tag.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for LanguageTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derives the target language of a locale file from its name.
///
/// With an underscore in the stem, the part after the last underscore is used
/// (`strings_pt-BR.json` → `pt`); otherwise the stem itself (`de.json` → `de`,
/// `fr-CA.json` → `fr`). Any hyphenated region suffix is dropped.
pub fn tag_for<P: AsRef<Path>>(path: P) -> LanguageTag {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    tag_for_stem(&stem)
}

pub(crate) fn tag_for_stem(stem: &str) -> LanguageTag {
    let code = match stem.rsplit_once('_') {
        Some((_, last)) => last,
        None => stem,
    };
    let base = code.split_once('-').map_or(code, |(base, _)| base);
    LanguageTag::new(base)
}
