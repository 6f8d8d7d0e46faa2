//! Traits for reading and writing locale files in langsync.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufRead, BufReader, Cursor, Write},
    path::{Path, PathBuf},
};

use crate::error::Error;

/// A trait for parsing and writing one locale file.
///
/// # Example
///
/// ```rust,no_run
/// use langsync::{Tree, traits::Parser};
/// let tree = Tree::read_from("locales/strings_fr.json")?;
/// tree.write_to("locales/strings_fr_copy.json")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// A leading byte order mark is detected and stripped, so UTF-8 files saved
    /// by editors that add a BOM (and UTF-16 files) decode like plain UTF-8.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        Self::from_reader(BufReader::new(decoder))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    ///
    /// The content is rendered in memory and written to a sibling temporary file
    /// that is then renamed over `path`, so the destination is either fully
    /// replaced or left as it was.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer)?;

        let temp_path = temporary_sibling(path);
        if let Err(err) = fs::write(&temp_path, &buffer) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::Io(err));
        }
        fs::rename(&temp_path, path).map_err(|err| {
            let _ = fs::remove_file(&temp_path);
            Error::Io(err)
        })
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".langsync.tmp");
    path.with_file_name(name)
}
