//! Where dictionary data comes from.

use std::io::{ErrorKind, Read};
use std::path::PathBuf;

use smol_str::SmolStr;
use thiserror::Error;

use crate::vfs::{self, File, Filesystem};

/// Error opening or decoding the data behind one language's dictionary.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The affix or word-list resource could not be read.
    #[error("failed to read the {resource} for {language}: {source}")]
    Io {
        /// Language tag the resource belongs to.
        language: SmolStr,
        /// Which of the two resources failed.
        resource: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The resource was not valid UTF-8.
    #[error("the {resource} for {language} is not valid UTF-8")]
    Utf8 {
        /// Language tag the resource belongs to.
        language: SmolStr,
        /// Which of the two resources was malformed.
        resource: &'static str,
    },
}

/// Dictionary text, memory-mapped when the origin allows it.
pub(crate) enum SourceText {
    Mapped(memmap2::Mmap),
    Owned(String),
}

impl SourceText {
    fn as_str(&self) -> &str {
        match self {
            // UTF-8 was validated when the mapping was created
            SourceText::Mapped(map) => unsafe { std::str::from_utf8_unchecked(map) },
            SourceText::Owned(text) => text,
        }
    }
}

/// The two text resources a Hunspell dictionary is compiled from.
pub struct DictionaryData {
    pub(crate) affix: SourceText,
    pub(crate) word_list: SourceText,
}

impl DictionaryData {
    /// The affix ruleset.
    pub fn affix(&self) -> &str {
        self.affix.as_str()
    }

    /// The word list.
    pub fn word_list(&self) -> &str {
        self.word_list.as_str()
    }
}

/// Supplies the affix and word-list resources for a language tag.
///
/// The store is agnostic to origin: anything that can produce the two
/// byte streams qualifies.
pub trait DictionarySource: Send + Sync {
    /// Opens both resources for `language`.
    fn open(&self, language: &str) -> Result<DictionaryData, SourceError>;
}

/// `<root>/<language>.aff` + `<root>/<language>.dic` on a [`Filesystem`].
pub struct FsDictionarySource<F: Filesystem = vfs::Fs> {
    root: PathBuf,
    fs: F,
}

impl FsDictionarySource<vfs::Fs> {
    /// Source reading from `root` on the real filesystem.
    pub fn new(root: impl Into<PathBuf>) -> FsDictionarySource {
        FsDictionarySource {
            root: root.into(),
            fs: vfs::Fs,
        }
    }
}

impl<F: Filesystem> FsDictionarySource<F> {
    /// Source reading from `root` on an arbitrary filesystem.
    pub fn with_filesystem(root: impl Into<PathBuf>, fs: F) -> FsDictionarySource<F> {
        FsDictionarySource {
            root: root.into(),
            fs,
        }
    }

    fn read(
        &self,
        language: &str,
        extension: &str,
        resource: &'static str,
    ) -> Result<SourceText, SourceError> {
        let path = self.root.join(format!("{}.{}", language, extension));
        let mut file = self.fs.open(&path).map_err(|source| SourceError::Io {
            language: SmolStr::new(language),
            resource,
            source,
        })?;

        // Map when the backing store allows it, stream otherwise.
        if let Ok(map) = unsafe { file.memory_map() } {
            if std::str::from_utf8(&map).is_err() {
                return Err(SourceError::Utf8 {
                    language: SmolStr::new(language),
                    resource,
                });
            }
            return Ok(SourceText::Mapped(map));
        }

        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|source| match source.kind() {
                ErrorKind::InvalidData => SourceError::Utf8 {
                    language: SmolStr::new(language),
                    resource,
                },
                _ => SourceError::Io {
                    language: SmolStr::new(language),
                    resource,
                    source,
                },
            })?;
        Ok(SourceText::Owned(text))
    }
}

impl<F> DictionarySource for FsDictionarySource<F>
where
    F: Filesystem + Send + Sync,
{
    fn open(&self, language: &str) -> Result<DictionaryData, SourceError> {
        Ok(DictionaryData {
            affix: self.read(language, "aff", "affix ruleset")?,
            word_list: self.read(language, "dic", "word list")?,
        })
    }
}
