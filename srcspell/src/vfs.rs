//! Byte-stream abstraction over dictionary data origins.
//!
//! The store does not mandate file-system storage: anything able to hand
//! out readable byte streams per path can back it, including in-memory
//! buffers for tests.

use memmap2::{Mmap, MmapOptions};
use std::fmt::Debug;
use std::io::{self, Read};
use std::path::Path;

/// Resolves paths to readable files.
pub trait Filesystem {
    /// The file handle type produced by this filesystem.
    type File: File;

    /// Opens the file at `path` for reading.
    fn open<P: AsRef<Path>>(&self, path: P) -> io::Result<Self::File>;
}

/// A readable byte stream of known length.
pub trait File: Read + Debug {
    /// Total length of the stream in bytes.
    fn len(&self) -> io::Result<u64>;

    /// Whether the stream is empty.
    fn is_empty(&self) -> io::Result<bool> {
        self.len().map(|x| x == 0)
    }

    /// Maps the whole stream into memory, when the backing store allows it.
    ///
    /// # Safety
    ///
    /// The mapping's contents are undefined if the underlying file is
    /// mutated while mapped.
    unsafe fn memory_map(&self) -> io::Result<Mmap>;
}

impl File for std::fs::File {
    fn len(&self) -> io::Result<u64> {
        self.metadata().map(|m| m.len())
    }

    unsafe fn memory_map(&self) -> io::Result<Mmap> {
        MmapOptions::new().map(self)
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fs;

impl Filesystem for Fs {
    type File = std::fs::File;

    #[inline(always)]
    fn open<P: AsRef<Path>>(&self, path: P) -> io::Result<Self::File> {
        std::fs::File::open(&path)
    }
}

pub mod memory {
    //! An in-memory filesystem serving registered byte buffers.

    use hashbrown::HashMap;
    use std::io::{self, Read};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Filesystem whose files are byte buffers registered up front.
    #[derive(Debug, Default, Clone)]
    pub struct MemoryFs {
        files: HashMap<PathBuf, Arc<[u8]>>,
    }

    impl MemoryFs {
        /// Creates an empty in-memory filesystem.
        pub fn new() -> MemoryFs {
            MemoryFs::default()
        }

        /// Registers `data` under `path`, replacing any previous buffer.
        pub fn register(&mut self, path: impl Into<PathBuf>, data: impl AsRef<[u8]>) {
            self.files.insert(path.into(), Arc::from(data.as_ref()));
        }
    }

    /// A read cursor over one registered buffer.
    #[derive(Debug)]
    pub struct MemoryFile {
        data: Arc<[u8]>,
        pos: usize,
    }

    impl Read for MemoryFile {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let remaining = &self.data[self.pos.min(self.data.len())..];
            let n = remaining.len().min(buf.len());
            buf[..n].copy_from_slice(&remaining[..n]);
            self.pos += n;
            Ok(n)
        }
    }

    impl super::File for MemoryFile {
        fn len(&self) -> io::Result<u64> {
            Ok(self.data.len() as u64)
        }

        unsafe fn memory_map(&self) -> io::Result<memmap2::Mmap> {
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "in-memory files cannot be mapped",
            ))
        }
    }

    impl super::Filesystem for MemoryFs {
        type File = MemoryFile;

        fn open<P: AsRef<Path>>(&self, path: P) -> io::Result<Self::File> {
            match self.files.get(path.as_ref()) {
                Some(data) => Ok(MemoryFile {
                    data: Arc::clone(data),
                    pos: 0,
                }),
                None => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} is not registered", path.as_ref().display()),
                )),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::vfs::{File, Filesystem};

        #[test]
        fn registered_buffers_read_back() {
            let mut fs = MemoryFs::new();
            fs.register("dict/en_US.aff", b"SET UTF-8\n");

            let mut file = fs.open("dict/en_US.aff").unwrap();
            assert_eq!(file.len().unwrap(), 10);

            let mut contents = String::new();
            file.read_to_string(&mut contents).unwrap();
            assert_eq!(contents, "SET UTF-8\n");
        }

        #[test]
        fn unregistered_paths_are_not_found() {
            let fs = MemoryFs::new();
            let err = fs.open("nope.dic").unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::NotFound);
        }
    }
}
