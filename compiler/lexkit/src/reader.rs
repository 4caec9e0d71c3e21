//! Input sources.
//!
//! A lexer reads its whole source up front. [`SourceReader`] is any
//! [`Read`] that may also know the name of what it reads; the name ends up in
//! every token's [`Position`](crate::Position).

use std::fs::File;
use std::io::{self, BufReader, Read, Stdin};
use std::path::Path;

/// A readable source that may carry a display name.
pub trait SourceReader: Read {
    /// Name to tag positions with, if the source has one.
    fn source_name(&self) -> Option<&str> {
        None
    }
}

impl SourceReader for &[u8] {}

impl<T: AsRef<[u8]>> SourceReader for io::Cursor<T> {}

/// Files opened directly carry no path; use [`NamedReader::open`] to keep it.
impl SourceReader for File {}

impl SourceReader for Stdin {
    fn source_name(&self) -> Option<&str> {
        Some("<stdin>")
    }
}

impl<R: SourceReader> SourceReader for BufReader<R> {
    fn source_name(&self) -> Option<&str> {
        self.get_ref().source_name()
    }
}

impl<R: SourceReader + ?Sized> SourceReader for &mut R {
    fn source_name(&self) -> Option<&str> {
        (**self).source_name()
    }
}

/// Attaches a name to any reader.
#[derive(Debug)]
pub struct NamedReader<R> {
    name: String,
    inner: R,
}

impl<R: Read> NamedReader<R> {
    pub fn new(name: impl Into<String>, inner: R) -> Self {
        NamedReader {
            name: name.into(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl NamedReader<File> {
    /// Open a file, naming it by its path.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(NamedReader::new(path.display().to_string(), file))
    }
}

impl<R: Read> Read for NamedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read> SourceReader for NamedReader<R> {
    fn source_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
