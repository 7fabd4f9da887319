//! Byte streams
//!
//! A [`BinaryStream`] is a positioned, seekable sequence of bytes that must be
//! opened before use. Writes at the current position overwrite existing bytes
//! and extend the stream past its end.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{StreamError, StreamResult};

pub trait BinaryStream {
    fn open(&mut self) -> StreamResult<()>;

    fn close(&mut self) -> StreamResult<()>;

    fn is_open(&self) -> bool;

    /// Fill `buf` from the current position
    ///
    /// Fails with `UnexpectedEof` without consuming anything when fewer than
    /// `buf.len()` bytes remain.
    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()>;

    fn write_all(&mut self, data: &[u8]) -> StreamResult<()>;

    /// Move back to the first byte
    fn rewind(&mut self) -> StreamResult<()>;

    /// True when the position is at or past the last byte
    fn eof(&self) -> StreamResult<bool>;

    fn position(&self) -> u64;

    fn len(&self) -> StreamResult<u64>;
}

/// A stream over an in-memory buffer
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    binary: Vec<u8>,
    position: usize,
    open: bool,
}

impl MemoryStream {
    /// Create an empty, closed stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a closed stream over existing bytes
    pub fn from_bytes(binary: impl Into<Vec<u8>>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.binary
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.binary
    }

    fn ensure_open(&self) -> StreamResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(StreamError::NotOpen)
        }
    }
}

impl BinaryStream for MemoryStream {
    fn open(&mut self) -> StreamResult<()> {
        if self.open {
            return Err(StreamError::AlreadyOpen);
        }
        self.open = true;
        self.position = 0;
        Ok(())
    }

    fn close(&mut self) -> StreamResult<()> {
        self.ensure_open()?;
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        self.ensure_open()?;
        let available = self.binary.len().saturating_sub(self.position);
        if available < buf.len() {
            return Err(StreamError::UnexpectedEof {
                requested: buf.len(),
                available,
            });
        }
        let end = self.position + buf.len();
        buf.copy_from_slice(&self.binary[self.position..end]);
        self.position = end;
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> StreamResult<()> {
        self.ensure_open()?;
        let end = self.position + data.len();
        if end > self.binary.len() {
            self.binary.resize(end, 0);
        }
        self.binary[self.position..end].copy_from_slice(data);
        self.position = end;
        Ok(())
    }

    fn rewind(&mut self) -> StreamResult<()> {
        self.ensure_open()?;
        self.position = 0;
        Ok(())
    }

    fn eof(&self) -> StreamResult<bool> {
        self.ensure_open()?;
        Ok(self.position >= self.binary.len())
    }

    fn position(&self) -> u64 {
        self.position as u64
    }

    fn len(&self) -> StreamResult<u64> {
        Ok(self.binary.len() as u64)
    }
}

/// A stream over a file, created on open if missing
#[derive(Debug)]
pub struct FileStream {
    path: PathBuf,
    file: Option<File>,
    position: u64,
}

impl FileStream {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
            position: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> StreamResult<&mut File> {
        self.file.as_mut().ok_or(StreamError::NotOpen)
    }
}

impl BinaryStream for FileStream {
    fn open(&mut self) -> StreamResult<()> {
        if self.file.is_some() {
            return Err(StreamError::AlreadyOpen);
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        log::trace!("opened file stream {}", self.path.display());
        self.file = Some(file);
        self.position = 0;
        Ok(())
    }

    fn close(&mut self) -> StreamResult<()> {
        let mut file = self.file.take().ok_or(StreamError::NotOpen)?;
        file.flush()?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        let available = self.len()?.saturating_sub(self.position);
        if available < buf.len() as u64 {
            return Err(StreamError::UnexpectedEof {
                requested: buf.len(),
                available: usize::try_from(available).unwrap_or(usize::MAX),
            });
        }
        self.file()?.read_exact(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> StreamResult<()> {
        self.file()?.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn rewind(&mut self) -> StreamResult<()> {
        self.file()?.seek(SeekFrom::Start(0))?;
        self.position = 0;
        Ok(())
    }

    fn eof(&self) -> StreamResult<bool> {
        Ok(self.position >= self.len()?)
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn len(&self) -> StreamResult<u64> {
        let file = self.file.as_ref().ok_or(StreamError::NotOpen)?;
        Ok(file.metadata()?.len())
    }
}
