//! Primitive reads and writes over a [`BinaryStream`]
//!
//! Every primitive written by [`BinaryStreamAccess`] is read back
//! bit-for-bit by the matching read method. Multi-byte numbers are
//! little-endian; strings and binary data carry a 2-byte length prefix.

use crate::error::{AccessResult, BinaryStreamAccessError, Primitive};
use crate::stream::BinaryStream;

#[derive(Debug)]
pub struct BinaryStreamAccess<S> {
    stream: S,
}

impl<S: BinaryStream> BinaryStreamAccess<S> {
    /// Wrap an open stream
    ///
    /// The stream is not opened here; operating on a closed stream fails
    /// with [`BinaryStreamAccessError::NotOpen`].
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    fn read_array<const N: usize>(&mut self, primitive: Primitive) -> AccessResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.stream
            .read_exact(&mut buf)
            .map_err(|e| BinaryStreamAccessError::read(primitive, e))?;
        Ok(buf)
    }

    fn write_bytes(&mut self, primitive: Primitive, bytes: &[u8]) -> AccessResult<()> {
        self.stream
            .write_all(bytes)
            .map_err(|e| BinaryStreamAccessError::write(primitive, e))
    }

    fn read_length_prefixed(&mut self, primitive: Primitive) -> AccessResult<Vec<u8>> {
        let len = u16::from_le_bytes(self.read_array::<2>(primitive)?);
        let mut buf = vec![0u8; len as usize];
        self.stream
            .read_exact(&mut buf)
            .map_err(|e| BinaryStreamAccessError::read(primitive, e))?;
        Ok(buf)
    }

    fn write_length_prefixed(&mut self, primitive: Primitive, bytes: &[u8]) -> AccessResult<()> {
        let len = u16::try_from(bytes.len()).map_err(|_| BinaryStreamAccessError::TooLong {
            primitive,
            len: bytes.len(),
        })?;
        self.write_bytes(primitive, &len.to_le_bytes())?;
        self.write_bytes(primitive, bytes)
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn read_tiny_int(&mut self) -> AccessResult<u8> {
        let [b] = self.read_array::<1>(Primitive::TinyInt)?;
        Ok(b)
    }

    pub fn read_short(&mut self) -> AccessResult<u16> {
        Ok(u16::from_le_bytes(self.read_array(Primitive::Short)?))
    }

    pub fn read_integer(&mut self) -> AccessResult<i32> {
        Ok(i32::from_le_bytes(self.read_array(Primitive::Integer)?))
    }

    pub fn read_float(&mut self) -> AccessResult<f64> {
        Ok(f64::from_le_bytes(self.read_array(Primitive::Float)?))
    }

    /// Any non-zero byte reads as `true`
    pub fn read_boolean(&mut self) -> AccessResult<bool> {
        let [b] = self.read_array::<1>(Primitive::Boolean)?;
        Ok(b != 0)
    }

    pub fn read_string(&mut self) -> AccessResult<String> {
        let bytes = self.read_length_prefixed(Primitive::String)?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn read_binary(&mut self) -> AccessResult<Vec<u8>> {
        self.read_length_prefixed(Primitive::Binary)
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    pub fn write_tiny_int(&mut self, value: u8) -> AccessResult<()> {
        self.write_bytes(Primitive::TinyInt, &[value])
    }

    pub fn write_short(&mut self, value: u16) -> AccessResult<()> {
        self.write_bytes(Primitive::Short, &value.to_le_bytes())
    }

    pub fn write_integer(&mut self, value: i32) -> AccessResult<()> {
        self.write_bytes(Primitive::Integer, &value.to_le_bytes())
    }

    pub fn write_float(&mut self, value: f64) -> AccessResult<()> {
        self.write_bytes(Primitive::Float, &value.to_le_bytes())
    }

    pub fn write_boolean(&mut self, value: bool) -> AccessResult<()> {
        self.write_bytes(Primitive::Boolean, &[u8::from(value)])
    }

    pub fn write_string(&mut self, value: &str) -> AccessResult<()> {
        self.write_length_prefixed(Primitive::String, value.as_bytes())
    }

    pub fn write_binary(&mut self, value: &[u8]) -> AccessResult<()> {
        self.write_length_prefixed(Primitive::Binary, value)
    }
}
