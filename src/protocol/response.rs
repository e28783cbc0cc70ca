//! Response buffers.
//!
//! A response is an opaque byte string that only means something to the
//! message it answers. Most answers are a single little-endian `i32` or a
//! short index list, so the bytes live inline in a `SmallVec`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{HarnessError, Result};

/// Encoded answer to one response-capable message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Response {
    bytes: SmallVec<[u8; 16]>,
}

impl Response {
    /// Wrap raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: SmallVec::from_slice(bytes),
        }
    }

    /// A single little-endian `i32`.
    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        Self::from_bytes(&value.to_le_bytes())
    }

    /// A count-prefixed byte list of candidate indices.
    pub fn index_list(indices: &[usize]) -> Result<Self> {
        let mut bytes = SmallVec::with_capacity(indices.len() + 1);
        bytes.push(to_byte(indices.len())?);
        for &i in indices {
            bytes.push(to_byte(i)?);
        }
        Ok(Self { bytes })
    }

    /// Append one byte.
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Append a little-endian `u16`.
    pub fn push_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// The raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Interpret a 4-byte response as an `i32`.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        let raw: [u8; 4] = self.bytes.as_slice().try_into().ok()?;
        Some(i32::from_le_bytes(raw))
    }

    /// Number of bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self {
            bytes: SmallVec::new(),
        }
    }
}

impl AsRef<[u8]> for Response {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&[u8]> for Response {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Response {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: SmallVec::from_vec(bytes),
        }
    }
}

pub(crate) fn to_byte(value: usize) -> Result<u8> {
    u8::try_from(value)
        .map_err(|_| HarnessError::InvalidResponse(format!("{} does not fit in one byte", value)))
}
