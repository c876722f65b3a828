//! Canonical binary encoding for values crossing the boundary.
//!
//! Layout per logical type:
//!
//! | Type                  | Encoding                                         |
//! |-----------------------|--------------------------------------------------|
//! | `()`                  | nothing                                          |
//! | `bool`                | 1 byte, `0` or `1`                               |
//! | integers, floats      | fixed width, little-endian                       |
//! | `Vec<u8>`             | `u32` LE length, then the raw bytes              |
//! | `String`              | `u32` LE length, then UTF-8 bytes                |
//! | `Option<T>`           | `0` = absent, `1` = present followed by `T`      |
//!
//! Decoding goes through a [`Reader`] that bounds-checks every read, so a short
//! or corrupt buffer yields [`MalformedPayload`] instead of reading past its end.

use crate::error::MalformedPayload;

/// Result of encoding or decoding a wire value.
pub type WireResult<T> = std::result::Result<T, MalformedPayload>;

/// A type with a defined wire layout.
pub trait Marshal: Sized {
    /// Append the encoding of `self` to `out`.
    ///
    /// # Errors
    ///
    /// [`MalformedPayload::LengthOverflow`] when a sequence exceeds the
    /// 32-bit length prefix.
    fn encode(&self, out: &mut Vec<u8>) -> WireResult<()>;

    /// Read one value from the cursor.
    ///
    /// # Errors
    ///
    /// Any [`MalformedPayload`] the bytes violate.
    fn decode(reader: &mut Reader<'_>) -> WireResult<Self>;
}

/// Encode a value into a fresh buffer.
///
/// # Errors
///
/// See [`Marshal::encode`].
pub fn to_bytes<T: Marshal>(value: &T) -> WireResult<Vec<u8>> {
    let mut out = Vec::new();
    value.encode(&mut out)?;
    Ok(out)
}

/// Decode exactly one value. Leftover bytes are rejected.
///
/// # Errors
///
/// See [`Marshal::decode`]; also [`MalformedPayload::TrailingBytes`] if
/// bytes remain after the value.
pub fn from_bytes<T: Marshal>(buf: &[u8]) -> WireResult<T> {
    let mut reader = Reader::new(buf);
    let value = T::decode(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Bounds-checked cursor over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the beginning of `buf`.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume `n` bytes.
    ///
    /// # Errors
    ///
    /// [`MalformedPayload::Truncated`] if fewer than `n` bytes remain.
    pub fn take(&mut self, n: usize) -> WireResult<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(MalformedPayload::Truncated {
                needed: n,
                remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Consume a fixed-size array.
    ///
    /// # Errors
    ///
    /// [`MalformedPayload::Truncated`].
    pub fn take_array<const N: usize>(&mut self) -> WireResult<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    /// Consume a single byte.
    ///
    /// # Errors
    ///
    /// [`MalformedPayload::Truncated`] at the end of the buffer.
    pub fn take_u8(&mut self) -> WireResult<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Consume a `u32` length prefix followed by that many bytes.
    ///
    /// # Errors
    ///
    /// [`MalformedPayload::Truncated`] if the prefix or the bytes it announces
    /// are missing.
    pub fn take_prefixed(&mut self) -> WireResult<&'a [u8]> {
        let len = u32::from_le_bytes(self.take_array()?) as usize;
        self.take(len)
    }

    /// Succeed only if the whole buffer was consumed.
    ///
    /// # Errors
    ///
    /// [`MalformedPayload::TrailingBytes`].
    pub const fn finish(&self) -> WireResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(MalformedPayload::TrailingBytes(n)),
        }
    }
}

/// Append a `u32` length prefix followed by `bytes`.
///
/// # Errors
///
/// [`MalformedPayload::LengthOverflow`] if `bytes` is longer than
/// `u32::MAX`.
pub fn put_prefixed(out: &mut Vec<u8>, bytes: &[u8]) -> WireResult<()> {
    let len =
        u32::try_from(bytes.len()).map_err(|_| MalformedPayload::LengthOverflow(bytes.len()))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

macro_rules! marshal_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Marshal for $ty {
                fn encode(&self, out: &mut Vec<u8>) -> WireResult<()> {
                    out.extend_from_slice(&self.to_le_bytes());
                    Ok(())
                }

                fn decode(reader: &mut Reader<'_>) -> WireResult<Self> {
                    Ok(Self::from_le_bytes(reader.take_array()?))
                }
            }
        )*
    };
}

marshal_le!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Marshal for () {
    fn encode(&self, _out: &mut Vec<u8>) -> WireResult<()> {
        Ok(())
    }

    fn decode(_reader: &mut Reader<'_>) -> WireResult<Self> {
        Ok(())
    }
}

impl Marshal for bool {
    fn encode(&self, out: &mut Vec<u8>) -> WireResult<()> {
        out.push(u8::from(*self));
        Ok(())
    }

    fn decode(reader: &mut Reader<'_>) -> WireResult<Self> {
        match reader.take_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            tag => Err(MalformedPayload::InvalidTag { what: "bool", tag }),
        }
    }
}

impl Marshal for Vec<u8> {
    fn encode(&self, out: &mut Vec<u8>) -> WireResult<()> {
        put_prefixed(out, self)
    }

    fn decode(reader: &mut Reader<'_>) -> WireResult<Self> {
        Ok(reader.take_prefixed()?.to_vec())
    }
}

impl Marshal for String {
    fn encode(&self, out: &mut Vec<u8>) -> WireResult<()> {
        put_prefixed(out, self.as_bytes())
    }

    fn decode(reader: &mut Reader<'_>) -> WireResult<Self> {
        let bytes = reader.take_prefixed()?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| MalformedPayload::InvalidUtf8)
    }
}

impl<T: Marshal> Marshal for Option<T> {
    fn encode(&self, out: &mut Vec<u8>) -> WireResult<()> {
        match self {
            None => {
                out.push(0);
                Ok(())
            }
            Some(inner) => {
                out.push(1);
                inner.encode(out)
            }
        }
    }

    fn decode(reader: &mut Reader<'_>) -> WireResult<Self> {
        match reader.take_u8()? {
            0 => Ok(None),
            1 => T::decode(reader).map(Some),
            tag => Err(MalformedPayload::InvalidTag {
                what: "option",
                tag,
            }),
        }
    }
}
