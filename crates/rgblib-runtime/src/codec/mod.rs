//! Wire codec for values crossing the native boundary
//!
//! Every value is written in a fixed big-endian grammar:
//! - integers and floats use their natural fixed-width representation
//! - booleans and presence flags are a single byte, `0` or `1`
//! - strings, sequences and maps carry a 4-byte signed length prefix
//! - tagged unions carry a 4-byte discriminant starting at `1`
//! - records are the concatenation of their fields
//!
//! Decoding a top-level value must consume the input exactly. Leftover
//! bytes mean the two sides disagree about the schema.

pub mod composite;
pub mod primitive;

use thiserror::Error;

/// Errors raised while encoding or decoding the wire grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("negative length prefix: {0}")]
    NegativeLength(i32),

    #[error("length {0} does not fit in a 32-bit length prefix")]
    LengthOverflow(usize),

    #[error("unexpected byte for boolean: {0}")]
    InvalidBool(u8),

    #[error("unexpected presence flag for optional value: {0}")]
    InvalidPresence(u8),

    #[error("invalid discriminant {value} for {type_name}")]
    InvalidDiscriminant { type_name: &'static str, value: i32 },

    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("duplicate key while decoding {0}")]
    DuplicateKey(&'static str),

    #[error("junk remaining in buffer after lifting: {0} bytes")]
    JunkRemaining(usize),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// A value with a wire representation
///
/// `read` must consume exactly the bytes `write` produced for an equal value.
pub trait Codec: Sized {
    /// Append the encoded form of `self` to `out`
    fn write(&self, out: &mut Vec<u8>) -> CodecResult<()>;

    /// Decode one value from the front of `reader`
    fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self>;
}

/// Cursor over an encoded byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Number of bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Consume the next `len` bytes
    pub fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::UnexpectedEof {
                needed: len,
                remaining,
            });
        }
        let start = self.position;
        self.position += len;
        Ok(&self.bytes[start..self.position])
    }

    /// Consume a fixed-size array
    pub fn take_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    /// Fail unless every byte has been consumed
    pub fn finish(self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            left => Err(CodecError::JunkRemaining(left)),
        }
    }
}

/// Encode a value into a fresh byte vector
pub fn encode<T: Codec>(value: &T) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    value.write(&mut out)?;
    Ok(out)
}

/// Decode a value that must occupy all of `bytes`
pub fn decode<T: Codec>(bytes: &[u8]) -> CodecResult<T> {
    let mut reader = ByteReader::new(bytes);
    let value = T::read(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Write a 4-byte signed length prefix
pub(crate) fn write_length(len: usize, out: &mut Vec<u8>) -> CodecResult<()> {
    let len = i32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
    out.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

/// Read a 4-byte signed length prefix, rejecting negative values
pub(crate) fn read_length(reader: &mut ByteReader<'_>) -> CodecResult<usize> {
    let len = i32::from_be_bytes(reader.take_array()?);
    usize::try_from(len).map_err(|_| CodecError::NegativeLength(len))
}

/// Implement [`Codec`] for a record as the concatenation of its fields
///
/// ```ignore
/// record_codec!(Balance { settled: u64, future: u64, spendable: u64 });
/// ```
#[macro_export]
macro_rules! record_codec {
    ($name:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::codec::Codec for $name {
            fn write(&self, out: &mut Vec<u8>) -> $crate::codec::CodecResult<()> {
                $( $crate::codec::Codec::write(&self.$field, out)?; )*
                Ok(())
            }

            fn read(
                reader: &mut $crate::codec::ByteReader<'_>,
            ) -> $crate::codec::CodecResult<Self> {
                Ok($name {
                    $( $field: <$fty as $crate::codec::Codec>::read(reader)?, )*
                })
            }
        }
    };
}

/// Implement [`Codec`] for a tagged union
///
/// Each variant is listed with its discriminant and, when it carries data,
/// its named fields in declared order.
///
/// ```ignore
/// tagged_union_codec!(Assignment {
///     1 => Fungible { amount: u64 },
///     2 => NonFungible,
/// });
/// ```
#[macro_export]
macro_rules! tagged_union_codec {
    ($name:ident {
        $($tag:literal => $variant:ident $({ $($field:ident : $fty:ty),* $(,)? })?),+ $(,)?
    }) => {
        impl $crate::codec::Codec for $name {
            fn write(&self, out: &mut Vec<u8>) -> $crate::codec::CodecResult<()> {
                match self {
                    $(
                        $name::$variant $({ $($field),* })? => {
                            $crate::codec::Codec::write(&($tag as i32), out)?;
                            $($( $crate::codec::Codec::write($field, out)?; )*)?
                        }
                    )+
                }
                Ok(())
            }

            fn read(
                reader: &mut $crate::codec::ByteReader<'_>,
            ) -> $crate::codec::CodecResult<Self> {
                let tag = <i32 as $crate::codec::Codec>::read(reader)?;
                match tag {
                    $(
                        $tag => Ok($name::$variant $({
                            $( $field: <$fty as $crate::codec::Codec>::read(reader)?, )*
                        })?),
                    )+
                    value => Err($crate::codec::CodecError::InvalidDiscriminant {
                        type_name: stringify!($name),
                        value,
                    }),
                }
            }
        }
    };
}

/// Declare a record and its [`Codec`] from one field list
///
/// Attributes and visibility pass through to the generated struct; the wire
/// layout follows the declaration order.
///
/// ```ignore
/// record! {
///     #[derive(Debug, Clone)]
///     pub struct Outpoint {
///         pub txid: String,
///         pub vout: u32,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $fty, )*
        }

        $crate::record_codec!($name { $($field: $fty),* });
    };
}

/// Declare an enum and its tagged-union [`Codec`] from one variant list
///
/// ```ignore
/// tagged_union! {
///     #[derive(Debug, Clone, Copy)]
///     pub enum TransferKind {
///         1 => Issuance,
///         2 => ReceiveBlind,
///     }
/// }
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $tag:literal => $variant:ident $({ $($field:ident : $fty:ty),* $(,)? })?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $variant $({ $($field: $fty),* })?, )+
        }

        $crate::tagged_union_codec!($name {
            $( $tag => $variant $({ $($field: $fty),* })? ),+
        });
    };
}
