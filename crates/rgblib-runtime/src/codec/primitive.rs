//! Fixed-width scalars
//!
//! Integers and floats are written big-endian at their natural width.
//! Booleans are one byte and decode strictly from `0` or `1`.

use super::{ByteReader, Codec, CodecError, CodecResult};

macro_rules! impl_codec_for_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Codec for $ty {
                fn write(&self, out: &mut Vec<u8>) -> CodecResult<()> {
                    out.extend_from_slice(&self.to_be_bytes());
                    Ok(())
                }

                fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
                    Ok(<$ty>::from_be_bytes(reader.take_array()?))
                }
            }
        )*
    };
}

impl_codec_for_number!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl Codec for bool {
    fn write(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        out.push(u8::from(*self));
        Ok(())
    }

    fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        match u8::read(reader)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }
}
