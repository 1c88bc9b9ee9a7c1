//! Strings, optionals, sequences and maps
//!
//! A zero-length sequence or map decodes to an empty container. Absence
//! is only expressed through `Option`, so "not supplied" and "supplied but
//! empty" stay distinct in both directions.

use super::{read_length, write_length, ByteReader, Codec, CodecError, CodecResult};
use std::collections::HashMap;
use std::hash::Hash;

impl Codec for String {
    fn write(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        write_length(self.len(), out)?;
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }

    fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let len = read_length(reader)?;
        let bytes = reader.take(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

impl<T: Codec> Codec for Option<T> {
    fn write(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        match self {
            None => {
                out.push(0);
                Ok(())
            }
            Some(value) => {
                out.push(1);
                value.write(out)
            }
        }
    }

    fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        match u8::read(reader)? {
            0 => Ok(None),
            1 => Ok(Some(T::read(reader)?)),
            other => Err(CodecError::InvalidPresence(other)),
        }
    }
}

// Vec<u8> goes through here too; a sequence of single bytes is byte-for-byte
// the same as the length-prefixed bytes encoding.
impl<T: Codec> Codec for Vec<T> {
    fn write(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        write_length(self.len(), out)?;
        for item in self {
            item.write(out)?;
        }
        Ok(())
    }

    fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let len = read_length(reader)?;
        // Bound the preallocation by what the input could possibly hold.
        let mut items = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            items.push(T::read(reader)?);
        }
        Ok(items)
    }
}

impl<K, V> Codec for HashMap<K, V>
where
    K: Codec + Eq + Hash,
    V: Codec,
{
    fn write(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        write_length(self.len(), out)?;
        for (key, value) in self {
            key.write(out)?;
            value.write(out)?;
        }
        Ok(())
    }

    fn read(reader: &mut ByteReader<'_>) -> CodecResult<Self> {
        let len = read_length(reader)?;
        let mut map = HashMap::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            let key = K::read(reader)?;
            let value = V::read(reader)?;
            if map.insert(key, value).is_some() {
                return Err(CodecError::DuplicateKey("map"));
            }
        }
        Ok(map)
    }
}
