//! Primitive byte layouts.
//!
//! These mirror the header routines the generated code calls
//! (`type_<kind>_serialize` / `type_<kind>_deserialize`). Multi-byte
//! numbers are big-endian; strings are one length byte plus UTF-8 bytes.

use futures_util::stream::{Stream, StreamExt};
use wireforge_schema::Primitive;

use crate::{CodecError, Value};

pub(crate) fn write(kind: Primitive, value: &Value, out: &mut Vec<u8>) -> Result<(), CodecError> {
    match (kind, value) {
        (Primitive::String, Value::String(s)) => {
            let len = u8::try_from(s.len()).map_err(|_| CodecError::StringTooLong(s.len()))?;
            out.push(len);
            out.extend_from_slice(s.as_bytes());
        }
        (Primitive::Float, Value::Float(v)) => out.extend_from_slice(&v.to_be_bytes()),
        (Primitive::U8, Value::U8(v)) => out.push(*v),
        (Primitive::U16, Value::U16(v)) => out.extend_from_slice(&v.to_be_bytes()),
        (Primitive::U32, Value::U32(v)) => out.extend_from_slice(&v.to_be_bytes()),
        (Primitive::Bool, Value::Bool(v)) => out.push(u8::from(*v)),
        (Primitive::FloatPair, Value::FloatPair(a, b)) => {
            out.extend_from_slice(&a.to_be_bytes());
            out.extend_from_slice(&b.to_be_bytes());
        }
        (kind, value) => {
            return Err(CodecError::FieldMismatch {
                expected: kind.to_string(),
                found: value.kind(),
            })
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Cursor reads
// ---------------------------------------------------------------------------

pub(crate) fn read_byte(buf: &[u8], index: &mut usize) -> Result<u8, CodecError> {
    let byte = *buf.get(*index).ok_or(CodecError::UnexpectedEnd)?;
    *index += 1;
    Ok(byte)
}

fn read_array<const N: usize>(buf: &[u8], index: &mut usize) -> Result<[u8; N], CodecError> {
    let end = index.checked_add(N).ok_or(CodecError::UnexpectedEnd)?;
    let bytes = buf.get(*index..end).ok_or(CodecError::UnexpectedEnd)?;
    *index = end;
    let mut array = [0u8; N];
    array.copy_from_slice(bytes);
    Ok(array)
}

/// Reads one `kind` at `index`. A fixed-size value that does not fit in
/// the rest of `buf` fails without moving `index`.
pub(crate) fn read(kind: Primitive, buf: &[u8], index: &mut usize) -> Result<Value, CodecError> {
    if let Some(size) = kind.fixed_size() {
        if buf.len().saturating_sub(*index) < size {
            return Err(CodecError::UnexpectedEnd);
        }
    }
    Ok(match kind {
        Primitive::String => {
            let len = read_byte(buf, index)? as usize;
            let end = *index + len;
            let bytes = buf.get(*index..end).ok_or(CodecError::UnexpectedEnd)?;
            *index = end;
            Value::String(String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)?)
        }
        Primitive::Float => Value::Float(f32::from_be_bytes(read_array(buf, index)?)),
        Primitive::U8 => Value::U8(read_byte(buf, index)?),
        Primitive::U16 => Value::U16(u16::from_be_bytes(read_array(buf, index)?)),
        Primitive::U32 => Value::U32(u32::from_be_bytes(read_array(buf, index)?)),
        Primitive::Bool => Value::Bool(read_byte(buf, index)? > 0),
        Primitive::FloatPair => {
            let a = f32::from_be_bytes(read_array(buf, index)?);
            let b = f32::from_be_bytes(read_array(buf, index)?);
            Value::FloatPair(a, b)
        }
    })
}

// ---------------------------------------------------------------------------
// Stream reads
// ---------------------------------------------------------------------------

pub(crate) async fn next_byte<S>(stream: &mut S) -> Result<u8, CodecError>
where
    S: Stream<Item = u8> + Unpin,
{
    stream.next().await.ok_or(CodecError::UnexpectedEnd)
}

async fn next_array<S, const N: usize>(stream: &mut S) -> Result<[u8; N], CodecError>
where
    S: Stream<Item = u8> + Unpin,
{
    let mut array = [0u8; N];
    for slot in array.iter_mut() {
        *slot = next_byte(stream).await?;
    }
    Ok(array)
}

pub(crate) async fn read_async<S>(kind: Primitive, stream: &mut S) -> Result<Value, CodecError>
where
    S: Stream<Item = u8> + Unpin,
{
    Ok(match kind {
        Primitive::String => {
            let len = next_byte(stream).await?;
            let mut bytes = Vec::with_capacity(len as usize);
            for _ in 0..len {
                bytes.push(next_byte(stream).await?);
            }
            Value::String(String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?)
        }
        Primitive::Float => Value::Float(f32::from_be_bytes(next_array(stream).await?)),
        Primitive::U8 => Value::U8(next_byte(stream).await?),
        Primitive::U16 => Value::U16(u16::from_be_bytes(next_array(stream).await?)),
        Primitive::U32 => Value::U32(u32::from_be_bytes(next_array(stream).await?)),
        Primitive::Bool => Value::Bool(next_byte(stream).await? > 0),
        Primitive::FloatPair => {
            let a = f32::from_be_bytes(next_array(stream).await?);
            let b = f32::from_be_bytes(next_array(stream).await?);
            Value::FloatPair(a, b)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_is_big_endian() {
        let mut out = Vec::new();
        write(Primitive::U16, &Value::U16(0x0102), &mut out).unwrap();
        assert_eq!(out, vec![0x01, 0x02]);
    }

    #[test]
    fn test_string_is_length_framed() {
        let mut out = Vec::new();
        write(Primitive::String, &Value::from("hi"), &mut out).unwrap();
        assert_eq!(out, vec![2, b'h', b'i']);
    }

    #[test]
    fn test_string_too_long_is_rejected() {
        let long = "x".repeat(256);
        let mut out = Vec::new();
        let err = write(Primitive::String, &Value::from(long), &mut out).unwrap_err();
        assert_eq!(err, CodecError::StringTooLong(256));
    }

    #[test]
    fn test_truncated_u32_fails() {
        let mut index = 0;
        let err = read(Primitive::U32, &[0, 0, 1], &mut index).unwrap_err();
        assert_eq!(err, CodecError::UnexpectedEnd);
    }

    #[test]
    fn test_bool_nonzero_is_true() {
        let mut index = 0;
        assert_eq!(read(Primitive::Bool, &[7], &mut index).unwrap(), Value::Bool(true));
        assert_eq!(index, 1);
    }

    #[test]
    fn test_float_pair_is_eight_bytes() {
        let mut out = Vec::new();
        write(Primitive::FloatPair, &Value::FloatPair(1.5, -2.0), &mut out).unwrap();
        assert_eq!(out.len(), 8);

        let mut index = 0;
        assert_eq!(read(Primitive::FloatPair, &out, &mut index).unwrap(), Value::FloatPair(1.5, -2.0));
        assert_eq!(index, 8);
    }

    #[test]
    fn test_truncated_fixed_size_leaves_index() {
        for kind in Primitive::ALL {
            let Some(size) = kind.fixed_size() else { continue };
            let buf = vec![0u8; size + 1];
            let mut index = 2;
            assert_eq!(read(kind, &buf, &mut index), Err(CodecError::UnexpectedEnd), "{kind}");
            assert_eq!(index, 2, "{kind}");
        }
    }

    #[test]
    fn test_mismatched_value_is_rejected() {
        let mut out = Vec::new();
        let err = write(Primitive::U8, &Value::Bool(true), &mut out).unwrap_err();
        assert!(matches!(err, CodecError::FieldMismatch { found: "bool", .. }));
    }
}
