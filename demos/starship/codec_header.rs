// Primitive routines for the async stream flavor.
//
// Strings longer than 255 bytes are sent as the empty string.

use futures_util::stream::{Stream, StreamExt};

fn type_string_serialize(out: &mut Vec<u8>, string: &str) {
    match u8::try_from(string.len()) {
        Ok(len) => {
            out.push(len);
            out.extend_from_slice(string.as_bytes());
        }
        Err(_) => out.push(0),
    }
}

async fn type_string_deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<String, ()> {
    let size = buf.next().await.ok_or(())?;
    let mut bytes = Vec::with_capacity(size as usize);
    for _ in 0..size {
        bytes.push(buf.next().await.ok_or(())?);
    }
    String::from_utf8(bytes).or(Err(()))
}

async fn read_array<S: Stream<Item = u8> + Unpin, const N: usize>(buf: &mut S) -> Result<[u8; N], ()> {
    let mut bytes = [0u8; N];
    for byte in bytes.iter_mut() {
        *byte = buf.next().await.ok_or(())?;
    }
    Ok(bytes)
}

fn type_float_serialize(out: &mut Vec<u8>, float: &f32) {
    out.extend_from_slice(&float.to_be_bytes());
}

async fn type_float_deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<f32, ()> {
    Ok(f32::from_be_bytes(read_array(buf).await?))
}

fn type_u8_serialize(out: &mut Vec<u8>, ubyte: &u8) {
    out.push(*ubyte);
}

async fn type_u8_deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<u8, ()> {
    buf.next().await.ok_or(())
}

fn type_u16_serialize(out: &mut Vec<u8>, ushort: &u16) {
    out.extend_from_slice(&ushort.to_be_bytes());
}

async fn type_u16_deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<u16, ()> {
    Ok(u16::from_be_bytes(read_array(buf).await?))
}

fn type_u32_serialize(out: &mut Vec<u8>, uint: &u32) {
    out.extend_from_slice(&uint.to_be_bytes());
}

async fn type_u32_deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<u32, ()> {
    Ok(u32::from_be_bytes(read_array(buf).await?))
}

fn type_bool_serialize(out: &mut Vec<u8>, boolean: &bool) {
    out.push(u8::from(*boolean));
}

async fn type_bool_deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<bool, ()> {
    Ok(buf.next().await.ok_or(())? > 0)
}

fn type_float_pair_serialize(out: &mut Vec<u8>, pair: &(f32, f32)) {
    type_float_serialize(out, &pair.0);
    type_float_serialize(out, &pair.1);
}

async fn type_float_pair_deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<(f32, f32), ()> {
    Ok((type_float_deserialize(buf).await?, type_float_deserialize(buf).await?))
}
