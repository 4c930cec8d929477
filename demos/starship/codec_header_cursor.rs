// Primitive routines for the cursor flavor.
//
// Every read is bounds checked against `buf`. Strings longer than 255
// bytes are sent as the empty string.

fn take<'a>(buf: &'a [u8], index: &mut usize, size: usize) -> Result<&'a [u8], ()> {
    let end = index.checked_add(size).ok_or(())?;
    let bytes = buf.get(*index..end).ok_or(())?;
    *index = end;
    Ok(bytes)
}

fn read_array<const N: usize>(buf: &[u8], index: &mut usize) -> Result<[u8; N], ()> {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(take(buf, index, N)?);
    Ok(bytes)
}

fn type_string_serialize(out: &mut Vec<u8>, string: &str) {
    match u8::try_from(string.len()) {
        Ok(len) => {
            out.push(len);
            out.extend_from_slice(string.as_bytes());
        }
        Err(_) => out.push(0),
    }
}

fn type_string_deserialize(buf: &[u8], index: &mut usize) -> Result<String, ()> {
    let size = take(buf, index, 1)?[0] as usize;
    let bytes = take(buf, index, size)?;
    String::from_utf8(bytes.to_vec()).or(Err(()))
}

fn type_float_serialize(out: &mut Vec<u8>, float: &f32) {
    out.extend_from_slice(&float.to_be_bytes());
}

fn type_float_deserialize(buf: &[u8], index: &mut usize) -> Result<f32, ()> {
    Ok(f32::from_be_bytes(read_array(buf, index)?))
}

fn type_u8_serialize(out: &mut Vec<u8>, ubyte: &u8) {
    out.push(*ubyte);
}

fn type_u8_deserialize(buf: &[u8], index: &mut usize) -> Result<u8, ()> {
    Ok(take(buf, index, 1)?[0])
}

fn type_u16_serialize(out: &mut Vec<u8>, ushort: &u16) {
    out.extend_from_slice(&ushort.to_be_bytes());
}

fn type_u16_deserialize(buf: &[u8], index: &mut usize) -> Result<u16, ()> {
    Ok(u16::from_be_bytes(read_array(buf, index)?))
}

fn type_u32_serialize(out: &mut Vec<u8>, uint: &u32) {
    out.extend_from_slice(&uint.to_be_bytes());
}

fn type_u32_deserialize(buf: &[u8], index: &mut usize) -> Result<u32, ()> {
    Ok(u32::from_be_bytes(read_array(buf, index)?))
}

fn type_bool_serialize(out: &mut Vec<u8>, boolean: &bool) {
    out.push(u8::from(*boolean));
}

fn type_bool_deserialize(buf: &[u8], index: &mut usize) -> Result<bool, ()> {
    Ok(take(buf, index, 1)?[0] > 0)
}

fn type_float_pair_serialize(out: &mut Vec<u8>, pair: &(f32, f32)) {
    type_float_serialize(out, &pair.0);
    type_float_serialize(out, &pair.1);
}

fn type_float_pair_deserialize(buf: &[u8], index: &mut usize) -> Result<(f32, f32), ()> {
    let bytes: [u8; 8] = read_array(buf, index)?;
    let (a, b) = bytes.split_at(4);
    let mut first = [0u8; 4];
    let mut second = [0u8; 4];
    first.copy_from_slice(a);
    second.copy_from_slice(b);
    Ok((f32::from_be_bytes(first), f32::from_be_bytes(second)))
}
