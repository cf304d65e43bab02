//! Чтение little-endian полей по абсолютному смещению.
//!
//! Все функции возвращают `None`, если поле не помещается в буфер, и никогда
//! не читают за его пределами.

use byteorder::{ByteOrder, LittleEndian};

fn field(
    buf: &[u8],
    off: usize,
    width: usize,
) -> Option<&[u8]> {
    let end = off.checked_add(width)?;
    buf.get(off..end)
}

pub fn read_u16_le(
    buf: &[u8],
    off: usize,
) -> Option<u16> {
    field(buf, off, 2).map(LittleEndian::read_u16)
}

pub fn read_i16_le(
    buf: &[u8],
    off: usize,
) -> Option<i16> {
    field(buf, off, 2).map(LittleEndian::read_i16)
}

pub fn read_u32_le(
    buf: &[u8],
    off: usize,
) -> Option<u32> {
    field(buf, off, 4).map(LittleEndian::read_u32)
}

pub fn read_i32_le(
    buf: &[u8],
    off: usize,
) -> Option<i32> {
    field(buf, off, 4).map(LittleEndian::read_i32)
}

pub fn read_f32_le(
    buf: &[u8],
    off: usize,
) -> Option<f32> {
    field(buf, off, 4).map(LittleEndian::read_f32)
}
