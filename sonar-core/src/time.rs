//! Время кадров.
//!
//! Абсолютная база времени (секунды Unix) читается один раз из первого
//! физического кадра файла, даже если этот кадр потом будет отбракован.
//! Каждый кадр несёт собственное смещение в миллисекундах от этой базы;
//! смещения не накапливаются от кадра к кадру.

use chrono::{DateTime, TimeDelta, Utc};
use sonar_types::{FormatVariant, FILE_HEADER_SIZE};

use crate::binary::read_u32_le;

/// Смещение поля базы времени от начала буфера.
pub fn time_base_offset(variant: FormatVariant) -> usize {
    FILE_HEADER_SIZE + variant.layout().time_base
}

/// База времени файла, если буфер достаточно длинный, чтобы её прочитать.
pub fn resolve_time_base(
    buf: &[u8],
    variant: FormatVariant,
) -> Option<u32> {
    read_u32_le(buf, time_base_offset(variant))
}

/// Абсолютное время кадра: `time_base + offset_ms / 1000`.
pub fn frame_timestamp(
    time_base: u32,
    offset_ms: u32,
) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
        + TimeDelta::seconds(i64::from(time_base))
        + TimeDelta::milliseconds(i64::from(offset_ms))
}
