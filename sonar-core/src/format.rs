//! Раскладка файла sonar-лога
//!
//! ```text
//! [0..2]   VERSION     i16
//! [2..4]   DEVICE_ID   i16
//! [4..8]   RESERVED
//! [8..]    кадры переменной длины, каждый начинается с заголовка
//!          фиксированного размера (168 байт для A, 144 для B)
//! ```
//!
//! Все многобайтовые числа хранятся в порядке little-endian.

use sonar_types::{FileHeader, SonarError, SonarResult, FILE_HEADER_SIZE};

use crate::binary::read_i16_le;

/// Перевод футов в метры
pub const FEET_TO_METERS: f64 = 0.3048;

/// Значение `survey_type` основного (нисходящего) канала
pub const PRIMARY_CHANNEL: u16 = 0;

/// Окна усреднения плотности дна
pub const DENSITY_WINDOWS: [usize; 2] = [10, 100];

/// Чтение заголовка файла из начала буфера.
pub trait FileHeaderExt: Sized {
    fn read(buf: &[u8]) -> SonarResult<Self>;
}

impl FileHeaderExt for FileHeader {
    fn read(buf: &[u8]) -> SonarResult<Self> {
        if buf.len() < FILE_HEADER_SIZE {
            return Err(SonarError::too_short(FILE_HEADER_SIZE, buf.len()));
        }

        let version = read_i16_le(buf, 0).unwrap_or_default();
        let device_id = read_i16_le(buf, 2).unwrap_or_default();
        let reserved = [buf[4], buf[5], buf[6], buf[7]];

        Ok(FileHeader {
            version,
            device_id,
            reserved,
        })
    }
}

/// Перевод величины из футов (как записано в кадре) в метры.
pub fn feet_to_meters(feet: f32) -> f64 {
    f64::from(feet) * FEET_TO_METERS
}
