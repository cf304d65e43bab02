use serde::{Deserialize, Serialize};

/// Заголовок файла (фиксированный размер 8 байт, little-endian).
///
/// Значения носят справочный характер и разбор не блокируют.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    /// Версия формата, записанная устройством
    pub version: i16,
    /// Идентификатор устройства
    pub device_id: i16,
    /// Байты [4..8], не интерпретируются
    pub reserved: [u8; 4],
}
