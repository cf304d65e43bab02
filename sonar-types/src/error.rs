use thiserror::Error;

/// Результат для операций декодирования sonar-логов
pub type SonarResult<T> = std::result::Result<T, SonarError>;

/// Типы ошибок декодера.
///
/// Сюда попадают только структурные ошибки уровня файла. Усечённые кадры
/// и отбракованные по содержимому кадры ошибкой не считаются.
#[derive(Debug, Error)]
pub enum SonarError {
    /// Буфер короче, чем требуется для чтения структуры
    #[error("Buffer too short: needed {needed} bytes, available {available}")]
    TooShort { needed: usize, available: usize },

    /// Неизвестный вариант формата (расширение файла или флаг CLI)
    #[error("Unknown format variant: {0}")]
    UnknownVariant(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SonarError {
    /// Удобные конструкторы
    pub fn too_short(
        needed: usize,
        available: usize,
    ) -> Self {
        Self::TooShort { needed, available }
    }

    pub fn unknown_variant<S: Into<String>>(s: S) -> Self {
        Self::UnknownVariant(s.into())
    }
}
