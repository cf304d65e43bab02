use thiserror::Error;

pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Ошибка записи файла
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации отчёта
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Нечего экспортировать
    #[error("No records to export")]
    EmptyInput,

    /// Неизвестное имя поля записи
    #[error("Unknown record field: '{0}'")]
    UnknownField(String),
}
