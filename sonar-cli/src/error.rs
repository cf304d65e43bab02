use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Ошибка чтения/записи файла
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка декодера
    #[error("Decode error: {0}")]
    Sonar(#[from] sonar_types::SonarError),

    /// Ошибка экспорта
    #[error("Export error: {0}")]
    Export(#[from] sonar_export::ExportError),

    /// Ошибка отчёта в JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Некорректные аргументы / конфигурация
    #[error("Config error: {0}")]
    Config(String),

    /// Ошибка рабочего потока (inter-thread)
    #[error("Worker error: {0}")]
    Worker(String),
}
