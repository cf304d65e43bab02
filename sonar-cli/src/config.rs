use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use sonar_export::RecordField;
use sonar_types::FormatVariant;

use crate::{CliError, CliResult};

/// Полная конфигурация запуска.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Входные файлы
    pub inputs: Vec<PathBuf>,
    /// Явно заданный вариант формата (иначе по расширению)
    pub variant: Option<FormatVariant>,
    /// Файл или каталог для экспорта
    pub output: Option<PathBuf>,
    /// Поле для сводки диапазона
    pub field: RecordField,
    /// Число рабочих потоков для разбора нескольких файлов
    pub workers: usize,
    /// Сводка в JSON вместо текста
    pub json: bool,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl CliConfig {
    /// Проверяет согласованность параметров.
    pub fn validate(&self) -> CliResult<()> {
        if self.inputs.is_empty() {
            return Err(CliError::Config("no input files".to_string()));
        }

        if self.workers == 0 {
            return Err(CliError::Config("workers must be > 0".to_string()));
        }

        Ok(())
    }

    /// Вариант формата для файла: явный флаг или расширение.
    pub fn variant_for(
        &self,
        path: &Path,
    ) -> CliResult<FormatVariant> {
        match self.variant {
            Some(v) => Ok(v),
            None => variant_for_path(path),
        }
    }

    /// Путь CSV для входного файла.
    ///
    /// При одном входе `output` это сам файл, при нескольких это каталог,
    /// в который пишется `<имя>.csv`.
    pub fn export_path_for(
        &self,
        input: &Path,
    ) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "export".into());
        let mut name = PathBuf::from(stem);
        name.set_extension("csv");

        match &self.output {
            Some(out) if self.inputs.len() == 1 => out.clone(),
            Some(dir) => dir.join(name),
            None => input.with_extension("csv"),
        }
    }

    /// Проверяет, что каждый вход пишет в собственный CSV.
    ///
    /// Два входа с одинаковым именем из разных каталогов при `-o <dir>`
    /// попадают в один файл, поэтому экспорт отклоняется до разбора.
    pub fn check_export_targets(&self) -> CliResult<()> {
        let mut seen: HashMap<PathBuf, &Path> = HashMap::with_capacity(self.inputs.len());

        for input in &self.inputs {
            let target = self.export_path_for(input);

            if let Some(previous) = seen.insert(target.clone(), input) {
                return Err(CliError::Config(format!(
                    "{} and {} both export to {}",
                    previous.display(),
                    input.display(),
                    target.display()
                )));
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            variant: None,
            output: None,
            field: RecordField::WaterDepth,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(8),
            json: false,
        }
    }
}

/// Определяет вариант формата по расширению файла (`.sl3` → A, `.sl2` → B).
pub fn variant_for_path(path: &Path) -> CliResult<FormatVariant> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(FormatVariant::from_extension)
        .ok_or_else(|| {
            CliError::Config(format!(
                "cannot infer format from {path:?}; use --format a|b"
            ))
        })
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
