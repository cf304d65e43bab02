use std::{
    fs,
    path::{Path, PathBuf},
    thread,
};

use log::{debug, info, warn};
use sonar_core::{decode_log, SonarLog};
use sonar_types::FormatVariant;

use crate::{CliConfig, CliError, CliResult};

/// Один входной файл и результат его разбора.
#[derive(Debug)]
pub struct DecodedFile {
    pub path: PathBuf,
    pub result: CliResult<SonarLog>,
}

/// Задание для рабочего потока.
struct Job {
    index: usize,
    path: PathBuf,
    variant: FormatVariant,
}

/// Читает и разбирает один файл.
pub fn decode_file(
    path: &Path,
    variant: FormatVariant,
) -> CliResult<SonarLog> {
    let buf = fs::read(path)?;
    let log = decode_log(&buf, variant)?;

    info!(
        "{}: {} records from {} frames (variant {}, {} bytes)",
        path.display(),
        log.stats.records_accepted,
        log.stats.frames_scanned,
        variant,
        buf.len()
    );

    Ok(log)
}

/// Разбирает все входные файлы конфигурации.
///
/// Файлы раздаются рабочим потокам через ограниченный канал заданий,
/// результаты возвращаются по второму каналу. Порядок результата совпадает
/// с порядком `config.inputs` независимо от порядка завершения.
pub fn decode_files(config: &CliConfig) -> Vec<DecodedFile> {
    let total = config.inputs.len();
    let mut slots: Vec<Option<CliResult<SonarLog>>> = (0..total).map(|_| None).collect();
    let mut jobs = Vec::with_capacity(total);

    // Вариант определяется до запуска потоков: ошибка не требует чтения файла
    for (index, path) in config.inputs.iter().enumerate() {
        match config.variant_for(path) {
            Ok(variant) => jobs.push(Job {
                index,
                path: path.clone(),
                variant,
            }),
            Err(e) => slots[index] = Some(Err(e)),
        }
    }

    let workers = config.workers.clamp(1, jobs.len().max(1));
    debug!("Decoding {} files with {workers} workers", jobs.len());

    let (job_tx, job_rx) = crossbeam_channel::bounded::<Job>(workers * 2);
    let (result_tx, result_rx) =
        crossbeam_channel::unbounded::<(usize, CliResult<SonarLog>)>();

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();

            thread::spawn(move || {
                for job in job_rx.iter() {
                    debug!("worker {id}: {}", job.path.display());
                    let result = decode_file(&job.path, job.variant);

                    if result_tx.send((job.index, result)).is_err() {
                        break;
                    }
                }
            })
        })
        .collect();

    // Потоки держат собственные клоны
    drop(job_rx);
    drop(result_tx);

    for job in jobs {
        let index = job.index;

        if job_tx.send(job).is_err() {
            slots[index] = Some(Err(CliError::Worker(
                "job channel closed before dispatch".to_string(),
            )));
        }
    }
    drop(job_tx);

    for (index, result) in result_rx.iter() {
        slots[index] = Some(result);
    }

    for handle in handles {
        if handle.join().is_err() {
            warn!("Decode worker panicked");
        }
    }

    config
        .inputs
        .iter()
        .zip(slots)
        .map(|(path, slot)| DecodedFile {
            path: path.clone(),
            result: slot.unwrap_or_else(|| {
                Err(CliError::Worker(format!(
                    "no result for {}",
                    path.display()
                )))
            }),
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
