use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use log::{error, info, warn, LevelFilter};
use sonar_cli::{decode_files, CliConfig, CliError, CliResult, FileSummary};
use sonar_core::index_frames;
use sonar_export::{DataExporter, ExportError, RecordField};
use sonar_types::FormatVariant;

#[derive(Parser, Debug)]
#[command(
    name = "sonarlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Decode sonar logs (.sl2 / .sl3) into geo-referenced soundings",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Вариант формата: a, b, sl2, sl3. По умолчанию: по расширению файла
    #[arg(long, global = true)]
    format: Option<String>,
    /// Число рабочих потоков при нескольких входных файлах
    #[arg(short, long, global = true)]
    workers: Option<usize>,
    /// Тихий режим (только ошибки)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Подробный лог (причина остановки обхода, отбракованные кадры)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Вывод в JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Сводка по файлам: заголовок, база времени, статистика, диапазон поля
    Summary {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Поле для диапазона (water_depth, bottom_density_1, ...)
        #[arg(long, default_value = "water_depth")]
        field: String,
    },
    /// Экспорт записей в CSV
    Export {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Выходной CSV (один вход) или каталог (несколько входов)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Индекс кадров: позиция и размер
    Frames { file: PathBuf },
}

fn build_config(
    cli: &Cli,
    inputs: Vec<PathBuf>,
) -> CliResult<CliConfig> {
    let variant = match &cli.format {
        Some(s) => Some(s.parse::<FormatVariant>()?),
        None => None,
    };

    let defaults = CliConfig::default();
    let config = CliConfig {
        inputs,
        variant,
        workers: cli.workers.unwrap_or(defaults.workers),
        json: cli.json,
        ..defaults
    };

    config.validate()?;
    Ok(config)
}

fn run_summary(config: &CliConfig) -> CliResult<usize> {
    let mut failed = 0;
    let stdout = io::stdout();

    for file in decode_files(config) {
        let log = match file.result {
            Ok(log) => log,
            Err(e) => {
                error!("{}: {e}", file.path.display());
                failed += 1;
                continue;
            }
        };

        if config.json {
            let mut out = stdout.lock();
            DataExporter::write_json_report(&log, &mut out)?;
            writeln!(out)?;
        } else {
            println!("{}", FileSummary::new(&file.path, &log, config.field));
        }
    }

    Ok(failed)
}

fn run_export(config: &CliConfig) -> CliResult<usize> {
    let mut failed = 0;

    config.check_export_targets()?;

    if config.inputs.len() > 1 {
        if let Some(dir) = &config.output {
            fs::create_dir_all(dir)?;
        }
    }

    for file in decode_files(config) {
        let log = match file.result {
            Ok(log) => log,
            Err(e) => {
                error!("{}: {e}", file.path.display());
                failed += 1;
                continue;
            }
        };

        let out = config.export_path_for(&file.path);

        match DataExporter::export_csv(&log.records, &out) {
            Ok(()) => info!("{} -> {} ({} records)", file.path.display(), out.display(), log.records.len()),
            Err(ExportError::EmptyInput) => {
                warn!("{}: no records, nothing exported", file.path.display())
            }
            Err(e) => {
                error!("{}: {e}", out.display());
                failed += 1;
            }
        }
    }

    Ok(failed)
}

fn run_frames(config: &CliConfig) -> CliResult<usize> {
    let path = config
        .inputs
        .first()
        .ok_or_else(|| CliError::Config("no input file".to_string()))?;
    let variant = config.variant_for(path)?;
    let buf = fs::read(path)?;
    let frames = index_frames(&buf, variant);

    info!("{}: {} frames (variant {variant})", path.display(), frames.len());

    let mut out = io::stdout().lock();

    if config.json {
        serde_json::to_writer_pretty(&mut out, &frames)?;
        writeln!(out)?;
    } else {
        writeln!(out, "index\tposition\tframe_size")?;

        for (i, frame) in frames.iter().enumerate() {
            writeln!(out, "{i}\t{}\t{}", frame.position, frame.frame_size)?;
        }
    }

    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let result = match &cli.command {
        Command::Summary { files, field } => {
            build_config(&cli, files.clone()).and_then(|mut config| {
                config.field = field.parse::<RecordField>()?;
                run_summary(&config)
            })
        }
        Command::Export { files, output } => {
            build_config(&cli, files.clone()).and_then(|mut config| {
                config.output = output.clone();
                run_export(&config)
            })
        }
        Command::Frames { file } => {
            build_config(&cli, vec![file.clone()]).and_then(|config| run_frames(&config))
        }
    };

    match result {
        Ok(0) => {}
        Ok(failed) => {
            error!("{failed} file(s) failed");
            std::process::exit(1);
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
