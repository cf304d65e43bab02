use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use chrono::SecondsFormat;
use log::debug;
use serde_json::json;
use sonar_core::SonarLog;
use sonar_types::Record;

use crate::{field_range, ExportError, ExportResult, RecordField};

/// Заголовок CSV, порядок колонок фиксирован.
pub const CSV_HEADER: &str = "timestamp,latitude,longitude,water_depth,min_range,max_range,\
bottom_density_1,bottom_density_10,bottom_density_100";

pub struct DataExporter;

impl DataExporter {
    /// Экспорт записей в CSV.
    ///
    /// Точность: координаты 7 знаков, глубина и дальности 2, плотность 1.
    /// Время в RFC 3339 с миллисекундами (`2023-11-14T22:13:25.000Z`).
    pub fn write_csv<W: Write>(
        records: &[Record],
        writer: &mut W,
    ) -> ExportResult<()> {
        writeln!(writer, "{CSV_HEADER}")?;

        for r in records {
            writeln!(
                writer,
                "{},{:.7},{:.7},{:.2},{:.2},{:.2},{:.1},{:.1},{:.1}",
                r.timestamp().to_rfc3339_opts(SecondsFormat::Millis, true),
                r.latitude(),
                r.longitude(),
                r.water_depth(),
                r.min_range(),
                r.max_range(),
                f64::from(r.bottom_density_1()),
                r.bottom_density_10(),
                r.bottom_density_100(),
            )?;
        }

        Ok(())
    }

    /// Экспорт записей в CSV-файл.
    pub fn export_csv(
        records: &[Record],
        path: &Path,
    ) -> ExportResult<()> {
        if records.is_empty() {
            return Err(ExportError::EmptyInput);
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        Self::write_csv(records, &mut writer)?;
        writer.flush()?;

        debug!("Exported {} records to {:?}", records.len(), path);
        Ok(())
    }

    /// JSON-отчёт о разборе: заголовок, статистика, диапазоны.
    pub fn write_json_report<W: Write>(
        log: &SonarLog,
        writer: W,
    ) -> ExportResult<()> {
        let records = &log.records;
        let first = records.first().map(|r| r.timestamp().to_rfc3339());
        let last = records.last().map(|r| r.timestamp().to_rfc3339());

        let report = json!({
            "variant": log.variant,
            "header": log.header,
            "time_base": log.time_base,
            "records": records.len(),
            "time": {
                "first": first,
                "last": last,
            },
            "water_depth": field_range(records, RecordField::WaterDepth),
            "bottom_density_1": field_range(records, RecordField::BottomDensity1),
            "stats": log.stats,
        });

        serde_json::to_writer_pretty(writer, &report)?;
        Ok(())
    }
}
