use std::path::{Path, PathBuf};

use sonar_core::{DecodeStats, SonarLog};
use sonar_export::{field_range, FieldRange, RecordField};
use sonar_types::{FileHeader, FormatVariant};

/// Snapshot разбора одного файла для вывода.
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub path: PathBuf,
    pub variant: FormatVariant,
    pub header: FileHeader,
    pub time_base: Option<u32>,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
    pub field: RecordField,
    pub range: Option<FieldRange>,
    pub stats: DecodeStats,
}

impl FileSummary {
    pub fn new(
        path: &Path,
        log: &SonarLog,
        field: RecordField,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            variant: log.variant,
            header: log.header,
            time_base: log.time_base,
            first_timestamp: log.records.first().map(|r| r.timestamp().to_rfc3339()),
            last_timestamp: log.records.last().map(|r| r.timestamp().to_rfc3339()),
            field,
            range: field_range(&log.records, field),
            stats: log.stats.clone(),
        }
    }

    /// Доля принятых кадров (0.0-100.0).
    pub fn acceptance_pct(&self) -> f64 {
        if self.stats.frames_scanned == 0 {
            0.0
        } else {
            self.stats.records_accepted as f64 / self.stats.frames_scanned as f64 * 100.0
        }
    }
}

impl std::fmt::Display for FileSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let s = &self.stats;

        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  File          : {}", self.path.display())?;
        writeln!(
            f,
            "  Format        : {} (.{})",
            self.variant,
            self.variant.extension()
        )?;
        writeln!(
            f,
            "  Header        : version={} device={}",
            self.header.version, self.header.device_id
        )?;

        match self.time_base {
            Some(tb) => writeln!(f, "  Time base     : {tb}")?,
            None => writeln!(f, "  Time base     : -")?,
        }

        if let (Some(first), Some(last)) = (&self.first_timestamp, &self.last_timestamp) {
            writeln!(f, "  Time span     : {first} .. {last}")?;
        }

        writeln!(
            f,
            "  Frames        : {} ({} bytes, end: {:?})",
            s.frames_scanned, s.bytes_consumed, s.scan_end
        )?;
        writeln!(
            f,
            "  Records       : {} ({:.1}%)",
            s.records_accepted,
            self.acceptance_pct()
        )?;
        writeln!(
            f,
            "  Rejected      : {} (secondary={} no_fix={} range={} bottom={} depth={} truncated={})",
            s.rejected_total(),
            s.rejected_secondary_channel,
            s.rejected_no_fix,
            s.rejected_degenerate_range,
            s.rejected_bottom_out_of_range,
            s.rejected_no_depth,
            s.rejected_truncated
        )?;

        match self.range {
            Some(r) => writeln!(f, "  {:<14}: {:.2} .. {:.2}", self.field.name(), r.min, r.max)?,
            None => writeln!(f, "  {:<14}: -", self.field.name())?,
        }

        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}
