//! Точка входа декодера.
//!
//! Разбор есть чистая функция от `(буфер, вариант формата)`: никакого общего
//! состояния между вызовами, поэтому несколько файлов можно декодировать
//! параллельно, если каждый вызов владеет своим буфером.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use sonar_types::{FileHeader, FormatVariant, Record, SonarResult};

use crate::{
    decoder::{decode_frame, Rejection},
    format::FileHeaderExt,
    scanner::{FrameScanner, RawFrame, ScanEnd},
    time::resolve_time_base,
};

/// Статистика, накопленная за один разбор.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Кадров, прошедших проверку границ
    pub frames_scanned: u64,
    /// Записей в результате
    pub records_accepted: u64,
    pub rejected_truncated: u64,
    pub rejected_secondary_channel: u64,
    pub rejected_no_fix: u64,
    pub rejected_degenerate_range: u64,
    pub rejected_bottom_out_of_range: u64,
    pub rejected_no_depth: u64,
    /// Байт, покрытых кадрами (без заголовка файла)
    pub bytes_consumed: u64,
    /// Почему обход остановился
    pub scan_end: ScanEnd,
}

impl DecodeStats {
    pub fn record_rejection(
        &mut self,
        rejection: Rejection,
    ) {
        let counter = match rejection {
            Rejection::Truncated => &mut self.rejected_truncated,
            Rejection::SecondaryChannel => &mut self.rejected_secondary_channel,
            Rejection::NoFix => &mut self.rejected_no_fix,
            Rejection::DegenerateRange => &mut self.rejected_degenerate_range,
            Rejection::BottomOutOfRange => &mut self.rejected_bottom_out_of_range,
            Rejection::NoDepth => &mut self.rejected_no_depth,
        };

        *counter += 1;
    }

    /// Всего отбракованных кадров.
    pub fn rejected_total(&self) -> u64 {
        self.rejected_truncated
            + self.rejected_secondary_channel
            + self.rejected_no_fix
            + self.rejected_degenerate_range
            + self.rejected_bottom_out_of_range
            + self.rejected_no_depth
    }
}

/// Полный результат разбора файла.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonarLog {
    pub header: FileHeader,
    pub variant: FormatVariant,
    /// База времени; `None`, если буфер слишком короткий, чтобы её прочитать
    pub time_base: Option<u32>,
    pub records: Vec<Record>,
    pub stats: DecodeStats,
}

/// Разбирает буфер и возвращает принятые записи в порядке обхода.
///
/// Ошибка возможна только если буфер короче заголовка файла.
pub fn parse(
    buf: &[u8],
    variant: FormatVariant,
) -> SonarResult<Vec<Record>> {
    decode_log(buf, variant).map(|log| log.records)
}

/// Как [`parse`], но вместе с заголовком, базой времени и статистикой.
pub fn decode_log(
    buf: &[u8],
    variant: FormatVariant,
) -> SonarResult<SonarLog> {
    let header = FileHeader::read(buf)?;

    debug!(
        "File header: version={}, device_id={}, variant={variant}, {} bytes",
        header.version,
        header.device_id,
        buf.len()
    );

    let mut stats = DecodeStats::default();

    let Some(time_base) = resolve_time_base(buf, variant) else {
        debug!("Buffer too short for time base, no frames decoded");
        stats.scan_end = ScanEnd::TruncatedHeader;

        return Ok(SonarLog {
            header,
            variant,
            time_base: None,
            records: Vec::new(),
            stats,
        });
    };

    let mut scanner = FrameScanner::new(buf, variant);
    let mut records = Vec::new();

    for frame in scanner.by_ref() {
        stats.frames_scanned += 1;
        stats.bytes_consumed += u64::from(frame.frame_size);

        match accept(buf, &frame, variant, time_base) {
            Ok(record) => {
                stats.records_accepted += 1;
                records.push(record);
            }
            Err(rejection) => {
                trace!("Frame at {} rejected: {rejection}", frame.position);
                stats.record_rejection(rejection);
            }
        }
    }

    stats.scan_end = scanner.scan_end().unwrap_or_default();

    debug!(
        "Decoded {} records from {} frames ({} rejected, end: {:?})",
        stats.records_accepted,
        stats.frames_scanned,
        stats.rejected_total(),
        stats.scan_end
    );

    Ok(SonarLog {
        header,
        variant,
        time_base: Some(time_base),
        records,
        stats,
    })
}

/// Декодирует кадры, заранее собранные индексным проходом
/// ([`crate::scanner::index_frames`]).
pub fn decode_frames(
    buf: &[u8],
    variant: FormatVariant,
    time_base: u32,
    frames: &[RawFrame],
) -> Vec<Record> {
    frames
        .iter()
        .filter_map(|frame| accept(buf, frame, variant, time_base).ok())
        .collect()
}

fn accept(
    buf: &[u8],
    frame: &RawFrame,
    variant: FormatVariant,
    time_base: u32,
) -> Result<Record, Rejection> {
    let record = decode_frame(buf, frame, variant, time_base)?;

    if record.water_depth() > 0.0 {
        Ok(record)
    } else {
        Err(Rejection::NoDepth)
    }
}
