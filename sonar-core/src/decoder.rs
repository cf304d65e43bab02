//! Декодирование одного кадра в [`Record`].
//!
//! Раскладка полей берётся из таблицы [`FrameLayout`] варианта формата, так
//! что логика написана один раз для обоих вариантов.

use serde::{Deserialize, Serialize};
use sonar_types::{FormatVariant, FrameLayout, Record, Soundings};

use crate::{
    binary::{read_f32_le, read_i32_le, read_u16_le, read_u32_le},
    density,
    format::{feet_to_meters, PRIMARY_CHANNEL},
    geo,
    scanner::RawFrame,
    time,
};

/// Почему кадр не дал записи. Это ожидаемые, частые ситуации, а не ошибки:
/// большинство кадров принадлежит вспомогательным каналам.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// Поле заголовка кадра не помещается в буфер
    Truncated,
    /// `survey_type != 0`, не основной канал
    SecondaryChannel,
    /// `x == 0 || y == 0`, нет GPS-фиксации
    NoFix,
    /// `max_range <= min_range`
    DegenerateRange,
    /// Индекс дна вне `[0, signal_len)`
    BottomOutOfRange,
    /// `water_depth <= 0`
    NoDepth,
}

impl std::fmt::Display for Rejection {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let s = match self {
            Rejection::Truncated => "truncated frame header",
            Rejection::SecondaryChannel => "secondary survey channel",
            Rejection::NoFix => "no GPS fix",
            Rejection::DegenerateRange => "degenerate range",
            Rejection::BottomOutOfRange => "bottom index out of range",
            Rejection::NoDepth => "no water depth",
        };

        f.write_str(s)
    }
}

/// Сырые поля заголовка кадра в единицах записи (футы, мс).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFields {
    pub survey_type: u16,
    pub min_range_ft: f32,
    pub max_range_ft: f32,
    pub water_depth_ft: f32,
    pub x: i32,
    pub y: i32,
    pub time_offset_ms: u32,
}

impl FrameFields {
    /// Читает поля кадра, начинающегося с `position`.
    pub fn read(
        buf: &[u8],
        position: usize,
        layout: &FrameLayout,
    ) -> Option<Self> {
        Some(FrameFields {
            survey_type: read_u16_le(buf, position + layout.survey_type)?,
            min_range_ft: read_f32_le(buf, position + layout.min_range)?,
            max_range_ft: read_f32_le(buf, position + layout.max_range)?,
            water_depth_ft: read_f32_le(buf, position + layout.water_depth)?,
            x: read_i32_le(buf, position + layout.x)?,
            y: read_i32_le(buf, position + layout.y)?,
            time_offset_ms: read_u32_le(buf, position + layout.time_offset)?,
        })
    }

    /// Дальности и глубина в метрах.
    pub fn soundings(&self) -> Soundings {
        Soundings {
            min_range: feet_to_meters(self.min_range_ft),
            max_range: feet_to_meters(self.max_range_ft),
            water_depth: feet_to_meters(self.water_depth_ft),
        }
    }
}

/// Декодирует кадр `frame` из `buf`.
///
/// Проверки выполняются по порядку и прерываются на первой неудаче: канал,
/// GPS-фиксация, диапазон, индекс дна. Фильтр `water_depth > 0` применяется
/// уже при обходе, см. [`crate::parser`].
pub fn decode_frame(
    buf: &[u8],
    frame: &RawFrame,
    variant: FormatVariant,
    time_base: u32,
) -> Result<Record, Rejection> {
    let layout = variant.layout();
    let fields = FrameFields::read(buf, frame.position, layout).ok_or(Rejection::Truncated)?;

    if fields.survey_type != PRIMARY_CHANNEL {
        return Err(Rejection::SecondaryChannel);
    }

    if fields.x == 0 || fields.y == 0 {
        return Err(Rejection::NoFix);
    }

    let soundings = fields.soundings();

    // Отрицательная форма нужна, чтобы NaN тоже отбраковывался
    if !(soundings.max_range > soundings.min_range) {
        return Err(Rejection::DegenerateRange);
    }

    let signal = buf
        .get(frame.signal_range())
        .ok_or(Rejection::Truncated)?;
    let bottom =
        density::bottom_index(signal.len(), &soundings).ok_or(Rejection::BottomOutOfRange)?;
    let density = density::sample(signal, bottom).ok_or(Rejection::BottomOutOfRange)?;

    Ok(Record::new(
        geo::to_geo(fields.x, fields.y),
        time::frame_timestamp(time_base, fields.time_offset_ms),
        soundings,
        density,
    ))
}
