//! Плотность донного сигнала вокруг индекса дна.
//!
//! `signal`: байтовый участок интенсивностей кадра после его заголовка.
//! Индекс дна оценивается по доле глубины в диапазоне дальностей:
//!
//! ```text
//! bottom_index = floor(L / (max_range - min_range) * water_depth)
//! ```
//!
//! Дальности и глубина берутся уже в метрах. Множитель перевода единиц
//! алгебраически сокращается, но порядок операций с ним сохраняется, иначе
//! округление разойдётся с эталоном.

use sonar_types::{BottomDensity, Soundings};

use crate::format::DENSITY_WINDOWS;

/// Индекс дна в сигнале длины `signal_len`, если он попадает в `[0, signal_len)`.
pub fn bottom_index(
    signal_len: usize,
    soundings: &Soundings,
) -> Option<usize> {
    let span = soundings.max_range - soundings.min_range;
    let index = (signal_len as f64 / span * soundings.water_depth).floor();

    // NaN и бесконечности не проходят ни одно из сравнений
    if index >= 0.0 && index < signal_len as f64 {
        Some(index as usize)
    } else {
        None
    }
}

/// Среднее `signal[start..start + width]`, обрезанное по концу сигнала.
///
/// Делитель равен фактическому числу прочитанных байт, а не `width`.
pub fn window_mean(
    signal: &[u8],
    start: usize,
    width: usize,
) -> Option<f64> {
    let end = start.saturating_add(width).min(signal.len());
    let window = signal.get(start..end)?;

    if window.is_empty() {
        return None;
    }

    let sum: u64 = window.iter().map(|&b| u64::from(b)).sum();

    Some(sum as f64 / window.len() as f64)
}

/// Выборки плотности в точке `index`.
pub fn sample(
    signal: &[u8],
    index: usize,
) -> Option<BottomDensity> {
    let single = *signal.get(index)?;
    let [short, long] = DENSITY_WINDOWS;

    Some(BottomDensity {
        single,
        avg_10: window_mean(signal, index, short)?,
        avg_100: window_mean(signal, index, long)?,
    })
}
