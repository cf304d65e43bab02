use serde::{Deserialize, Serialize};
use sonar_types::Record;

use crate::RecordField;

/// Точка слоя карты: положение и значение выбранного поля.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
}

/// Диапазон значений поля по всем записям (для шкалы цвета).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    /// Положение `value` в диапазоне, 0.0..=1.0. Для вырожденного диапазона
    /// возвращает 0.0.
    pub fn normalize(
        &self,
        value: f64,
    ) -> f64 {
        let span = self.max - self.min;

        if span <= 0.0 {
            return 0.0;
        }

        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Минимум и максимум поля; `None` для пустой последовательности.
pub fn field_range(
    records: &[Record],
    field: RecordField,
) -> Option<FieldRange> {
    records
        .iter()
        .map(|r| field.value(r))
        .fold(None, |acc, v| match acc {
            None => Some(FieldRange { min: v, max: v }),
            Some(range) => Some(FieldRange {
                min: range.min.min(v),
                max: range.max.max(v),
            }),
        })
}

/// Точки слоя карты в порядке записей.
pub fn map_points(
    records: &[Record],
    field: RecordField,
) -> Vec<MapPoint> {
    records
        .iter()
        .map(|r| MapPoint {
            latitude: r.latitude(),
            longitude: r.longitude(),
            value: field.value(r),
        })
        .collect()
}
