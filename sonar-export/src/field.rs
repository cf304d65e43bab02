use serde::{Deserialize, Serialize};
use sonar_types::Record;

use crate::ExportError;

/// Числовое поле записи, которое можно выбрать для раскраски карты.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordField {
    Latitude,
    Longitude,
    WaterDepth,
    MinRange,
    MaxRange,
    BottomDensity1,
    BottomDensity10,
    BottomDensity100,
}

impl RecordField {
    pub const ALL: [RecordField; 8] = [
        RecordField::Latitude,
        RecordField::Longitude,
        RecordField::WaterDepth,
        RecordField::MinRange,
        RecordField::MaxRange,
        RecordField::BottomDensity1,
        RecordField::BottomDensity10,
        RecordField::BottomDensity100,
    ];

    /// Значение поля в записи.
    pub fn value(
        self,
        record: &Record,
    ) -> f64 {
        match self {
            RecordField::Latitude => record.latitude(),
            RecordField::Longitude => record.longitude(),
            RecordField::WaterDepth => record.water_depth(),
            RecordField::MinRange => record.min_range(),
            RecordField::MaxRange => record.max_range(),
            RecordField::BottomDensity1 => f64::from(record.bottom_density_1()),
            RecordField::BottomDensity10 => record.bottom_density_10(),
            RecordField::BottomDensity100 => record.bottom_density_100(),
        }
    }

    /// Имя поля, совпадающее с заголовком колонки CSV.
    pub fn name(self) -> &'static str {
        match self {
            RecordField::Latitude => "latitude",
            RecordField::Longitude => "longitude",
            RecordField::WaterDepth => "water_depth",
            RecordField::MinRange => "min_range",
            RecordField::MaxRange => "max_range",
            RecordField::BottomDensity1 => "bottom_density_1",
            RecordField::BottomDensity10 => "bottom_density_10",
            RecordField::BottomDensity100 => "bottom_density_100",
        }
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RecordField {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");

        match key.as_str() {
            "depth" => return Ok(RecordField::WaterDepth),
            "lat" => return Ok(RecordField::Latitude),
            "lon" | "lng" => return Ok(RecordField::Longitude),
            _ => {}
        }

        RecordField::ALL
            .into_iter()
            .find(|f| f.name() == key)
            .ok_or_else(|| ExportError::UnknownField(s.to_string()))
    }
}
