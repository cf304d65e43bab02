use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Географическое положение в градусах
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Дальности и глубина кадра, уже переведённые в метры
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Soundings {
    pub min_range: f64,
    pub max_range: f64,
    pub water_depth: f64,
}

/// Интенсивность сигнала у дна: одна выборка и два средних
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BottomDensity {
    /// `signal[bottom_index]`
    pub single: u8,
    /// Среднее по 10 выборкам от `bottom_index`
    pub avg_10: f64,
    /// Среднее по 100 выборкам от `bottom_index`
    pub avg_100: f64,
}

/// Одна принятая точка: положение, время, глубина и плотность дна.
///
/// Неизменяема после создания, поля доступны только на чтение.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    latitude: f64,
    longitude: f64,
    timestamp: DateTime<Utc>,
    water_depth: f64,
    min_range: f64,
    max_range: f64,
    bottom_density_1: u8,
    bottom_density_10: f64,
    bottom_density_100: f64,
}

impl Record {
    pub fn new(
        position: GeoPosition,
        timestamp: DateTime<Utc>,
        soundings: Soundings,
        density: BottomDensity,
    ) -> Self {
        Record {
            latitude: position.latitude,
            longitude: position.longitude,
            timestamp,
            water_depth: soundings.water_depth,
            min_range: soundings.min_range,
            max_range: soundings.max_range,
            bottom_density_1: density.single,
            bottom_density_10: density.avg_10,
            bottom_density_100: density.avg_100,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn position(&self) -> GeoPosition {
        GeoPosition {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Глубина, м
    pub fn water_depth(&self) -> f64 {
        self.water_depth
    }

    /// Нижняя граница диапазона, м
    pub fn min_range(&self) -> f64 {
        self.min_range
    }

    /// Верхняя граница диапазона, м
    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    pub fn bottom_density_1(&self) -> u8 {
        self.bottom_density_1
    }

    pub fn bottom_density_10(&self) -> f64 {
        self.bottom_density_10
    }

    pub fn bottom_density_100(&self) -> f64 {
        self.bottom_density_100
    }
}
