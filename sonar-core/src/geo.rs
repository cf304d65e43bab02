//! Обратная сферическая (Web-Mercator) проекция координат кадра.

use std::f64::consts::PI;

use sonar_types::GeoPosition;

/// Радиус Земли, которым пользуется прошивка устройства.
///
/// Это полярная полуось WGS84, а не средний радиус. Менять нельзя: значения
/// должны совпадать с эталонным декодером до бита.
pub const EARTH_RADIUS_M: f64 = 6356752.3142;

const RAD_TO_DEG: f64 = 180.0 / PI;

/// Долгота в градусах из проекционной координаты `x`.
pub fn longitude(x: i32) -> f64 {
    f64::from(x) / EARTH_RADIUS_M * RAD_TO_DEG
}

/// Широта в градусах из проекционной координаты `y`.
pub fn latitude(y: i32) -> f64 {
    (2.0 * (f64::from(y) / EARTH_RADIUS_M).exp().atan() - PI / 2.0) * RAD_TO_DEG
}

/// Положение по паре проекционных координат.
pub fn to_geo(
    x: i32,
    y: i32,
) -> GeoPosition {
    GeoPosition {
        latitude: latitude(y),
        longitude: longitude(x),
    }
}
