//! Потребители декодированных записей: экспорт в CSV/JSON и подготовка
//! слоя карты (выбор поля, диапазон значений, точки).
//!
//! Записи доступны только на чтение; модуль ничего в них не меняет.

pub mod error;
pub mod export;
pub mod field;
pub mod layer;

pub use error::*;
pub use export::*;
pub use field::*;
pub use layer::*;
