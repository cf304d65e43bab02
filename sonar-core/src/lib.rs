//! Декодер sonar-логов
//!
//! Разбирает бинарные записи эхолотов/GPS-плоттеров двух поколений
//! (формат A и формат B) в последовательность записей с координатами,
//! временем, глубиной и плотностью донного сигнала.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use sonar_core::parse;
//! use sonar_types::FormatVariant;
//!
//! let buf = std::fs::read("track.sl2")?;
//! let records = parse(&buf, FormatVariant::B)?;
//!
//! for r in &records {
//!     println!("{} {:.7} {:.7} {:.2} m", r.timestamp(), r.latitude(), r.longitude(), r.water_depth());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod decoder;
pub mod density;
pub mod format;
pub mod geo;
pub mod parser;
pub mod scanner;
pub mod time;

pub use decoder::*;
pub use format::*;
pub use parser::*;
pub use scanner::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
