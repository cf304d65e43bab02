pub mod batch;
pub mod config;
pub mod error;
pub mod report;

pub use batch::*;
pub use config::*;
pub use error::*;
pub use report::*;
