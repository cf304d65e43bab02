pub mod error;
pub mod header;
pub mod record;
pub mod variant;

pub use error::*;
pub use header::*;
pub use record::*;
pub use variant::*;
