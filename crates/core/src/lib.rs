pub mod config;
pub mod error;
pub mod point;
pub mod record;

pub use config::ChartConfig;
pub use error::*;
pub use point::*;
pub use record::*;
