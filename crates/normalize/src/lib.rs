pub mod input;
pub mod mock;
pub mod normalize;
pub mod parsing;
pub mod window;

pub use input::{records_from_categories, records_from_json};
pub use normalize::{normalize, normalize_one, NormalizeOptions};
pub use parsing::{parse_ratio, parse_volume, period_label};
pub use window::ForecastWindow;
