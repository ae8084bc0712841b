pub mod chart;
pub mod label;
pub mod scale;
pub mod svg;
pub mod tooltip;

pub use chart::{ChartFrame, ChartTemplate, Column, Margins, Tick};
pub use label::{format_ratio, place_label, LabelStyle};
pub use scale::{BandScale, LinearScale};
pub use svg::render_svg;
pub use tooltip::tooltip_lines;
