pub mod chart;
pub mod difficulty;
pub mod export;
pub mod histogram;
pub mod hover;
pub mod scale;
pub mod scene;

pub use drawdiff_common::{Dataset, DrawDiffError, RegionRecord, Result};
pub use chart::{ChartLayout, ChartSettings, HistogramChart, Redraw, RenderKey};
pub use difficulty::DifficultyTable;
pub use export::{export_json, export_svg, histogram_json, print_summary, to_svg};
pub use histogram::{bin_records, Bin, BinMember, Histogram};
pub use hover::{tooltip_lines, HoverState, PointerEvent, TooltipController};
pub use scale::{LinearScale, Rgb, SequentialColor};
pub use scene::{Anchor, Axis, AxisOrient, Bar, DrawingSurface, Scene, Shape, Text, Tick};
