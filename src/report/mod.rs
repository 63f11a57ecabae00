pub mod chart;
pub mod search;
pub mod table;

pub use chart::{
    chart_points,
    render_bars,
    ChartPoint,
    DEFAULT_CHART_LIMIT,
};
pub use search::browse_query;
pub use table::render_table;
