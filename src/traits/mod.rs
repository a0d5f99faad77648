mod drawing_sink;
mod font_metrics;

pub use drawing_sink::{DrawingSink, Stroke};
pub use font_metrics::FontMetricsProvider;
