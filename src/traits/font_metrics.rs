use crate::types::{Error, FontMetrics};

/// Resolves a font identifier to its vertical metrics at a given size.
///
/// Implementors read font-unit metrics and scale them by `font_size / units_per_em`.
/// The descent is reported as a positive distance below the baseline. An identifier the
/// provider does not know must produce `Error::UnknownFont` rather than a fallback face.
pub trait FontMetricsProvider {
    fn metrics(&self, font_id: &str, font_size: f32) -> Result<FontMetrics, Error>;

    /// resolves both the title and item sizes up front so a render can fail before any page is opened
    fn metrics_pair(&self, font_id: &str, title_size: f32, item_size: f32) -> Result<(FontMetrics, FontMetrics), Error> {
        Ok((self.metrics(font_id, title_size)?, self.metrics(font_id, item_size)?))
    }
}
