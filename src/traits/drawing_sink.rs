use std::path::Path;

use crate::types::Error;

/// line settings applied to every subsequent `line` and `rect` call
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Stroke {
    pub line_width: f32,
    /// 0.0 is black, 1.0 is white
    pub gray: f32,
}

impl Default for Stroke {
    /// default settings:
    /// - Line width: 1.0
    /// - Color: black
    fn default() -> Self {
        Stroke {
            line_width: 1.0,
            gray: 0.0,
        }
    }
}

/// The drawing primitives the card renderer needs from an output backend.
///
/// Coordinates are page units with the origin in the lower left corner, y growing upwards.
/// A sink receives `open_page`, any number of drawing calls, `close_page`, repeated per page,
/// and finally a single `finalize`. Drawing outside an open page is `Error::NoOpenPage`.
pub trait DrawingSink {
    fn open_page(&mut self, width: f32, height: f32) -> Result<(), Error>;
    fn set_stroke(&mut self, stroke: Stroke) -> Result<(), Error>;
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), Error>;
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, filled: bool) -> Result<(), Error>;

    /// draws `text` on baseline `y`, horizontally centered on `x`
    fn centered_string(&mut self, x: f32, y: f32, text: &str, font_id: &str, font_size: f32) -> Result<(), Error>;
    fn close_page(&mut self) -> Result<(), Error>;

    /// persists everything drawn so far to `destination`
    fn finalize(&mut self, destination: &Path) -> Result<(), Error>;
}
