use std::path::{Path, PathBuf};

use crate::{
    traits::{DrawingSink, Stroke},
    types::Error,
};

/// one recorded `DrawingSink` call
#[derive(Debug,Clone,PartialEq)]
pub enum DrawOp {
    OpenPage { width: f32, height: f32 },
    SetStroke(Stroke),
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Rect { x: f32, y: f32, width: f32, height: f32, filled: bool },
    Text { x: f32, y: f32, text: String, font_id: String, font_size: f32 },
    ClosePage,
    Finalize(PathBuf),
}

/// A sink that keeps every call instead of producing output. Useful for dry runs and for
/// checking geometry without decoding a PDF.
#[derive(Debug,Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
    page_open: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    /// ops of each page, `OpenPage` and `ClosePage` excluded
    pub fn pages(&self) -> Vec<&[DrawOp]> {
        let mut pages = Vec::new();
        let mut start = None;

        for (index, op) in self.ops.iter().enumerate() {
            match op {
                DrawOp::OpenPage { .. } => start = Some(index + 1),
                DrawOp::ClosePage => {
                    if let Some(first) = start.take() {
                        pages.push(&self.ops[first..index]);
                    }
                },
                _ => {}
            }
        }

        pages
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Text { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.ops.last(), Some(DrawOp::Finalize(_)))
    }

    fn record(&mut self, op: DrawOp) -> Result<(), Error> {
        if !self.page_open {
            return Err(Error::NoOpenPage);
        }

        self.ops.push(op);
        Ok(())
    }
}

impl DrawingSink for Recorder {
    fn open_page(&mut self, width: f32, height: f32) -> Result<(), Error> {
        if self.page_open {
            return Err(Error::PageAlreadyOpen);
        }

        self.page_open = true;
        self.ops.push(DrawOp::OpenPage { width, height });
        Ok(())
    }

    fn set_stroke(&mut self, stroke: Stroke) -> Result<(), Error> {
        self.record(DrawOp::SetStroke(stroke))
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), Error> {
        self.record(DrawOp::Line { x1, y1, x2, y2 })
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, filled: bool) -> Result<(), Error> {
        self.record(DrawOp::Rect { x, y, width, height, filled })
    }

    fn centered_string(&mut self, x: f32, y: f32, text: &str, font_id: &str, font_size: f32) -> Result<(), Error> {
        self.record(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font_id: font_id.to_string(),
            font_size,
        })
    }

    fn close_page(&mut self) -> Result<(), Error> {
        self.record(DrawOp::ClosePage)?;
        self.page_open = false;
        Ok(())
    }

    fn finalize(&mut self, destination: &Path) -> Result<(), Error> {
        if self.page_open {
            return Err(Error::PageAlreadyOpen);
        }

        self.ops.push(DrawOp::Finalize(destination.to_path_buf()));
        Ok(())
    }
}
