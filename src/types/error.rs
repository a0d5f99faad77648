use core::fmt;
use derive_more::From;

use crate::types::Validity;

#[derive(Debug,From)]
pub enum Error {
   #[from]
    SaveError(std::io::Error),
   #[from]
    Json(serde_json::Error),
    /// without-replacement selection asked for more items than the pool holds
    InsufficientItems { required: usize, available: usize },
    /// margins plus the reserved title line leave no room for the grid
    DegenerateLayout { grid_w: f32, grid_h: f32 },
    UnknownFont(String),
    /// a font file that cannot be parsed or subset
    InvalidFont { name: String, reason: String },
    EmptyItemPool,
    InvalidField { field: &'static str, validity: Validity },
    NoOpenPage,
    PageAlreadyOpen,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::SaveError(e) => write!(f, "file access failed: {e}"),
            Error::Json(e) => write!(f, "invalid configuration: {e}"),
            Error::InsufficientItems { required, available } => {
                write!(f, "need {required} distinct items but the pool only has {available}")
            },
            Error::DegenerateLayout { grid_w, grid_h } => {
                write!(f, "card grid would be {grid_w} x {grid_h}, reduce margins or title font size")
            },
            Error::UnknownFont(name) => write!(f, "unknown font '{name}'"),
            Error::InvalidFont { name, reason } => write!(f, "font '{name}' cannot be used: {reason}"),
            Error::EmptyItemPool => write!(f, "item pool is empty"),
            Error::InvalidField { field, validity } => write!(f, "{field}: {validity}"),
            Error::NoOpenPage => write!(f, "drawing requires an open page"),
            Error::PageAlreadyOpen => write!(f, "previous page was not closed"),
        }
    }
}
