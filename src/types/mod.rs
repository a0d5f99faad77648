mod card;
mod config;
mod content;
mod doc;
mod embedded_font;
mod error;
mod font;
mod font_library;
mod font_reference;
mod layout;
mod page;
mod recorder;
mod text;
mod writer;

pub use card::Card;
pub use config::{resolve_output_path, BingoConfig, Validity, A4_HEIGHT, A4_WIDTH};
pub use content::{select_cell_items, BingoCardContent, ItemPool};
pub use doc::Doc;
pub use embedded_font::{EmbeddedFont, FontDirectory, GlyphRun};
pub use error::Error;
pub use font::{encode_win_ansi, FontMetrics, StandardFont, StandardFonts};
pub use font_library::{FontLibrary, ResolvedFont};
pub use font_reference::{FontFace, FontReference};
pub use layout::{CardOrigins, LayoutParams, LayoutSpec, TITLE_LINE_FACTOR};
pub use page::{ FinishedPage, Page, PageContent };
pub use recorder::{DrawOp, Recorder};
pub use text::{split_item_lines, LineYPositions, TextBlockAligner, LEADING_FACTOR};
pub use writer::PdfWriter;
