//! # Introduction
//!
//! Bingo Maker lays out printable bingo-card sheets. Given a pool of item strings, a card
//! layout and a font, it draws a square grid of cards on every page, fills each card's cells
//! with a random selection from the pool and writes the result as a PDF built with
//! pdf_writer (Typst).
//!
//! Feature Road Map:
//! - [X] Square grid of cards per page, square grid of cells per card
//! - [X] Independent random selection per card, with or without duplicates
//! - [X] Manual line breaks in items (`/` or `\`), vertically centered in the cell
//! - [X] Base-14 Latin fonts (Helvetica, Times, Courier)
//! - [X] Embedded TrueType/OpenType fonts from a font directory, subset to the glyphs used
//! - [X] Reproducible sheets from a seed
//! - [ ] Shrink-to-fit for long items
//!
//! ## Links
//! PDF Writer:
//!
//! - <https://github.com/typst/pdf-writer>
//!
//! Font parsing and subsetting:
//!
//! - <https://github.com/harfbuzz/ttf-parser>
//! - <https://github.com/typst/subsetter>
//!
//! # Basic Usage
//! The simplest entry point is `BingoConfig`, usually deserialized from JSON. `.generate()`
//! validates it, renders every page and returns the path of the written PDF.
//!
//! ```no_run
//! use bingo_maker::types::{BingoConfig, ItemPool};
//!
//! let pool = ItemPool::parse("apple\nbanana/split\ncherry\n")?;
//! let config = BingoConfig {
//!     cell_size: 3,
//!     output_path: "outputs/fruit.pdf".into(),
//!     ..BingoConfig::default()
//! };
//!
//! let written = config.generate(pool)?;
//! println!("{}", written.display());
//! # Ok::<(), bingo_maker::types::Error>(())
//! ```
//!
//! ### Custom output
//! `Doc::render()` draws into anything implementing `traits::DrawingSink` and measures fonts
//! through `traits::FontMetricsProvider`, so the layout can be inspected with `types::Recorder`
//! without producing a PDF.
pub mod traits;
pub mod types;
