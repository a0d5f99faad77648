use std::{fmt, path::{Path, PathBuf}};

use log::warn;
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use crate::{
    traits::FontMetricsProvider,
    types::{
        BingoCardContent,
        Doc,
        Error,
        FontDirectory,
        FontLibrary,
        ItemPool,
        LayoutParams,
        LayoutSpec,
        PdfWriter,
}};

/// A4 in points
pub const A4_WIDTH: f32 = 595.2756;
pub const A4_HEIGHT: f32 = 841.8898;

/// Outcome of checking one input field.
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Validity {
    Valid,
    Empty,
    TooSmall { min: f64, inclusive: bool },
    TooBig { max: f64, inclusive: bool },
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn non_empty(value: &str) -> Self {
        if value.trim().is_empty() { Validity::Empty } else { Validity::Valid }
    }

    /// `min <= value <= max`
    pub fn range(value: f64, min: f64, max: f64) -> Self {
        if !(value >= min) {
            Validity::TooSmall { min, inclusive: true }
        } else if value > max {
            Validity::TooBig { max, inclusive: true }
        } else {
            Validity::Valid
        }
    }

    pub fn at_least(value: f64, min: f64) -> Self {
        Validity::range(value, min, f64::INFINITY)
    }

    /// `value > 0`, also rejects NaN
    pub fn positive(value: f32) -> Self {
        if value > 0.0 { Validity::Valid } else { Validity::TooSmall { min: 0.0, inclusive: false } }
    }

    /// `0 <= value < 1`
    pub fn ratio(value: f32) -> Self {
        if !(value >= 0.0) {
            Validity::TooSmall { min: 0.0, inclusive: true }
        } else if value >= 1.0 {
            Validity::TooBig { max: 1.0, inclusive: false }
        } else {
            Validity::Valid
        }
    }

    /// folds per-field results into the first failure
    pub fn first_invalid<I>(fields: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (&'static str, Validity)>,
    {
        fields
            .into_iter()
            .find(|(_, validity)| !validity.is_valid())
            .map_or(Ok(()), |(field, validity)| Err(Error::InvalidField { field, validity }))
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Validity::Valid => write!(f, "valid"),
            Validity::Empty => write!(f, "must not be empty"),
            Validity::TooSmall { min, inclusive: true } => write!(f, "must be at least {min}"),
            Validity::TooSmall { min, inclusive: false } => write!(f, "must be greater than {min}"),
            Validity::TooBig { max, inclusive: true } => write!(f, "must be at most {max}"),
            Validity::TooBig { max, inclusive: false } => write!(f, "must be less than {max}"),
        }
    }
}

/// # One render request
/// Deserialized from JSON; every field is optional and falls back to the defaults below.
#[derive(Debug,Clone,PartialEq,Deserialize)]
#[serde(default)]
pub struct BingoConfig {
    pub title: String,
    pub card_size: usize,
    pub cell_size: usize,
    pub num_pages: usize,
    pub allow_duplicates: bool,
    /// standard font name or the file stem of a font under `fonts_dir`
    pub font: String,
    /// directory searched recursively for `*.ttf` / `*.otf` files
    pub fonts_dir: Option<PathBuf>,
    pub title_font_size: f32,
    pub item_font_size: f32,
    pub output_path: PathBuf,
    pub items_path: Option<PathBuf>,
    pub page_w: f32,
    pub page_h: f32,
    pub margin_ratio: f32,
    /// fixed seed for reproducible sheets, OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for BingoConfig {
    /// default settings:
    /// - 2 x 2 cards of 5 x 5 cells on 2 A4 pages
    /// - Helvetica, title 20pt, items 10pt
    /// - 5% margins, no duplicates
    fn default() -> Self {
        BingoConfig {
            title: "Bingo Card".to_string(),
            card_size: 2,
            cell_size: 5,
            num_pages: 2,
            allow_duplicates: false,
            font: "Helvetica".to_string(),
            fonts_dir: None,
            title_font_size: 20.0,
            item_font_size: 10.0,
            output_path: PathBuf::from("outputs/bingo.pdf"),
            items_path: None,
            page_w: A4_WIDTH,
            page_h: A4_HEIGHT,
            margin_ratio: 0.05,
            seed: None,
        }
    }
}

impl BingoConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        BingoConfig::from_json(&json)
    }

    /// per-field checks with the ranges the form front-end offered
    pub fn field_validity(&self) -> [(&'static str, Validity); 8] {
        [
            ("title", Validity::non_empty(&self.title)),
            ("card_size", Validity::range(self.card_size as f64, 1.0, 10.0)),
            ("cell_size", Validity::range(self.cell_size as f64, 2.0, 10.0)),
            ("num_pages", Validity::range(self.num_pages as f64, 1.0, 100.0)),
            ("font", Validity::non_empty(&self.font)),
            ("title_font_size", Validity::range(f64::from(self.title_font_size), 0.5, 50.0)),
            ("item_font_size", Validity::range(f64::from(self.item_font_size), 0.5, 50.0)),
            ("output_path", Validity::non_empty(&self.output_path.to_string_lossy())),
        ]
    }

    /// all fields valid and the font known to the standard fonts or `fonts_dir`
    pub fn validate(&self) -> Result<(), Error> {
        self.checked_fonts().map(|_| ())
    }

    /// standard fonts plus every font file under `fonts_dir`
    pub fn font_library(&self) -> Result<FontLibrary, Error> {
        match &self.fonts_dir {
            Some(dir) => Ok(FontLibrary::with_directory(FontDirectory::load(dir)?)),
            None => Ok(FontLibrary::new()),
        }
    }

    fn checked_fonts(&self) -> Result<FontLibrary, Error> {
        Validity::first_invalid(self.field_validity())?;

        let fonts = self.font_library()?;
        fonts.metrics(&self.font, self.item_font_size)?;

        Ok(fonts)
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            page_w: self.page_w,
            page_h: self.page_h,
            card_size: self.card_size,
            cell_size: self.cell_size,
            margin_ratio: self.margin_ratio,
            font_id: self.font.clone(),
            title_font_size: self.title_font_size,
            item_font_size: self.item_font_size,
        }
    }

    /// a pool too small to fill a card without repeats always allows duplicates
    pub fn content(&self, pool: ItemPool) -> BingoCardContent {
        let required = self.cell_size * self.cell_size;
        let allow_duplicates = self.allow_duplicates || pool.len() < required;

        if allow_duplicates && !self.allow_duplicates {
            warn!("only {} items for {required} cells, cards will contain duplicates", pool.len());
        }

        BingoCardContent::new(self.title.clone(), pool, allow_duplicates)
    }

    /// validates, renders every page to a PDF and returns where it was written
    pub fn generate(&self, pool: ItemPool) -> Result<PathBuf, Error> {
        let fonts = self.checked_fonts()?;

        let spec = LayoutSpec::new(self.layout_params())?;
        let content = self.content(pool);
        let destination = resolve_output_path(&self.output_path)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut writer = PdfWriter::new().with_title(&content.title).with_fonts(fonts.clone());

        Doc::new(&content, &spec, self.num_pages).render(&mut writer, &fonts, &mut rng, &destination)?;

        Ok(destination)
    }
}

/// appends `.pdf` when missing and creates the parent directory
pub fn resolve_output_path(path: &Path) -> Result<PathBuf, Error> {
    let mut resolved = path.to_path_buf();

    if !path.to_string_lossy().ends_with(".pdf") {
        let mut name = resolved.into_os_string();
        name.push(".pdf");
        resolved = PathBuf::from(name);
    }

    if let Some(parent) = resolved.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(resolved)
}
