// bingo-maker: generate printable bingo-card sheets as a PDF

use std::path::PathBuf;

use anyhow::{Context, Result};
use bingo_maker::types::{BingoConfig, ItemPool};
use clap::Parser;
use log::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate printable bingo-card sheets")]
struct Args {
    /// JSON file with the render settings, flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Text file with one item per line (blank lines and `#` comments are skipped)
    #[arg(short, long)]
    items: Option<PathBuf>,

    /// Title printed above every card
    #[arg(short, long)]
    title: Option<String>,

    /// Cards per side of a page
    #[arg(long)]
    card_size: Option<usize>,

    /// Cells per side of a card
    #[arg(long)]
    cell_size: Option<usize>,

    /// Number of pages
    #[arg(short, long)]
    pages: Option<usize>,

    /// Allow the same item more than once on a card
    #[arg(long)]
    allow_duplicates: bool,

    /// Font name: Helvetica, Helvetica-Bold, Times-Roman, Times-Bold, Courier, Courier-Bold,
    /// or the file stem of a font under --fonts-dir
    #[arg(short, long)]
    font: Option<String>,

    /// Directory searched recursively for *.ttf / *.otf fonts to embed
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    #[arg(long)]
    title_font_size: Option<f32>,

    #[arg(long)]
    item_font_size: Option<f32>,

    /// Output PDF path, `.pdf` is appended when missing
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for a reproducible sheet
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<BingoConfig> {
        let mut config = match &self.config {
            Some(path) => BingoConfig::load(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => BingoConfig::default(),
        };

        if let Some(items) = self.items { config.items_path = Some(items); }
        if let Some(title) = self.title { config.title = title; }
        if let Some(card_size) = self.card_size { config.card_size = card_size; }
        if let Some(cell_size) = self.cell_size { config.cell_size = cell_size; }
        if let Some(pages) = self.pages { config.num_pages = pages; }
        if self.allow_duplicates { config.allow_duplicates = true; }
        if let Some(font) = self.font { config.font = font; }
        if let Some(dir) = self.fonts_dir { config.fonts_dir = Some(dir); }
        if let Some(size) = self.title_font_size { config.title_font_size = size; }
        if let Some(size) = self.item_font_size { config.item_font_size = size; }
        if let Some(output) = self.output { config.output_path = output; }
        if let Some(seed) = self.seed { config.seed = Some(seed); }

        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Args::parse().into_config()?;
    config.validate().context("Invalid settings")?;

    let items_path = config
        .items_path
        .clone()
        .context("No item file given, pass --items or set items_path in the config")?;
    let pool = ItemPool::load(&items_path)
        .with_context(|| format!("Failed to load items from {}", items_path.display()))?;
    info!("{} distinct items loaded", pool.len());

    let written = config.generate(pool).context("Failed to generate the PDF")?;
    println!("{}", written.display());

    Ok(())
}
