use std::path::Path;

use log::{debug, info};
use rand::Rng;

use crate::{
    traits::{DrawingSink, FontMetricsProvider, Stroke},
    types::{
        BingoCardContent,
        Card,
        Error,
        LayoutSpec,
        TextBlockAligner,
}};

/// # Main entry point of the library
/// Renders `num_pages` pages of cards, every card with its own item selection.
pub struct Doc<'a> {
    pub content: &'a BingoCardContent,
    pub spec: &'a LayoutSpec,
    pub num_pages: usize,
}

impl<'a> Doc<'a> {
    pub fn new(content: &'a BingoCardContent, spec: &'a LayoutSpec, num_pages: usize) -> Self {
        Doc { content, spec, num_pages }
    }

    /// Draws every page into `sink` and finalizes it at `destination`.
    ///
    /// Font and pool problems are reported before the first page is opened. Any error aborts
    /// the render without calling `finalize`, so no partial document is ever persisted.
    pub fn render<S, F, R>(&self, sink: &mut S, fonts: &F, rng: &mut R, destination: &Path) -> Result<(), Error>
    where
        S: DrawingSink + ?Sized,
        F: FontMetricsProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let spec = self.spec;
        let (_, item_metrics) = fonts.metrics_pair(spec.font_id(), spec.title_font_size(), spec.item_font_size())?;
        let aligner = TextBlockAligner::new(item_metrics, spec.item_font_size());

        self.check_pool()?;

        let card = Card::new(self.content, spec, &aligner);

        for page in 0..self.num_pages {
            debug!("rendering page {} of {}", page + 1, self.num_pages);

            sink.open_page(spec.page_w(), spec.page_h())?;
            sink.set_stroke(Stroke::default())?;

            for origin in spec.card_origins() {
                card.draw(sink, origin, rng)?;
            }

            sink.close_page()?;
        }

        sink.finalize(destination)?;
        info!("wrote {} page(s) of bingo cards to {}", self.num_pages, destination.display());

        Ok(())
    }

    /// an empty pool is the only one the selector cannot fill a card from
    fn check_pool(&self) -> Result<(), Error> {
        let required = self.spec.cell_size() * self.spec.cell_size();
        let available = self.content.items.len();

        if available == 0 {
            return Err(Error::InsufficientItems { required, available });
        }

        Ok(())
    }
}
