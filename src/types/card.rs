use rand::Rng;

use crate::{
    traits::DrawingSink,
    types::{
        split_item_lines,
        BingoCardContent,
        Error,
        LayoutSpec,
        TextBlockAligner,
}};

/// Draws a single card: title, grid and cell text, anchored at the card's lower left corner.
pub struct Card<'a> {
    pub content: &'a BingoCardContent,
    pub spec: &'a LayoutSpec,
    /// positions item lines, built from the item font metrics
    pub aligner: &'a TextBlockAligner,
}

impl<'a> Card<'a> {
    pub fn new(content: &'a BingoCardContent, spec: &'a LayoutSpec, aligner: &'a TextBlockAligner) -> Self {
        Card { content, spec, aligner }
    }

    /// draws the card with a fresh item selection taken from `rng`
    pub fn draw<S, R>(&self, sink: &mut S, origin: (f32, f32), rng: &mut R) -> Result<(), Error>
    where
        S: DrawingSink + ?Sized,
        R: Rng + ?Sized,
    {
        self.draw_title(sink, origin)?;
        self.draw_grid(sink, origin)?;

        let items = self.content.pick_cell_items(self.spec.cell_size(), rng)?;
        self.draw_items(sink, origin, &items)
    }

    fn draw_title<S: DrawingSink + ?Sized>(&self, sink: &mut S, (origin_x, origin_y): (f32, f32)) -> Result<(), Error> {
        let spec = self.spec;

        sink.centered_string(
            origin_x + spec.card_w() / 2.0,
            origin_y + spec.card_h() - spec.margin_h() - spec.title_font_size(),
            &self.content.title,
            spec.font_id(),
            spec.title_font_size(),
        )
    }

    /// border plus `cell_size + 1` lines in each direction
    fn draw_grid<S: DrawingSink + ?Sized>(&self, sink: &mut S, (origin_x, origin_y): (f32, f32)) -> Result<(), Error> {
        let spec = self.spec;
        let left = origin_x + spec.margin_w();
        let bottom = origin_y + spec.margin_h();
        let right = left + spec.grid_w();
        let top = bottom + spec.grid_h();

        sink.rect(left, bottom, spec.grid_w(), spec.grid_h(), false)?;

        for i in 0..=spec.cell_size() {
            let x = left + i as f32 * spec.cell_w();
            sink.line(x, bottom, x, top)?;

            let y = bottom + i as f32 * spec.cell_h();
            sink.line(left, y, right, y)?;
        }

        Ok(())
    }

    /// `items` is indexed column by column: the row advances before the column does
    fn draw_items<S: DrawingSink + ?Sized>(&self, sink: &mut S, (origin_x, origin_y): (f32, f32), items: &[&str]) -> Result<(), Error> {
        let spec = self.spec;
        let cell_size = spec.cell_size();
        let required = cell_size * cell_size;

        if items.len() < required {
            return Err(Error::InsufficientItems { required, available: items.len() });
        }

        for xi in 0..cell_size {
            let x = origin_x + spec.margin_w() + spec.cell_w() / 2.0 + xi as f32 * spec.cell_w();

            for yi in 0..cell_size {
                let y = origin_y + spec.margin_h() + spec.cell_h() / 2.0 + yi as f32 * spec.cell_h();

                let lines = split_item_lines(items[xi * cell_size + yi]);

                for (line, baseline) in lines.iter().zip(self.aligner.line_y_positions(lines.len(), y)) {
                    sink.centered_string(x, baseline, line, spec.font_id(), spec.item_font_size())?;
                }
            }
        }

        Ok(())
    }
}
