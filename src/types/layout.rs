use log::debug;

use crate::types::{Error, Validity};

/// vertical space reserved above the grid for one title line, as a multiple of the title font size
pub const TITLE_LINE_FACTOR: f32 = 1.4;

/// Raw inputs of a layout, shared by every page and card of a render.
#[derive(Debug,Clone,PartialEq)]
pub struct LayoutParams {
    pub page_w: f32,
    pub page_h: f32,
    /// cards per side of a page
    pub card_size: usize,
    /// cells per side of a card
    pub cell_size: usize,
    /// fraction of the card width/height used as margin on each side
    pub margin_ratio: f32,
    pub font_id: String,
    pub title_font_size: f32,
    pub item_font_size: f32,
}

/// Card, grid and cell dimensions derived once from `LayoutParams`.
///
/// The derived fields are read-only; a different layout means building a new spec.
#[derive(Debug,Clone,PartialEq)]
pub struct LayoutSpec {
    params: LayoutParams,
    card_w: f32,
    card_h: f32,
    margin_w: f32,
    margin_h: f32,
    grid_w: f32,
    grid_h: f32,
    cell_w: f32,
    cell_h: f32,
}

impl LayoutSpec {
    /// derives the geometry and rejects layouts whose grid would have no area
    pub fn new(params: LayoutParams) -> Result<Self, Error> {
        check_params(&params)?;

        let spec = LayoutSpec::derive(params);

        if !(spec.grid_w > 0.0 && spec.grid_h > 0.0) {
            return Err(Error::DegenerateLayout { grid_w: spec.grid_w, grid_h: spec.grid_h });
        }

        debug!(
            "layout: card {}x{}, grid {}x{}, cell {}x{}",
            spec.card_w, spec.card_h, spec.grid_w, spec.grid_h, spec.cell_w, spec.cell_h
        );

        Ok(spec)
    }

    /// the formulas alone, no validation
    fn derive(params: LayoutParams) -> Self {
        let card_w = params.page_w / params.card_size as f32;
        let card_h = params.page_h / params.card_size as f32;
        let margin_w = card_w * params.margin_ratio;
        let margin_h = card_h * params.margin_ratio;
        let grid_w = card_w - 2.0 * margin_w;
        let grid_h = card_h - 2.0 * margin_h - params.title_font_size * TITLE_LINE_FACTOR;
        let cell_w = grid_w / params.cell_size as f32;
        let cell_h = grid_h / params.cell_size as f32;

        LayoutSpec {
            params,
            card_w,
            card_h,
            margin_w,
            margin_h,
            grid_w,
            grid_h,
            cell_w,
            cell_h,
        }
    }

    pub fn params(&self) -> &LayoutParams { &self.params }
    pub fn page_w(&self) -> f32 { self.params.page_w }
    pub fn page_h(&self) -> f32 { self.params.page_h }
    pub fn card_size(&self) -> usize { self.params.card_size }
    pub fn cell_size(&self) -> usize { self.params.cell_size }
    pub fn font_id(&self) -> &str { &self.params.font_id }
    pub fn title_font_size(&self) -> f32 { self.params.title_font_size }
    pub fn item_font_size(&self) -> f32 { self.params.item_font_size }
    pub fn card_w(&self) -> f32 { self.card_w }
    pub fn card_h(&self) -> f32 { self.card_h }
    pub fn margin_w(&self) -> f32 { self.margin_w }
    pub fn margin_h(&self) -> f32 { self.margin_h }
    pub fn grid_w(&self) -> f32 { self.grid_w }
    pub fn grid_h(&self) -> f32 { self.grid_h }
    pub fn cell_w(&self) -> f32 { self.cell_w }
    pub fn cell_h(&self) -> f32 { self.cell_h }

    /// lower left corners of every card on a page, row by row
    pub fn card_origins(&self) -> CardOrigins {
        CardOrigins {
            card_w: self.card_w,
            card_h: self.card_h,
            card_size: self.params.card_size,
            index: 0,
        }
    }
}

/// rejects inputs the formulas cannot make sense of
fn check_params(params: &LayoutParams) -> Result<(), Error> {
    let checks = [
        ("page_w", Validity::positive(params.page_w)),
        ("page_h", Validity::positive(params.page_h)),
        ("card_size", Validity::at_least(params.card_size as f64, 1.0)),
        ("cell_size", Validity::at_least(params.cell_size as f64, 1.0)),
        ("margin_ratio", Validity::ratio(params.margin_ratio)),
        ("title_font_size", Validity::positive(params.title_font_size)),
        ("item_font_size", Validity::positive(params.item_font_size)),
    ];

    Validity::first_invalid(checks)
}

/// Iterator over the card origins of one page; restart it by calling `card_origins` again.
#[derive(Debug,Clone)]
pub struct CardOrigins {
    card_w: f32,
    card_h: f32,
    card_size: usize,
    index: usize,
}

impl Iterator for CardOrigins {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.card_size * self.card_size {
            return None;
        }

        let row = self.index / self.card_size;
        let column = self.index % self.card_size;
        self.index += 1;

        Some((self.card_w * column as f32, self.card_h * row as f32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.card_size * self.card_size).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CardOrigins {}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LayoutParams {
        LayoutParams {
            page_w: 595.0,
            page_h: 842.0,
            card_size: 2,
            cell_size: 5,
            margin_ratio: 0.05,
            font_id: "Helvetica".to_string(),
            title_font_size: 20.0,
            item_font_size: 10.0,
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn derived_fields_follow_the_page() {
        let spec = LayoutSpec::new(params()).unwrap();

        assert!(close(spec.card_w() * 2.0, 595.0));
        assert!(close(spec.card_h() * 2.0, 842.0));
        assert!(close(spec.grid_w(), spec.card_w() - 2.0 * spec.margin_w()));
        assert!(close(spec.grid_h(), spec.card_h() - 2.0 * spec.margin_h() - 28.0));
        assert!(close(spec.cell_w() * 5.0, spec.grid_w()));
        assert!(close(spec.cell_h() * 5.0, spec.grid_h()));
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = LayoutSpec::new(params()).unwrap();
        let second = LayoutSpec::new(params()).unwrap();

        assert_eq!(first.grid_w().to_bits(), second.grid_w().to_bits());
        assert_eq!(first.cell_h().to_bits(), second.cell_h().to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn oversized_title_is_degenerate() {
        let mut p = params();
        p.title_font_size = 400.0;

        assert!(matches!(LayoutSpec::new(p), Err(Error::DegenerateLayout { .. })));
    }

    #[test]
    fn zero_cards_per_side_is_rejected() {
        let mut p = params();
        p.card_size = 0;

        assert!(matches!(LayoutSpec::new(p), Err(Error::InvalidField { field: "card_size", .. })));
    }

    #[test]
    fn margin_ratio_of_one_is_rejected() {
        let mut p = params();
        p.margin_ratio = 1.0;

        assert!(matches!(LayoutSpec::new(p), Err(Error::InvalidField { field: "margin_ratio", .. })));
    }

    #[test]
    fn origins_are_row_major() {
        let spec = LayoutSpec::new(params()).unwrap();
        let origins: Vec<(f32, f32)> = spec.card_origins().collect();

        assert_eq!(origins.len(), 4);
        assert_eq!(origins[0], (0.0, 0.0));
        assert_eq!(origins[1], (spec.card_w(), 0.0));
        assert_eq!(origins[2], (0.0, spec.card_h()));
        assert_eq!(origins[3], (spec.card_w(), spec.card_h()));
    }

    #[test]
    fn origins_restart_per_call() {
        let spec = LayoutSpec::new(params()).unwrap();
        let mut first = spec.card_origins();
        first.next();

        assert_eq!(first.len(), 3);
        assert_eq!(spec.card_origins().len(), 4);
    }
}
