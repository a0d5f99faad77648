use std::{collections::HashSet, path::Path};

use bingo_maker::{
    traits::FontMetricsProvider,
    types::{
        select_cell_items, BingoCardContent, BingoConfig, Doc, DrawOp, Error, ItemPool, LayoutParams,
        LayoutSpec, Recorder, StandardFonts,
    },
};
use rand::{rngs::StdRng, SeedableRng};

fn layout(card_size: usize, cell_size: usize) -> LayoutSpec {
    LayoutSpec::new(LayoutParams {
        page_w: 595.0,
        page_h: 842.0,
        card_size,
        cell_size,
        margin_ratio: 0.05,
        font_id: "Helvetica".to_string(),
        title_font_size: 20.0,
        item_font_size: 10.0,
    })
    .unwrap()
}

fn content(items: &[&str], allow_duplicates: bool) -> BingoCardContent {
    BingoCardContent {
        title: "BINGO".to_string(),
        items: items.iter().map(|item| item.to_string()).collect(),
        allow_duplicates,
    }
}

fn render(content: &BingoCardContent, spec: &LayoutSpec, pages: usize, seed: u64) -> Result<Recorder, Error> {
    let mut recorder = Recorder::new();
    let mut rng = StdRng::seed_from_u64(seed);
    Doc::new(content, spec, pages).render(&mut recorder, &StandardFonts, &mut rng, Path::new("out.pdf"))?;
    Ok(recorder)
}

/// item texts of a page, title lines excluded
fn item_texts<'a>(ops: &'a [DrawOp], title: &str) -> Vec<&'a str> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } if text != title => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

const NINE: [&str; 9] = ["ant", "bee", "cat", "dog", "eel", "fox", "gnu", "hen", "ibis"];

#[test]
fn single_card_with_exact_pool_uses_every_item_once() {
    let spec = layout(1, 3);
    let content = content(&NINE, false);
    let recorder = render(&content, &spec, 1, 5).unwrap();

    let pages = recorder.pages();
    assert_eq!(pages.len(), 1);

    let page = pages[0];
    let rects = page.iter().filter(|op| matches!(op, DrawOp::Rect { filled: false, .. })).count();
    assert_eq!(rects, 1);

    let vertical = page.iter().filter(|op| matches!(op, DrawOp::Line { x1, x2, .. } if x1 == x2)).count();
    let horizontal = page.iter().filter(|op| matches!(op, DrawOp::Line { y1, y2, .. } if y1 == y2)).count();
    assert_eq!(vertical, 4);
    assert_eq!(horizontal, 4);

    let items = item_texts(page, "BINGO");
    let unique: HashSet<&str> = items.iter().copied().collect();
    assert_eq!(items.len(), 9);
    assert_eq!(unique, NINE.iter().copied().collect());
    assert!(recorder.is_finalized());
}

#[test]
fn small_pool_falls_back_to_duplicates() {
    let spec = layout(1, 3);
    let content = content(&["red", "green", "blue"], false);
    let recorder = render(&content, &spec, 1, 8).unwrap();

    let items = item_texts(recorder.pages()[0], "BINGO");
    assert_eq!(items.len(), 9);
    assert!(items.iter().all(|item| ["red", "green", "blue"].contains(item)));
}

#[test]
fn multi_line_item_is_centered_in_its_cell() {
    let spec = layout(1, 1);
    let content = content(&["apple/banana\\cherry"], false);
    let recorder = render(&content, &spec, 1, 0).unwrap();

    let lines: Vec<(&str, f32, f32)> = recorder
        .texts()
        .filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } if text != "BINGO" => Some((text.as_str(), *x, *y)),
            _ => None,
        })
        .collect();

    assert_eq!(lines.iter().map(|line| line.0).collect::<Vec<_>>(), ["apple", "banana", "cherry"]);

    let metrics = StandardFonts.metrics("Helvetica", 10.0).unwrap();
    let center_x = spec.margin_w() + spec.cell_w() / 2.0;
    let center_y = spec.margin_h() + spec.cell_h() / 2.0;
    let top = lines[0].2 + metrics.ascent;
    let bottom = lines[2].2 - metrics.descent;

    assert!(((top + bottom) / 2.0 - center_y).abs() < 1e-3);
    assert!(((lines[0].2 - lines[1].2) - 12.0).abs() < 1e-3);
    assert!(lines.iter().all(|line| (line.1 - center_x).abs() < 1e-3));
}

#[test]
fn every_card_on_every_page_is_drawn() {
    let spec = layout(2, 5);
    let items: Vec<String> = (0..40).map(|i| format!("item {i}")).collect();
    let refs: Vec<&str> = items.iter().map(String::as_str).collect();
    let content = content(&refs, false);
    let recorder = render(&content, &spec, 3, 21).unwrap();

    let pages = recorder.pages();
    assert_eq!(pages.len(), 3);

    for page in pages {
        let titles = page.iter().filter(|op| matches!(op, DrawOp::Text { text, .. } if text == "BINGO")).count();
        let rects = page.iter().filter(|op| matches!(op, DrawOp::Rect { .. })).count();
        assert_eq!(titles, 4);
        assert_eq!(rects, 4);
        assert_eq!(item_texts(page, "BINGO").len(), 4 * 25);
        assert!(matches!(page[0], DrawOp::SetStroke(_)));
    }
}

#[test]
fn title_sits_above_the_grid() {
    let spec = layout(1, 3);
    let recorder = render(&content(&NINE, false), &spec, 1, 1).unwrap();

    let title = recorder.texts().find_map(|op| match op {
        DrawOp::Text { text, x, y, font_size, .. } if text == "BINGO" => Some((*x, *y, *font_size)),
        _ => None,
    });
    let (x, y, size) = title.unwrap();

    assert!((x - 595.0 / 2.0).abs() < 1e-3);
    assert!((y - (842.0 - spec.margin_h() - 20.0)).abs() < 1e-3);
    assert!(y > spec.margin_h() + spec.grid_h());
    assert_eq!(size, 20.0);
}

#[test]
fn items_fill_column_by_column() {
    let spec = layout(1, 2);
    let content = content(&["w", "x", "y", "z"], false);
    let recorder = render(&content, &spec, 1, 3).unwrap();

    let positions: Vec<(f32, f32)> = recorder
        .texts()
        .filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } if text != "BINGO" => Some((*x, *y)),
            _ => None,
        })
        .collect();

    // first column bottom to top, then second column
    assert_eq!(positions.len(), 4);
    assert!((positions[0].0 - positions[1].0).abs() < 1e-3);
    assert!(positions[1].1 > positions[0].1);
    assert!(positions[2].0 > positions[1].0);
}

/// (text, card column, card row, cell column, cell row) of every item line
fn item_cells<'a>(ops: &'a [DrawOp], spec: &LayoutSpec, title: &str) -> Vec<(&'a str, usize, usize, usize, usize)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } if text != title => {
                let card_x = (x / spec.card_w()).floor();
                let card_y = (y / spec.card_h()).floor();
                let cell_x = ((x - card_x * spec.card_w() - spec.margin_w()) / spec.cell_w()).floor();
                let cell_y = ((y - card_y * spec.card_h() - spec.margin_h()) / spec.cell_h()).floor();
                Some((text.as_str(), card_x as usize, card_y as usize, cell_x as usize, cell_y as usize))
            },
            _ => None,
        })
        .collect()
}

#[test]
fn selection_order_maps_to_cells_column_by_column() {
    let spec = layout(1, 3);
    let content = content(&NINE, false);
    let recorder = render(&content, &spec, 1, 17).unwrap();

    let mut rng = StdRng::seed_from_u64(17);
    let expected = select_cell_items(&content.items, false, 3, &mut rng).unwrap();

    let drawn = item_cells(recorder.pages()[0], &spec, "BINGO");
    assert_eq!(drawn.len(), 9);

    for (i, item) in expected.iter().enumerate() {
        let cell = drawn
            .iter()
            .find(|(_, _, _, cell_x, cell_y)| (*cell_x, *cell_y) == (i / 3, i % 3))
            .unwrap();
        assert_eq!(cell.0, *item, "cell ({}, {})", i / 3, i % 3);
    }
}

#[test]
fn cards_take_their_selections_in_row_major_order() {
    let spec = layout(2, 2);
    let content = content(&NINE, false);
    let recorder = render(&content, &spec, 1, 23).unwrap();
    let drawn = item_cells(recorder.pages()[0], &spec, "BINGO");

    let mut rng = StdRng::seed_from_u64(23);

    for (card_x, card_y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let expected = select_cell_items(&content.items, false, 2, &mut rng).unwrap();

        for (i, item) in expected.iter().enumerate() {
            let cell = drawn
                .iter()
                .find(|cell| (cell.1, cell.2, cell.3, cell.4) == (card_x, card_y, i / 2, i % 2))
                .unwrap();
            assert_eq!(cell.0, *item);
        }
    }
}

#[test]
fn same_seed_same_sheet() {
    let spec = layout(2, 4);
    let items: Vec<String> = (0..30).map(|i| format!("word {i}")).collect();
    let refs: Vec<&str> = items.iter().map(String::as_str).collect();
    let content = content(&refs, false);

    let first = render(&content, &spec, 2, 99).unwrap();
    let second = render(&content, &spec, 2, 99).unwrap();
    assert_eq!(first.ops, second.ops);
}

#[test]
fn unknown_font_fails_before_any_page() {
    let mut params = layout(1, 3).params().clone();
    params.font_id = "Papyrus".to_string();
    let spec = LayoutSpec::new(params).unwrap();

    let mut recorder = Recorder::new();
    let mut rng = StdRng::seed_from_u64(0);
    let result = Doc::new(&content(&NINE, false), &spec, 1).render(&mut recorder, &StandardFonts, &mut rng, Path::new("x.pdf"));

    assert!(matches!(result, Err(Error::UnknownFont(_))));
    assert!(recorder.ops.is_empty());
}

#[test]
fn empty_pool_fails_before_any_page() {
    let spec = layout(1, 3);
    let mut recorder = Recorder::new();
    let mut rng = StdRng::seed_from_u64(0);
    let result = Doc::new(&content(&[], false), &spec, 1).render(&mut recorder, &StandardFonts, &mut rng, Path::new("x.pdf"));

    assert!(matches!(result, Err(Error::InsufficientItems { required: 9, available: 0 })));
    assert!(recorder.ops.is_empty());
}

#[test]
fn generate_writes_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let config = BingoConfig {
        title: "Fruit Bingo".to_string(),
        card_size: 1,
        cell_size: 3,
        num_pages: 2,
        output_path: dir.path().join("sheets").join("fruit"),
        seed: Some(4),
        ..BingoConfig::default()
    };
    let pool = ItemPool::parse("apple\nbanana/split\ncherry\ndate\nelderberry\nfig\ngrape\nhoneydew\nkiwi\n").unwrap();

    let written = config.generate(pool).unwrap();
    assert_eq!(written, dir.path().join("sheets").join("fruit.pdf"));

    let bytes = std::fs::read(&written).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(text.contains("/Count 2"));
    assert!(text.contains("(Fruit Bingo)"));
}

#[test]
fn invalid_config_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = BingoConfig {
        cell_size: 1,
        output_path: dir.path().join("never.pdf"),
        ..BingoConfig::default()
    };
    let pool = ItemPool::parse("one\n").unwrap();

    assert!(matches!(config.generate(pool), Err(Error::InvalidField { field: "cell_size", .. })));
    assert!(!dir.path().join("never.pdf").exists());
}
