use std::{collections::BTreeSet, path::Path};

use log::debug;
use rand::{seq::index, Rng};
use serde::Deserialize;

use crate::types::Error;

/// What goes on every card of a render: the title and the pool cells are filled from.
/// Built once per render and never mutated while drawing.
#[derive(Debug,Clone,PartialEq,Deserialize)]
pub struct BingoCardContent {
    pub title: String,
    pub items: Vec<String>,
   #[serde(default, rename = "allowDuplicates")]
    pub allow_duplicates: bool,
}

impl BingoCardContent {
    pub fn new(title: impl Into<String>, items: ItemPool, allow_duplicates: bool) -> Self {
        BingoCardContent {
            title: title.into(),
            items: items.into_items(),
            allow_duplicates,
        }
    }

    /// picks the `cell_size²` strings for one card
    pub fn pick_cell_items<R: Rng + ?Sized>(&self, cell_size: usize, rng: &mut R) -> Result<Vec<&str>, Error> {
        select_cell_items(&self.items, self.allow_duplicates, cell_size, rng)
    }
}

/// Draws `cell_size²` items from `pool`.
///
/// With `allow_duplicates`, or when the pool is too small to fill the card without repeats,
/// every cell is an independent uniform pick over the whole pool. Otherwise the result is a
/// uniformly random ordered subset with no repeats.
pub fn select_cell_items<'a, R: Rng + ?Sized>(
    pool: &'a [String],
    allow_duplicates: bool,
    cell_size: usize,
    rng: &mut R,
) -> Result<Vec<&'a str>, Error> {
    let required = cell_size * cell_size;

    if required == 0 {
        return Ok(Vec::new());
    }

    // nothing can be drawn, not even with replacement
    if pool.is_empty() {
        return Err(Error::InsufficientItems { required, available: 0 });
    }

    if allow_duplicates || pool.len() < required {
        if !allow_duplicates {
            debug!("pool of {} is smaller than {required} cells, drawing with replacement", pool.len());
        }

        let picks = (0..required)
            .map(|_| pool[rng.random_range(0..pool.len())].as_str())
            .collect();

        return Ok(picks);
    }

    sample_distinct(pool, required, rng)
}

fn sample_distinct<'a, R: Rng + ?Sized>(pool: &'a [String], required: usize, rng: &mut R) -> Result<Vec<&'a str>, Error> {
    if pool.len() < required {
        return Err(Error::InsufficientItems { required, available: pool.len() });
    }

    // indices come back fully shuffled
    let picks = index::sample(rng, pool.len(), required)
        .into_iter()
        .map(|i| pool[i].as_str())
        .collect();

    Ok(picks)
}

/// Deduplicated, sorted item strings read from a line-oriented source.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct ItemPool(Vec<String>);

impl ItemPool {
    /// one item per line: surrounding whitespace is trimmed, blank lines and lines starting
    /// with `#` are skipped
    pub fn parse(text: &str) -> Result<Self, Error> {
        let items: BTreeSet<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        if items.is_empty() {
            return Err(Error::EmptyItemPool);
        }

        Ok(ItemPool(items.into_iter().map(String::from).collect()))
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        let pool = ItemPool::parse(&text)?;
        debug!("loaded {} distinct items from {}", pool.len(), path.display());

        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_items(self) -> Vec<String> {
        self.0
    }
}
