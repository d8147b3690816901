//! Pagination over a [`Store`].
//!
//! Two flavours are provided:
//!
//! - Offset pages ([`Paginator::get_page`] and [`Paginator::get_hyper`]) address records by
//!   page number. They're cheap but shift whenever a record before the current page goes away.
//! - Index pages ([`Paginator::get_hyper_index`]) address records by their original position in
//!   the [`PositionIndex`](crate::dataset::PositionIndex). A client resumes from the
//!   `next_index` it was handed, so deleting records between two requests never makes it skip
//!   or repeat an item.

use serde::Serialize;

use crate::{
    dataset::{Record, Store},
    error::Error,
    Result,
};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Offset page with hypermedia pointers to its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperPage {
    /// Number of records actually returned.
    pub page_size: usize,
    pub page: usize,
    pub data: Vec<Record>,
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
    pub total_pages: usize,
}

/// Index page, stable under deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperIndex {
    /// The position the walk started from.
    pub index: usize,
    /// Position to request the following page from.
    pub next_index: usize,
    /// Number of records actually returned.
    pub page_size: usize,
    pub data: Vec<Record>,
}

/// Half-open `[start, end)` bounds of `page` (starting at 1) for pages of `page_size` records.
pub fn range_for(page: usize, page_size: usize) -> Result<(usize, usize)> {
    validate(page, page_size)?;

    let end = page
        .checked_mul(page_size)
        .ok_or_else(|| Error::invalid(format!("page {page} of size {page_size} overflows")))?;

    Ok((end - page_size, end))
}

/// Converts a raw query value into a positive integer, falling back to `default` when absent.
pub fn parse_param(name: &str, raw: Option<&str>, default: usize) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    raw.trim()
        .parse()
        .map_err(|_| Error::invalid(format!("{name} must be a positive integer, got '{raw}'")))
}

fn validate(page: usize, page_size: usize) -> Result<()> {
    if page == 0 {
        return Err(Error::invalid("page must be greater than 0"));
    }
    if page_size == 0 {
        return Err(Error::invalid("page_size must be greater than 0"));
    }

    Ok(())
}

pub struct Paginator<'s> {
    store: &'s Store,
}

impl<'s> Paginator<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }

    /// Records of `page`. Pages past the end of the dataset are empty.
    pub fn get_page(&self, page: usize, page_size: usize) -> Result<&'s [Record]> {
        let (start, end) = range_for(page, page_size)?;
        let dataset = self.store.load()?;

        let start = start.min(dataset.len());
        let end = end.min(dataset.len());

        Ok(&dataset[start..end])
    }

    pub fn get_hyper(&self, page: usize, page_size: usize) -> Result<HyperPage> {
        let data = self.get_page(page, page_size)?.to_vec();
        let total_pages = self.store.load()?.len().div_ceil(page_size);

        Ok(HyperPage {
            page_size: data.len(),
            page,
            data,
            next_page: page.checked_add(1).filter(|next| *next <= total_pages),
            prev_page: Some(page - 1).filter(|prev| *prev > 0),
            total_pages,
        })
    }

    /// Collects up to `page_size` records walking the position index upwards from `index`
    /// (0 when `None`), skipping deleted positions.
    ///
    /// `next_index` is the position right after the last record returned, or the end of the
    /// index domain when nothing is left.
    pub fn get_hyper_index(&self, index: Option<usize>, page_size: usize) -> Result<HyperIndex> {
        let index = index.unwrap_or(0);
        if page_size == 0 {
            return Err(Error::invalid("page_size must be greater than 0"));
        }

        let positions = self.store.indexed_view()?;
        if index >= positions.domain() {
            return Err(Error::invalid(format!(
                "index {index} is out of range [0, {})",
                positions.domain()
            )));
        }

        let mut next_index = positions.domain();
        let mut data = Vec::with_capacity(page_size.min(positions.len()));

        for (position, record) in positions.from_position(index).take(page_size) {
            data.push(record.clone());
            next_index = position + 1;
        }

        Ok(HyperIndex {
            index,
            next_index,
            page_size: data.len(),
            data,
        })
    }
}
