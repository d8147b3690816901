//! The dataset store.
//!
//! [`Store`] reads the configured file the first time the records are needed and keeps them for
//! as long as it lives. The position index is derived from the loaded records on demand and
//! cached the same way. Nothing is re-read until [`Store::reset`] is called.

mod index;
mod reader;
mod record;

pub use index::PositionIndex;
pub use record::{Dataset, Record};

use std::path::Path;

use once_cell::unsync::OnceCell;

use crate::{config::Config, debug, info, Result};

/// Memoised access to the dataset and its position index.
///
/// Not meant to be shared between threads: a store is built once and lent by reference to
/// whatever pages over it.
pub struct Store {
    config: Config,
    dataset: OnceCell<Dataset>,
    index: OnceCell<PositionIndex>,
}

impl Store {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dataset: OnceCell::new(),
            index: OnceCell::new(),
        }
    }

    /// Store over `path` with every other setting left to its default.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(Config::default().data_file(path.as_ref()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the dataset, reading the file on the first call only.
    pub fn load(&self) -> Result<&Dataset> {
        self.dataset.get_or_try_init(|| {
            let dataset = reader::read(&self.config.data_file, self.config.delimiter)?;
            info!(
                "loaded {} records from {}",
                dataset.len(),
                self.config.data_file.display()
            );

            Ok(dataset)
        })
    }

    /// Returns the position index over the first
    /// [`index_capacity`](Config::index_capacity) records.
    ///
    /// The index is built once: later changes to the capacity setting have no effect until
    /// [`reset`](Self::reset).
    pub fn indexed_view(&self) -> Result<&PositionIndex> {
        self.index.get_or_try_init(|| {
            let dataset = self.load()?;
            Ok(PositionIndex::build(dataset, self.config.index_capacity))
        })
    }

    /// Removes the record at `position` from the position index.
    ///
    /// The loaded dataset is untouched, so offset-based pages still see the record.
    pub fn delete(&mut self, position: usize) -> Result<Option<Record>> {
        self.indexed_view()?;

        let removed = self.index.get_mut().and_then(|index| index.remove(position));
        match &removed {
            Some(record) => debug!("deleted position {position}: {record}"),
            None => debug!("position {position} already absent"),
        }

        Ok(removed)
    }

    /// Drops the cached dataset and index so the next access reads the file again.
    pub fn reset(&mut self) {
        self.dataset.take();
        self.index.take();
        debug!("dataset cache reset");
    }
}
