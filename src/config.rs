//! Runtime configuration.
//!
//! Every setting has a default, can be changed through the builder methods and can be overridden
//! by the process environment with [`Config::from_env`].

use std::{env, io, path::PathBuf};

use crate::{
    error::Error,
    log::{self, Level},
    Result,
};

pub const DEFAULT_DATA_FILE: &str = "Popular_Baby_Names.csv";
pub const DEFAULT_LOG_FILE: &str = "folio.log";
/// How many leading records the position index materialises.
pub const DEFAULT_INDEX_CAPACITY: usize = 1000;

const ENV_DATA_FILE: &str = "FOLIO_DATA_FILE";
const ENV_DELIMITER: &str = "FOLIO_DELIMITER";
const ENV_INDEX_CAPACITY: &str = "FOLIO_INDEX_CAPACITY";
const ENV_LOG_LEVEL: &str = "FOLIO_LOG_LEVEL";
const ENV_LOG_FILE: &str = "FOLIO_LOG_FILE";

#[macro_export]
macro_rules! method_builder {
    ($field:ident, $ty:ty) => {
        pub fn $field(mut self, value: $ty) -> Self {
            self.$field = value;
            self
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Delimited file the dataset is loaded from. Its first row is a header.
    pub data_file: PathBuf,
    pub delimiter: u8,
    /// Capacity limit of the position index. `None` indexes the whole dataset.
    pub index_capacity: Option<usize>,
    pub log_level: Level,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            delimiter: b',',
            index_capacity: Some(DEFAULT_INDEX_CAPACITY),
            log_level: Level::Info,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    method_builder!(delimiter, u8);
    method_builder!(index_capacity, Option<usize>);
    method_builder!(log_level, Level);

    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Starts the process logger with this configuration's level and file.
    pub fn init_log(&self) -> io::Result<()> {
        log::init(self.log_level, &self.log_file)
    }

    /// Default configuration overlaid with the `FOLIO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().overlay(|key| env::var(key).ok())
    }

    fn overlay(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = var(ENV_DATA_FILE) {
            self.data_file = PathBuf::from(path);
        }

        if let Some(delimiter) = var(ENV_DELIMITER) {
            self.delimiter = match delimiter.as_bytes() {
                [byte] => *byte,
                _ => {
                    return Err(Error::invalid(format!(
                        "{ENV_DELIMITER} must be a single byte, got '{delimiter}'"
                    )))
                }
            };
        }

        if let Some(capacity) = var(ENV_INDEX_CAPACITY) {
            self.index_capacity = match capacity.trim() {
                "all" => None,
                value => Some(value.parse().map_err(|_| {
                    Error::invalid(format!(
                        "{ENV_INDEX_CAPACITY} must be an integer or 'all', got '{value}'"
                    ))
                })?),
            };
        }

        if let Some(level) = var(ENV_LOG_LEVEL) {
            self.log_level =
                Level::try_from(level.as_str()).map_err(|err| Error::invalid(err.to_string()))?;
        }

        if let Some(path) = var(ENV_LOG_FILE) {
            self.log_file = PathBuf::from(path);
        }

        Ok(self)
    }
}
