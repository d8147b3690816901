use error::Error;

pub mod config;
pub mod dataset;
pub mod error;
pub mod log;
pub mod pagination;
pub mod preference;

pub use config::Config;
pub use dataset::{Dataset, PositionIndex, Record, Store};
pub use pagination::{range_for, HyperIndex, HyperPage, Paginator};

pub type Result<T> = std::result::Result<T, Error>;
