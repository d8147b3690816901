use std::{fmt::Display, ops::Deref, rc::Rc};

use serde::Serialize;

/// A single row of the dataset.
///
/// Fields are shared, so cloning a record into a page never copies its strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Record(Rc<[String]>);

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields.into())
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl Deref for Record {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// The loaded rows in file order. A record's position never changes once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset(Vec<Record>);

impl Dataset {
    pub fn records(&self) -> &[Record] {
        &self.0
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

impl Deref for Dataset {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
