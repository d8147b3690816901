//! Delimited file reading.
//!
//! Every column is read as UTF-8 text: the header row only provides the column count and is
//! discarded afterwards.

use std::{
    fs::File,
    io::{Seek, SeekFrom},
    path::Path,
    sync::Arc,
};

use arrow::{
    array::{Array, AsArray},
    csv::reader::{Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};

use super::record::{Dataset, Record};
use crate::{error::Error, Result};

pub(super) fn read(path: &Path, delimiter: u8) -> Result<Dataset> {
    let unavailable = |source| Error::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let malformed = |source| Error::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(unavailable)?;
    let format = Format::default()
        .with_header(true)
        .with_delimiter(delimiter);

    let (header, _) = format.infer_schema(&mut file, Some(0)).map_err(|err| match err {
        ArrowError::IoError(_, source) => unavailable(source),
        other => malformed(other),
    })?;

    if header.fields().is_empty() {
        return Ok(Dataset::default());
    }

    let schema = Schema::new(
        header
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );

    file.seek(SeekFrom::Start(0)).map_err(unavailable)?;
    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .build(file)
        .map_err(malformed)?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch.map_err(malformed)?;
        append_rows(&batch, &mut records);
    }

    Ok(Dataset::from(records))
}

fn append_rows(batch: &RecordBatch, records: &mut Vec<Record>) {
    let columns: Vec<_> = batch
        .columns()
        .iter()
        .map(|column| column.as_string::<i32>())
        .collect();

    records.extend((0..batch.num_rows()).map(|row| {
        columns
            .iter()
            .map(|column| {
                if column.is_null(row) {
                    String::new()
                } else {
                    column.value(row).to_owned()
                }
            })
            .collect()
    }));
}
