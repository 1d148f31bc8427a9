use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::sku::literal::parse_string_list;
use crate::sku::Record;

/// The image-list column of a SKU table, loaded in file order.
///
/// Rows are kept as raw text; each one is parsed only when [`Table::records`]
/// reaches it, so a malformed row is reported with its position and does not
/// prevent earlier rows from being processed.
#[derive(Debug)]
pub struct Table {
    path: PathBuf,
    values: Vec<String>,
}

impl Table {
    /// Read a CSV file with a header row and keep the `column` value of every row.
    pub fn load(path: impl AsRef<Path>, column: &str) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |source| Error::Load {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(load_error)?;

        let index = reader
            .headers()
            .map_err(load_error)?
            .iter()
            .position(|header| header.trim() == column)
            .ok_or_else(|| Error::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })?;

        let mut values = Vec::new();
        for row in reader.records() {
            let row = row.map_err(load_error)?;
            values.push(row.get(index).unwrap_or_default().to_string());
        }

        tracing::debug!(path = %path.display(), rows = values.len(), "loaded table");

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse rows lazily into records, numbering them from zero.
    pub fn records(&self) -> impl Iterator<Item = Result<Record>> + '_ {
        self.values.iter().enumerate().map(|(row, value)| {
            parse_string_list(value)
                .map(|image_urls| Record {
                    row_index: row,
                    image_urls,
                })
                .map_err(|source| Error::Parse { row, source })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_table(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_image_column_in_row_order() {
        let file = write_table(
            ",sku,images\n\
             0,A1,\"['http://x.test/a.jpg', '']\"\n\
             1,B2,\"[]\"\n",
        );

        let table = Table::load(file.path(), "images").unwrap();
        assert_eq!(table.len(), 2);

        let records: Vec<_> = table.records().map(|r| r.unwrap()).collect();
        assert_eq!(records[0].row_index, 0);
        assert_eq!(records[0].image_urls, vec!["http://x.test/a.jpg", ""]);
        assert_eq!(records[1].row_index, 1);
        assert!(records[1].image_urls.is_empty());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Table::load(dir.path().join("nope.csv"), "images").unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn ragged_rows_are_a_load_error() {
        let file = write_table("sku,images\nA1,\"[]\",extra\n");
        let err = Table::load(file.path(), "images").unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn unknown_column_is_reported() {
        let file = write_table("sku,pictures\nA1,\"[]\"\n");
        match Table::load(file.path(), "images").unwrap_err() {
            Error::MissingColumn { column, .. } => assert_eq!(column, "images"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_row_fails_only_at_its_position() {
        let file = write_table(
            "sku,images\n\
             A1,\"['http://x.test/a.jpg']\"\n\
             B2,\"['http://x.test/b.jpg'\"\n",
        );

        let table = Table::load(file.path(), "images").unwrap();
        let mut records = table.records();

        assert!(records.next().unwrap().is_ok());
        match records.next().unwrap().unwrap_err() {
            Error::Parse { row, .. } => assert_eq!(row, 1),
            other => panic!("unexpected error: {other}"),
        }
        assert!(records.next().is_none());
    }
}
