use std::io;
use std::path::PathBuf;

use crate::sku::literal::ListSyntaxError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The table file is missing, unreadable or not valid CSV.
    #[error("failed to load table {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The header row does not name the image-list column.
    #[error("table {} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A row's image column is not a list-of-strings literal.
    #[error("row {row}: malformed image list: {source}")]
    Parse {
        row: usize,
        #[source]
        source: ListSyntaxError,
    },

    /// Transport failure: connect, timeout or a broken body.
    #[error("request failed for URL {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} for URL: {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Creating the output directory or writing an image failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
