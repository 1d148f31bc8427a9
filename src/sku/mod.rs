use crate::utils::files::{output_file_name, url_extension};
use crate::utils::http::strip_share_marker;

pub mod literal;
pub mod table;

/// One row of the SKU table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub row_index: usize,
    pub image_urls: Vec<String>,
}

impl Record {
    /// Download units for this record, in image order.
    pub fn tasks(&self) -> impl Iterator<Item = DownloadTask<'_>> {
        self.image_urls
            .iter()
            .enumerate()
            .map(move |(image_index, url)| DownloadTask {
                row_index: self.row_index,
                image_index,
                url,
            })
    }
}

/// A single `(row, image, url)` unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadTask<'a> {
    pub row_index: usize,
    pub image_index: usize,
    pub url: &'a str,
}

impl DownloadTask<'_> {
    pub fn is_blank(&self) -> bool {
        self.url.trim().is_empty()
    }

    /// The URL actually requested: trimmed, with the share-link marker removed.
    pub fn request_url(&self) -> &str {
        strip_share_marker(self.url.trim())
    }

    pub fn extension(&self) -> String {
        url_extension(self.request_url())
    }

    pub fn file_name(&self) -> String {
        output_file_name(self.row_index, self.image_index, &self.extension())
    }
}
