use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Ensure the output directory exists, creating parents as needed
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        tracing::info!("Created directory: {}", dir.display());
    }
    Ok(())
}

/// `{row}_{image}.{ext}`, or `{row}_{image}` when there is no extension
pub fn output_file_name(row_index: usize, image_index: usize, extension: &str) -> String {
    if extension.is_empty() {
        format!("{}_{}", row_index, image_index)
    } else {
        format!("{}_{}.{}", row_index, image_index, extension)
    }
}

/// Extension of the last path segment of `url`, without the dot.
///
/// Query strings and fragments never contribute. Leading dots of the segment
/// are not extension separators, so `.hidden` and `..jpg` have none.
pub fn url_extension(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string(),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            path.rsplit('/').next().unwrap_or_default().to_string()
        }
    };

    // Leading dots belong to the stem (`.hidden`, `..jpg`).
    let stem_start = segment.len() - segment.trim_start_matches('.').len();
    match segment[stem_start..].rfind('.') {
        None => String::new(),
        Some(dot) => segment[stem_start + dot + 1..].to_string(),
    }
}

/// Write `bytes` to `target` through a `.part` sibling so an interrupted
/// write never leaves a file at the final name.
pub fn write_atomically(target: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = part_path(target);

    if let Err(e) = fs::write(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    fs::rename(&temp_path, target).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(target, e)
    })
}

fn part_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    target.with_file_name(name)
}
