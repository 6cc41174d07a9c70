//! Ways of finding out how large the selected file is.
//!
//! Current runtimes expose the size on the selected file handle. Old MSIE
//! releases (before 11) have no such handle, so the size is read from the
//! filesystem through the input's value instead. The selector only sees the
//! [`FileSizeReader`] trait; picking an implementation is up to the host.

use std::fs;

use anyhow::{anyhow, Context, Result};

use crate::{
    ui::FileInput,
    utils::units::{bytes_to_kb, kb_to_mb, mb_to_bytes},
};

/// Reads the size, in bytes, of the file currently selected in an input
pub trait FileSizeReader {
    fn size_bytes(&self, input: &dyn FileInput) -> Result<u64>;
}

/// Reads the size from the file handle exposed by the input
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSizeReader;

impl FileSizeReader for StandardSizeReader {
    fn size_bytes(&self, input: &dyn FileInput) -> Result<u64> {
        input
            .selected_file()
            .map(|file| file.size_bytes)
            .ok_or_else(|| anyhow!("No file handle available for the current selection"))
    }
}

/// Reads the size from the filesystem, using the input's value as a path.
///
/// The filesystem API reports kilobytes; the value goes through megabytes
/// and back to bytes so that both readers agree on the same file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySizeReader;

impl FileSizeReader for LegacySizeReader {
    fn size_bytes(&self, input: &dyn FileInput) -> Result<u64> {
        let path = input.value();
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to read file metadata for {}", path))?;

        let size_kb = bytes_to_kb(metadata.len() as f64);
        let size_mb = kb_to_mb(size_kb);

        Ok(mb_to_bytes(size_mb).round() as u64)
    }
}

/// Extracts the MSIE major version from a user agent, 0 for other browsers
pub fn msie_version(user_agent: &str) -> u32 {
    let Some(start) = user_agent.find("MSIE ") else {
        return 0;
    };

    let version = &user_agent[start + 5..];
    let end = version.find('.').unwrap_or(version.len());
    version[..end].trim().parse().unwrap_or(0)
}

/// Picks the reader suited to the browser identified by `user_agent`
pub fn reader_for_user_agent(user_agent: &str) -> Box<dyn FileSizeReader> {
    match msie_version(user_agent) {
        1..=10 => Box::new(LegacySizeReader),
        _ => Box::new(StandardSizeReader),
    }
}
