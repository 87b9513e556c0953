//! Formatting helpers for directory listings.
//!
//! All metadata here is synthetic: the filesystem is simulated and read-only,
//! so permissions are fixed per node type and every entry shares one date
//! stamp.

use crate::config::LIST_DATE_STAMP;
use crate::core::filesystem::DirEntry;

/// Synthetic permission string for an entry.
pub fn permissions(is_dir: bool) -> &'static str {
    if is_dir { "drwxr-xr-x" } else { "-rw-r--r--" }
}

/// One line of `ls -l` output: type marker, permissions, size, date, name.
pub fn long_entry(entry: &DirEntry) -> String {
    let name = display_name(entry);
    format!(
        "{} {:>6} {} {}",
        permissions(entry.is_dir),
        entry.size,
        LIST_DATE_STAMP,
        name
    )
}

/// Entry name as displayed: directories get a trailing slash.
pub fn display_name(entry: &DirEntry) -> String {
    if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

/// Simple-mode `ls`: one line of names joined by double space.
pub fn short_listing(entries: &[DirEntry]) -> String {
    entries
        .iter()
        .map(display_name)
        .collect::<Vec<_>>()
        .join("  ")
}
