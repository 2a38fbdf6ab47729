//! Source tree discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A markdown source file found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    /// Path relative to the source directory, with `/` separators.
    pub rel: String,
    /// Filesystem path to the source file.
    pub path: PathBuf,
}

/// Recursively collect all `.md` files under `source_dir`.
///
/// Hidden entries (names starting with `.`) are skipped. Results are
/// sorted by relative path so builds are deterministic.
pub fn scan_pages(source_dir: &Path) -> io::Result<Vec<SourcePage>> {
    let mut pages = Vec::new();
    walk(source_dir, Path::new(""), &mut pages)?;
    pages.sort_by(|a, b| a.rel.cmp(&b.rel));
    Ok(pages)
}

fn walk(dir: &Path, rel: &Path, pages: &mut Vec<SourcePage>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let entry_rel = rel.join(&name);
        if path.is_dir() {
            walk(&path, &entry_rel, pages)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            pages.push(SourcePage {
                rel: to_rel_string(&entry_rel),
                path,
            });
        }
    }
    Ok(())
}

fn to_rel_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
