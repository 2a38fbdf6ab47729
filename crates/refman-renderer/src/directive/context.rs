//! Context handed to directive handlers.

use std::io;
use std::path::{Path, PathBuf};

/// Information about the source being processed, available to every
/// handler invocation.
pub struct DirectiveContext<'a> {
    /// Path of the page being rendered, when known.
    pub source_path: Option<&'a Path>,
    /// Directory that relative paths resolve against.
    pub base_dir: &'a Path,
    /// One-based line number of the directive occurrence.
    pub line: usize,
    /// File reader used for directives that pull in other sources.
    pub read_file: &'a dyn Fn(&Path) -> io::Result<String>,
}

impl DirectiveContext<'_> {
    /// Resolve a path relative to the source file when one is set,
    /// otherwise relative to the base directory. Absolute paths are
    /// returned untouched.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.source_path.and_then(Path::parent) {
            Some(dir) => dir.join(path),
            None => self.base_dir.join(path),
        }
    }

    /// Resolve a path and refuse anything that escapes the base
    /// directory. Both sides are canonicalized, so the target must
    /// exist for the check to pass.
    pub fn resolve_path_safe(&self, path: &str) -> io::Result<PathBuf> {
        let resolved = self.resolve_path(path).canonicalize()?;
        let base = self.base_dir.canonicalize()?;
        if resolved.starts_with(&base) {
            Ok(resolved)
        } else {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("path escapes source directory: {path}"),
            ))
        }
    }

    /// Read a file through the configured reader.
    pub fn read(&self, path: &Path) -> io::Result<String> {
        (self.read_file)(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn context<'a>(
        base_dir: &'a Path,
        source_path: Option<&'a Path>,
        read_file: &'a dyn Fn(&Path) -> io::Result<String>,
    ) -> DirectiveContext<'a> {
        DirectiveContext {
            source_path,
            base_dir,
            line: 1,
            read_file,
        }
    }

    #[test]
    fn resolve_relative_to_base_dir() {
        let read = |_: &Path| Ok(String::new());
        let ctx = context(Path::new("/docs"), None, &read);
        assert_eq!(ctx.resolve_path("intro.md"), PathBuf::from("/docs/intro.md"));
    }

    #[test]
    fn resolve_relative_to_source_file() {
        let read = |_: &Path| Ok(String::new());
        let source = Path::new("/docs/api/conn.md");
        let ctx = context(Path::new("/docs"), Some(source), &read);
        assert_eq!(
            ctx.resolve_path("shared.md"),
            PathBuf::from("/docs/api/shared.md")
        );
    }

    #[test]
    fn resolve_absolute_passes_through() {
        let read = |_: &Path| Ok(String::new());
        let ctx = context(Path::new("/docs"), None, &read);
        assert_eq!(ctx.resolve_path("/etc/motd"), PathBuf::from("/etc/motd"));
    }

    #[test]
    fn resolve_safe_rejects_escape() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("docs");
        std::fs::create_dir(&base).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "no").unwrap();

        let read = |_: &Path| Ok(String::new());
        let ctx = context(&base, None, &read);
        let err = ctx.resolve_path_safe("../secret.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn resolve_safe_accepts_inside() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("docs");
        std::fs::create_dir(&base).unwrap();
        std::fs::write(base.join("frag.md"), "text").unwrap();

        let read = |_: &Path| Ok(String::new());
        let ctx = context(&base, None, &read);
        let resolved = ctx.resolve_path_safe("frag.md").unwrap();
        assert!(resolved.ends_with("frag.md"));
    }

    #[test]
    fn read_uses_configured_reader() {
        let read = |path: &Path| Ok(format!("read {}", path.display()));
        let ctx = context(Path::new("/docs"), None, &read);
        assert_eq!(ctx.read(Path::new("a.md")).unwrap(), "read a.md");
    }
}
