//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::syntax::Span;
use crate::types::Location;

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Builds a [`Location`] for `span`, with 1-indexed line and column.
    ///
    /// Columns count characters, not bytes. Offsets past the end of the
    /// content are clamped to the end.
    #[must_use]
    pub fn location_for(&self, span: Span) -> Location {
        let offset = span.start.min(self.content.len());
        let before = self.content.get(..offset).unwrap_or(self.content);

        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;

        Location::new(self.relative_path.clone(), line, column).with_span(offset, span.len())
    }

    /// Returns the source text covered by `span`.
    #[must_use]
    pub fn text(&self, span: Span) -> &'a str {
        span.text(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(content: &str) -> FileContext<'_> {
        FileContext::new(Path::new("/repo/lib/foo.rb"), content, Path::new("/repo"))
    }

    #[test]
    fn relative_path_strips_root() {
        assert_eq!(ctx("").relative_path, PathBuf::from("lib/foo.rb"));
    }

    #[test]
    fn relative_path_falls_back_to_full_path() {
        let c = FileContext::new(Path::new("/other/foo.rb"), "", Path::new("/repo"));
        assert_eq!(c.relative_path, PathBuf::from("/other/foo.rb"));
    }

    #[test]
    fn location_on_first_line() {
        let loc = ctx("class FooClass::BarClass\nend\n").location_for(Span::new(6, 24));
        assert_eq!((loc.line, loc.column), (1, 7));
        assert_eq!((loc.offset, loc.length), (6, 18));
    }

    #[test]
    fn location_on_later_line() {
        let content = "class FooClass\n  class BarClass\n  end\nend\n";
        let loc = ctx(content).location_for(Span::new(23, 31));
        assert_eq!((loc.line, loc.column), (2, 9));
        assert_eq!(ctx(content).text(Span::new(23, 31)), "BarClass");
    }

    #[test]
    fn location_past_end_is_clamped() {
        let loc = ctx("ab").location_for(Span::new(10, 12));
        assert_eq!(loc.offset, 2);
        assert_eq!((loc.line, loc.column), (1, 3));
    }
}
