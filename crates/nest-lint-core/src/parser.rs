//! Parser seam: turns source text into the [`Program`] model.

use crate::syntax::Program;

/// Errors reported by a [`SourceParser`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser produced no tree.
    #[error("parser returned no tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line number (1-indexed).
        line: usize,
        /// Column number (1-indexed).
        column: usize,
    },
}

/// Lowers source text of one language into a [`Program`].
///
/// Implement this to plug in a concrete parser. The analyzer uses
/// [`extensions`](SourceParser::extensions) to pick the files it hands over.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"ruby"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot (e.g., `&["rb"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into the syntax model.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed.
    fn parse(&self, source: &str) -> Result<Program, ParseError>;
}

/// Type alias for boxed parser trait objects.
pub type ParserBox = Box<dyn SourceParser>;
