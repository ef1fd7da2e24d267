//! Strict Markdown-dialect parser producing a typed AST.
//!
//! Parsing runs as two cooperating phases. The block phase tokenizes
//! the input into [`Block`]s under an indentation reference level,
//! leaving each block's textual payload untouched as an
//! [`InlineSource`]. The inline phase then re-enters the engine once
//! per payload, resolving delimiter runs into nested [`Inline`] nodes
//! with a small character-class state machine enforcing the flanking
//! rules.
//!
//! Each payload is its own error-recovery boundary, so one malformed
//! construct does not abort the document: the driver collects every
//! failure across both phases and either returns the finished
//! [`Document`] or the full error report, never both.
//!
//! # Examples
//!
//! ```rust
//! let doc = mmark::parse("note.md", "# Hello\n").expect("well-formed input");
//! assert_eq!(doc.blocks.len(), 1);
//! ```
//!
//! Errors arrive together, in source order:
//!
//! ```rust
//! let errors = mmark::parse("note.md", "a *b\n\nc *d\n").unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod ast;
pub mod error;
pub mod inline;
pub mod scan;
pub mod uri;

mod block;
mod text;

pub use ast::{Block, Document, Inline, InlineSource};
pub use error::{ErrorKind, Found, ParseError, ParseErrors};
pub use inline::InlineConfig;
pub use scan::Position;
pub use uri::Uri;

/// Parse a whole document.
///
/// `file_name` is informational only; it labels the error report.
/// Returns the document when parsing is clean, otherwise every error
/// the run uncovered, ordered by source position.
pub fn parse(file_name: &str, input: &str) -> Result<Document, ParseErrors> {
    let stream = match block::parse_document(input) {
        Ok(stream) => stream,
        Err(fatal) => return Err(ParseErrors::new(file_name, vec![fatal])),
    };

    let mut errors = stream.errors;
    let blocks = stream
        .blocks
        .into_iter()
        .map(|block| {
            block.map_inlines(&mut |payload: InlineSource| {
                match inline::parse_inlines(&payload, InlineConfig::default()) {
                    Ok(inlines) => inlines,
                    Err(err) => {
                        errors.push(err.with_eof_label("inline block"));
                        Vec::new()
                    }
                }
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(Document {
            yaml: stream.yaml,
            blocks,
        })
    } else {
        Err(ParseErrors::new(file_name, errors))
    }
}
