//! AST types produced by the parser.
//!
//! Blocks are generic over their inline payload: the block phase emits
//! `Block<InlineSource>` (raw text plus start position), and the
//! orchestrator rewrites every payload through the inline phase to end
//! up with `Block<Vec<Inline>>` inside a [`Document`].

use crate::scan::Position;
use crate::uri::Uri;

/// Root of a parsed document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Decoded YAML front matter, when the document opens with one.
    pub yaml: Option<serde_yaml::Value>,
    /// Content blocks in source order.
    pub blocks: Vec<Block<Vec<Inline>>>,
}

/// Block-level elements, generic over the inline payload type `I`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block<I> {
    /// Horizontal rule.
    ThematicBreak,
    /// ATX heading with level 1 to 6.
    Heading { level: u8, content: I },
    /// Fenced or indented code block. `info` is the trimmed info string
    /// of a fenced block, absent for indented blocks.
    CodeBlock {
        info: Option<String>,
        content: String,
    },
    /// Plain paragraph.
    Paragraph(I),
    /// Bullet list; every item is a block sequence of its own.
    UnorderedList(Vec<Vec<Block<I>>>),
}

impl<I> Block<I> {
    /// Rewrite the inline payloads of this block, including those of
    /// nested list items, through `f`.
    pub fn map_inlines<J>(self, f: &mut impl FnMut(I) -> J) -> Block<J> {
        match self {
            Block::ThematicBreak => Block::ThematicBreak,
            Block::Heading { level, content } => Block::Heading {
                level,
                content: f(content),
            },
            Block::CodeBlock { info, content } => Block::CodeBlock { info, content },
            Block::Paragraph(content) => Block::Paragraph(f(content)),
            Block::UnorderedList(items) => Block::UnorderedList(
                items
                    .into_iter()
                    .map(|item| item.into_iter().map(|block| block.map_inlines(f)).collect())
                    .collect(),
            ),
        }
    }
}

/// Raw inline content awaiting the inline phase, tagged with the
/// position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InlineSource {
    pub position: Position,
    pub text: String,
}

/// Inline-level elements.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inline {
    /// Plain text.
    Plain(String),
    /// Hard line break.
    LineBreak,
    /// Verbatim code span with collapsed whitespace.
    CodeSpan(String),
    /// Emphasis; the child sequence is never empty.
    Emphasis(Vec<Inline>),
    /// Strong emphasis; the child sequence is never empty.
    Strong(Vec<Inline>),
    /// Struck-out text; the child sequence is never empty.
    Strikeout(Vec<Inline>),
    /// Subscript; the child sequence is never empty.
    Subscript(Vec<Inline>),
    /// Superscript; the child sequence is never empty.
    Superscript(Vec<Inline>),
    /// Hyperlink.
    Link {
        label: Vec<Inline>,
        destination: Uri,
        title: Option<String>,
    },
    /// Image reference.
    Image {
        description: Vec<Inline>,
        source: Uri,
        title: Option<String>,
    },
}
