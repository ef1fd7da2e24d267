//! Block-level parser.
//!
//! Runs under a read-only reference level: the minimum column at which
//! the current context's content begins. Top-level content sits at
//! reference level 1; entering a list item replaces the level for the
//! nested parse and the call stack restores it on exit.
//!
//! Recoverable failures (ATX heading bodies, YAML front matter) are
//! pushed into an error sink and parsing continues; the orchestrator
//! reports them together with the inline phase's errors.

use crate::ast::{Block, InlineSource};
use crate::error::{ParseError, Result};
use crate::scan::classify::is_space;
use crate::scan::position::TAB_WIDTH;
use crate::scan::{rules, Cursor, Position};
use crate::text::{assemble_code_block, assemble_paragraph, indent_level};

/// Everything the block phase produces for one document.
pub(crate) struct BlockStream {
    pub yaml: Option<serde_yaml::Value>,
    pub blocks: Vec<Block<InlineSource>>,
    pub errors: Vec<ParseError>,
}

/// Tokenize a whole document into blocks carrying raw inline payloads.
///
/// `Err` is reserved for failures the dispatcher cannot recover from;
/// everything recoverable lands in [`BlockStream::errors`].
pub(crate) fn parse_document(input: &str) -> std::result::Result<BlockStream, ParseError> {
    let mut parser = BlockParser::new(input);
    let yaml = parser.front_matter();
    let blocks = parser.blocks(1)?;
    Ok(BlockStream {
        yaml,
        blocks,
        errors: parser.errors,
    })
}

/// Outcome of the ATX heading alternative.
enum AtxOutcome {
    Block(Block<InlineSource>),
    /// The opener matched but the body did not; the line has been
    /// consumed and an error recorded.
    Recovered,
    NoMatch,
}

struct BlockParser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

impl<'a> BlockParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            errors: Vec::new(),
        }
    }

    /// Parse a block sequence at the given reference level, stopping
    /// when the content column drops below it.
    fn blocks(&mut self, rlevel: usize) -> Result<Vec<Block<InlineSource>>> {
        let mut blocks = Vec::new();

        loop {
            self.cursor.skip_blank();
            if self.cursor.at_end() {
                break;
            }

            let alevel = self.cursor.position().column;
            if alevel < rlevel {
                break;
            }
            if alevel >= rlevel + TAB_WIDTH {
                blocks.push(self.indented_code_block(rlevel));
                continue;
            }

            if let Some(block) = self.thematic_break() {
                blocks.push(block);
                continue;
            }
            match self.atx_heading() {
                AtxOutcome::Block(block) => {
                    blocks.push(block);
                    continue;
                }
                AtxOutcome::Recovered => continue,
                AtxOutcome::NoMatch => {}
            }
            if let Some(block) = self.fenced_code_block(rlevel, alevel) {
                blocks.push(block);
                continue;
            }
            if let Some(block) = self.ordered_list() {
                blocks.push(block);
                continue;
            }
            if let Some(block) = self.block_quote() {
                blocks.push(block);
                continue;
            }
            if let Some(block) = self.unordered_list(rlevel)? {
                blocks.push(block);
                continue;
            }
            blocks.push(self.paragraph()?);
        }

        Ok(blocks)
    }

    /// YAML front matter at the very start of the document. Decode
    /// failures are recorded and leave the document without metadata.
    fn front_matter(&mut self) -> Option<serde_yaml::Value> {
        let saved = self.cursor;
        let fence = self.cursor.position();

        if !self.cursor.eat_str("---") {
            return None;
        }
        self.cursor.skip_hws();
        if !self.cursor.eat_eol() {
            self.cursor = saved;
            return None;
        }

        let body_start = self.cursor.position();
        let mut lines: Vec<&str> = Vec::new();
        loop {
            if self.cursor.at_end() {
                break;
            }
            if self.cursor.peek_line().trim() == "---" {
                self.cursor.take_rest_of_line();
                self.cursor.eat_eol();
                break;
            }
            lines.push(self.cursor.take_rest_of_line());
            self.cursor.eat_eol();
        }

        let body = lines.join("\n");
        match serde_yaml::from_str::<serde_yaml::Value>(&body) {
            Ok(value) => Some(value),
            Err(err) => {
                let position = match err.location() {
                    Some(loc) => Position {
                        line: body_start.line + loc.line() - 1,
                        column: loc.column(),
                        offset: body_start.offset + loc.index().min(body.len()),
                    },
                    None => fence,
                };
                self.errors.push(ParseError::yaml(position, err.to_string()));
                None
            }
        }
    }

    fn thematic_break(&mut self) -> Option<Block<InlineSource>> {
        self.cursor.apply(rules::thematic_break_line)?;
        self.cursor.eat_eol();
        Some(Block::ThematicBreak)
    }

    fn atx_heading(&mut self) -> AtxOutcome {
        let level = match self.cursor.apply(rules::atx_intro) {
            Some(level) => level.min(6) as u8,
            None => return AtxOutcome::NoMatch,
        };

        // Opener committed; a bad body consumes the line and recovers.
        self.cursor.apply(rules::hws1);
        let start = self.cursor.position();
        let raw = self.cursor.take_rest_of_line();
        let at_eof = self.cursor.at_end();
        self.cursor.eat_eol();

        let text = trim_heading_text(raw);
        if text.is_empty() {
            let error = ParseError::unexpected_end(start, &["heading character"]);
            self.errors.push(if at_eof {
                error
            } else {
                error.with_eof_label("line")
            });
            return AtxOutcome::Recovered;
        }

        AtxOutcome::Block(Block::Heading {
            level,
            content: InlineSource {
                position: start,
                text: text.to_string(),
            },
        })
    }

    /// A fenced code block. Body lines are stripped to the reference
    /// level; `alevel` is the fence's own column and only bounds where
    /// the closing fence may sit.
    fn fenced_code_block(&mut self, rlevel: usize, alevel: usize) -> Option<Block<InlineSource>> {
        let saved = self.cursor;
        let (fence_char, fence_len) = self.cursor.apply(rules::fence_opener)?;

        let info_raw = self.cursor.take_rest_of_line();
        if fence_char == '`' && info_raw.contains('`') {
            self.cursor = saved;
            return None;
        }
        self.cursor.eat_eol();

        let info = unescape(info_raw.trim_matches([' ', '\t']));
        let info = (!info.is_empty()).then_some(info);

        let mut lines: Vec<String> = Vec::new();
        while !self.cursor.at_end() {
            let line = self.cursor.peek_line();
            if is_closing_fence(line, fence_char, fence_len, alevel) {
                self.cursor.take_rest_of_line();
                self.cursor.eat_eol();
                break;
            }
            lines.push(self.cursor.take_rest_of_line().to_string());
            self.cursor.eat_eol();
        }

        Some(Block::CodeBlock {
            info,
            content: assemble_code_block(rlevel, &lines),
        })
    }

    /// An indented code block at `rlevel + 4` columns or deeper.
    fn indented_code_block(&mut self, rlevel: usize) -> Block<InlineSource> {
        let clevel = rlevel + TAB_WIDTH;
        let alevel = self.cursor.position().column;

        // The dispatcher consumed the indentation while measuring; give
        // the first line its leading columns back.
        let first = self.cursor.take_rest_of_line();
        let mut more = self.cursor.eat_eol();
        let mut lines = vec![format!("{}{}", " ".repeat(alevel - 1), first)];

        while more {
            let saved = self.cursor;
            let mut blanks = 0usize;
            while !self.cursor.at_end() && self.cursor.peek_line().chars().all(is_space) {
                self.cursor.take_rest_of_line();
                if !self.cursor.eat_eol() {
                    break;
                }
                blanks += 1;
            }
            if self.cursor.at_end() || indent_level(self.cursor.peek_line()) + 1 < clevel {
                self.cursor = saved;
                break;
            }
            lines.extend(std::iter::repeat_with(String::new).take(blanks));
            lines.push(self.cursor.take_rest_of_line().to_string());
            more = self.cursor.eat_eol();
        }

        while lines.last().is_some_and(|l| l.chars().all(is_space)) {
            lines.pop();
        }

        Block::CodeBlock {
            info: None,
            content: assemble_code_block(clevel, &lines),
        }
    }

    // TODO: parse `1.`-style markers once ordered lists land.
    fn ordered_list(&mut self) -> Option<Block<InlineSource>> {
        None
    }

    // TODO: strip `>` markers once block quotes land; paragraphs keep
    // them verbatim for now.
    fn block_quote(&mut self) -> Option<Block<InlineSource>> {
        None
    }

    fn unordered_list(&mut self, rlevel: usize) -> Result<Option<Block<InlineSource>>> {
        if self.cursor.apply(rules::list_marker).is_none() {
            return Ok(None);
        }

        let mut items = Vec::new();
        loop {
            // The item's content column becomes the reference level for
            // its nested block sequence.
            let item_level = self.cursor.position().column;
            items.push(self.blocks(item_level)?);

            let saved = self.cursor;
            self.cursor.skip_blank();
            let column = self.cursor.position().column;
            let next_item = !self.cursor.at_end()
                && column >= rlevel
                && column < rlevel + TAB_WIDTH
                && self.cursor.apply(rules::list_marker).is_some();
            if !next_item {
                self.cursor = saved;
                break;
            }
        }

        Ok(Some(Block::UnorderedList(items)))
    }

    fn paragraph(&mut self) -> Result<Block<InlineSource>> {
        let start = self.cursor.position();
        let mut lines = vec![self.cursor.take_rest_of_line()];

        while self.cursor.eat_eol() {
            let line = self.cursor.peek_line();
            if line.chars().all(is_space) || self.interrupts_paragraph() {
                break;
            }
            lines.push(self.cursor.take_rest_of_line());
        }

        let text = assemble_paragraph(&lines);
        if text.is_empty() {
            return Err(ParseError::unexpected_end(start, &["block content"]));
        }

        Ok(Block::Paragraph(InlineSource {
            position: start,
            text,
        }))
    }

    /// Whether the upcoming line opens a construct that cuts a
    /// paragraph short: a thematic break, heading, code fence, or list
    /// marker.
    fn interrupts_paragraph(&self) -> bool {
        let mut probe = self.cursor;
        probe.skip_hws();
        probe.apply(rules::thematic_break_line).is_some()
            || probe.apply(rules::atx_intro).is_some()
            || probe.apply(rules::fence_opener).is_some()
            || probe.apply(rules::list_marker).is_some()
    }
}

/// Strip an optional trailing `#` closing sequence and surrounding
/// whitespace from a heading body.
fn trim_heading_text(raw: &str) -> &str {
    let trimmed = raw.trim_end_matches([' ', '\t']);
    let without_hashes = trimmed.trim_end_matches('#');
    let text = if without_hashes.len() != trimmed.len() && without_hashes.ends_with([' ', '\t']) {
        without_hashes
    } else {
        trimmed
    };
    text.trim_matches([' ', '\t'])
}

/// Process backslash escapes in an info string.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if crate::scan::classify::is_ascii_punctuation(next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Whether `line` closes a fence opened with `fence_len` characters of
/// `fence_char` at column `alevel`.
fn is_closing_fence(line: &str, fence_char: char, fence_len: usize, alevel: usize) -> bool {
    if indent_level(line) + 1 > alevel {
        return false;
    }
    let rest = line.trim_start_matches([' ', '\t']);
    let run = rest.chars().take_while(|&c| c == fence_char).count();
    run >= fence_len && rest[run..].chars().all(is_space)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(input: &str) -> Vec<Block<InlineSource>> {
        let stream = parse_document(input).expect("block phase");
        assert!(
            stream.errors.is_empty(),
            "unexpected errors: {:?}",
            stream.errors
        );
        stream.blocks
    }

    fn paragraph_text(block: &Block<InlineSource>) -> &str {
        match block {
            Block::Paragraph(payload) => &payload.text,
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn parses_thematic_breaks() {
        assert_eq!(blocks("***\n"), vec![Block::ThematicBreak]);
        assert_eq!(blocks("- - -\n"), vec![Block::ThematicBreak]);
    }

    #[test]
    fn two_stars_are_not_a_thematic_break() {
        let parsed = blocks("**x\n");
        assert_eq!(paragraph_text(&parsed[0]), "**x");
    }

    #[test]
    fn parses_atx_headings() {
        let parsed = blocks("## Title ##\n");
        match &parsed[0] {
            Block::Heading { level, content } => {
                assert_eq!(*level, 2);
                assert_eq!(content.text, "Title");
                assert_eq!(content.position.column, 4);
            }
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn seven_hashes_fall_back_to_a_paragraph() {
        let parsed = blocks("####### too many\n");
        assert_eq!(paragraph_text(&parsed[0]), "####### too many");
    }

    #[test]
    fn heading_without_text_recovers_with_an_error() {
        let stream = parse_document("# \nafter\n").expect("block phase");
        assert_eq!(stream.errors.len(), 1);
        assert_eq!(stream.errors[0].position.line, 1);
        assert_eq!(stream.blocks.len(), 1);
        assert_eq!(paragraph_text(&stream.blocks[0]), "after");
    }

    #[test]
    fn parses_fenced_code_blocks() {
        let parsed = blocks("```hs\nfoo\n```\n");
        assert_eq!(
            parsed[0],
            Block::CodeBlock {
                info: Some("hs".to_string()),
                content: "foo\n".to_string(),
            }
        );
    }

    #[test]
    fn unclosed_fence_runs_to_end_of_input() {
        let parsed = blocks("```\nfoo\nbar");
        assert_eq!(
            parsed[0],
            Block::CodeBlock {
                info: None,
                content: "foo\nbar\n".to_string(),
            }
        );
    }

    #[test]
    fn indented_fence_strips_only_to_the_reference_level() {
        let parsed = blocks("  ```\n  code\n  ```\n");
        assert_eq!(
            parsed[0],
            Block::CodeBlock {
                info: None,
                content: "  code\n".to_string(),
            }
        );
    }

    #[test]
    fn fence_in_a_list_item_strips_to_the_item_level() {
        let parsed = blocks("* ```\n  code\n  ```\n");
        match &parsed[0] {
            Block::UnorderedList(items) => {
                assert_eq!(
                    items[0],
                    vec![Block::CodeBlock {
                        info: None,
                        content: "code\n".to_string(),
                    }]
                );
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn backtick_in_backtick_info_rejects_the_fence() {
        let parsed = blocks("``` a`b\n");
        assert_eq!(paragraph_text(&parsed[0]), "``` a`b");
    }

    #[test]
    fn tilde_info_may_contain_backticks() {
        let parsed = blocks("~~~ a`b\nx\n~~~\n");
        match &parsed[0] {
            Block::CodeBlock { info, .. } => assert_eq!(info.as_deref(), Some("a`b")),
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn parses_indented_code_blocks() {
        let parsed = blocks("    foo\n      bar\n");
        assert_eq!(
            parsed[0],
            Block::CodeBlock {
                info: None,
                content: "foo\n  bar\n".to_string(),
            }
        );
    }

    #[test]
    fn indented_code_keeps_interior_blank_lines() {
        let parsed = blocks("    a\n\n    b\n\nafter\n");
        assert_eq!(
            parsed[0],
            Block::CodeBlock {
                info: None,
                content: "a\n\nb\n".to_string(),
            }
        );
        assert_eq!(paragraph_text(&parsed[1]), "after");
    }

    #[test]
    fn paragraphs_join_lines_and_trim_the_tail() {
        let parsed = blocks("one\ntwo  \n\nthree\n");
        assert_eq!(paragraph_text(&parsed[0]), "one\ntwo");
        assert_eq!(paragraph_text(&parsed[1]), "three");
    }

    #[test]
    fn consecutive_markers_form_one_list() {
        let parsed = blocks("* a\n* b\n");
        match &parsed[0] {
            Block::UnorderedList(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(paragraph_text(&items[0][0]), "a");
                assert_eq!(paragraph_text(&items[1][0]), "b");
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn list_items_nest_under_their_own_level() {
        let parsed = blocks("* a\n  * b\n");
        // the nested marker interrupts the item's paragraph and sits at
        // the item's own reference level
        match &parsed[0] {
            Block::UnorderedList(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].len(), 2);
                assert!(matches!(items[0][1], Block::UnorderedList(_)));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn list_reference_level_restores_on_exit() {
        let parsed = blocks("* a\n\nback\n");
        assert_eq!(parsed.len(), 2);
        assert!(matches!(parsed[0], Block::UnorderedList(_)));
        assert_eq!(paragraph_text(&parsed[1]), "back");
    }

    #[test]
    fn front_matter_is_decoded() {
        let stream = parse_document("---\ntitle: x\n---\n# T\n").expect("block phase");
        assert!(stream.errors.is_empty());
        let yaml = stream.yaml.expect("yaml value");
        assert_eq!(yaml["title"], serde_yaml::Value::from("x"));
        assert_eq!(stream.blocks.len(), 1);
    }

    #[test]
    fn empty_front_matter_yields_null() {
        let stream = parse_document("---\n---\n").expect("block phase");
        assert_eq!(stream.yaml, Some(serde_yaml::Value::Null));
        assert!(stream.blocks.is_empty());
    }

    #[test]
    fn bad_front_matter_reports_a_positioned_error() {
        let stream = parse_document("---\nkey: [unclosed\n---\nrest\n").expect("block phase");
        assert_eq!(stream.yaml, None);
        assert_eq!(stream.errors.len(), 1);
        assert!(matches!(
            stream.errors[0].kind,
            crate::error::ErrorKind::Yaml(_)
        ));
        assert!(stream.errors[0].position.line >= 2);
    }

    #[test]
    fn ordered_lists_stay_unsupported() {
        let parsed = blocks("1. item\n");
        assert_eq!(paragraph_text(&parsed[0]), "1. item");
    }

    #[test]
    fn block_quotes_stay_unsupported() {
        let parsed = blocks("> quoted\n");
        assert_eq!(paragraph_text(&parsed[0]), "> quoted");
    }
}
