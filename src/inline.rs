//! Inline-level parser.
//!
//! Re-entered once per payload produced by the block phase. The only
//! mutable state is the class of the last consumed character, which
//! drives the flanking rules for emphasis-class delimiter runs; every
//! payload starts over at a logical word boundary.

use crate::ast::{Inline, InlineSource};
use crate::error::{ParseError, Result};
use crate::scan::classify::{
    is_markup_char, is_transparent, is_transparent_punctuation,
};
use crate::scan::{rules, Cursor, Position};
use crate::text::collapse_whitespace;
use crate::uri::{self, Uri};

/// Feature switches for one inline run.
#[derive(Debug, Clone, Copy)]
pub struct InlineConfig {
    /// Whether an empty payload parses as a single empty `Plain`.
    pub allow_empty: bool,
    /// Whether `[label](dest)` links and `<uri>` autolinks are
    /// recognized. Disabled inside link labels: links do not nest.
    pub allow_links: bool,
    /// Whether `![desc](src)` images are recognized. Disabled inside
    /// image descriptions.
    pub allow_images: bool,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            allow_empty: true,
            allow_links: true,
            allow_images: true,
        }
    }
}

/// Class of the most recently consumed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharKind {
    SpaceChar,
    LeftFlankingDel,
    RightFlankingDel,
    OtherChar,
}

/// A delimiter construct that can be opened and must be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineFrame {
    Emphasis,
    EmphasisUnder,
    Strong,
    StrongUnder,
    Strikeout,
    Subscript,
    Superscript,
}

impl InlineFrame {
    fn delimiter(self) -> &'static str {
        match self {
            InlineFrame::Emphasis => "*",
            InlineFrame::EmphasisUnder => "_",
            InlineFrame::Strong => "**",
            InlineFrame::StrongUnder => "__",
            InlineFrame::Strikeout => "~~",
            InlineFrame::Subscript => "~",
            InlineFrame::Superscript => "^",
        }
    }

    fn build(self, inlines: Vec<Inline>) -> Inline {
        match self {
            InlineFrame::Emphasis | InlineFrame::EmphasisUnder => Inline::Emphasis(inlines),
            InlineFrame::Strong | InlineFrame::StrongUnder => Inline::Strong(inlines),
            InlineFrame::Strikeout => Inline::Strikeout(inlines),
            InlineFrame::Subscript => Inline::Subscript(inlines),
            InlineFrame::Superscript => Inline::Superscript(inlines),
        }
    }
}

/// What an opener run puts on the stack: one frame, or an outer/inner
/// pair opened by a composite delimiter such as `***`.
#[derive(Debug, Clone, Copy)]
enum FrameState {
    Single(InlineFrame),
    Double(InlineFrame, InlineFrame),
}

/// Opener delimiters in match priority order: longest first, so a
/// composite run is never mistaken for its own prefix.
const OPENERS: &[(&str, FrameState)] = &[
    ("****", FrameState::Double(InlineFrame::Strong, InlineFrame::Strong)),
    ("***", FrameState::Double(InlineFrame::Strong, InlineFrame::Emphasis)),
    ("**", FrameState::Single(InlineFrame::Strong)),
    ("*", FrameState::Single(InlineFrame::Emphasis)),
    (
        "____",
        FrameState::Double(InlineFrame::StrongUnder, InlineFrame::StrongUnder),
    ),
    (
        "___",
        FrameState::Double(InlineFrame::StrongUnder, InlineFrame::EmphasisUnder),
    ),
    ("__", FrameState::Single(InlineFrame::StrongUnder)),
    ("_", FrameState::Single(InlineFrame::EmphasisUnder)),
    (
        "~~~~",
        FrameState::Double(InlineFrame::Strikeout, InlineFrame::Strikeout),
    ),
    (
        "~~~",
        FrameState::Double(InlineFrame::Strikeout, InlineFrame::Subscript),
    ),
    ("~~", FrameState::Single(InlineFrame::Strikeout)),
    ("~", FrameState::Single(InlineFrame::Subscript)),
    ("^", FrameState::Single(InlineFrame::Superscript)),
];

/// Parse one inline payload into its inline tree.
pub fn parse_inlines(source: &InlineSource, config: InlineConfig) -> Result<Vec<Inline>> {
    let mut parser = InlineParser {
        cursor: Cursor::with_position(&source.text, source.position),
        last: CharKind::SpaceChar,
        config,
    };

    if parser.cursor.at_end() {
        return if config.allow_empty {
            Ok(vec![Inline::Plain(String::new())])
        } else {
            Err(ParseError::unexpected_end(
                parser.cursor.position(),
                &["inline content"],
            ))
        };
    }

    let mut inlines = Vec::new();
    while !parser.cursor.at_end() {
        inlines.push(parser.inline()?);
    }
    Ok(inlines)
}

struct InlineParser<'a> {
    cursor: Cursor<'a>,
    last: CharKind,
    config: InlineConfig,
}

impl<'a> InlineParser<'a> {
    /// One inline token; alternatives in fixed priority order.
    fn inline(&mut self) -> Result<Inline> {
        match self.cursor.peek() {
            Some('`') => self.code_span(),
            Some('[') if self.config.allow_links => self.link(),
            Some('!')
                if self.config.allow_images && self.cursor.peek_second() == Some('[') =>
            {
                self.image()
            }
            Some('<') if self.config.allow_links && self.autolink_ahead() => self.autolink(),
            Some('*') | Some('_') | Some('~') | Some('^') => self.enclosed(),
            Some('\\') => {
                if let Some(inline) = self.try_hard_break() {
                    Ok(inline)
                } else {
                    self.plain()
                }
            }
            _ => self.plain(),
        }
    }

    // ------------------------------------------------------------------
    // Code spans
    // ------------------------------------------------------------------

    /// A code span opened by a run of `n` backticks closes only on a run
    /// of exactly `n`; longer or shorter runs are content.
    fn code_span(&mut self) -> Result<Inline> {
        let n = match self.cursor.apply(rules::backtick_run) {
            Some(n) => n,
            None => return self.plain(),
        };

        let mut content = String::new();
        loop {
            if self.cursor.at_end() {
                return Err(ParseError::unexpected_end(
                    self.cursor.position(),
                    &["code span closer"],
                ));
            }
            if let Some(run) = self.cursor.apply(rules::backtick_run) {
                if run == n {
                    break;
                }
                content.push_str(&"`".repeat(run));
            } else if let Some(c) = self.cursor.bump() {
                content.push(c);
            }
        }

        self.last = CharKind::OtherChar;
        Ok(Inline::CodeSpan(collapse_whitespace(&content)))
    }

    // ------------------------------------------------------------------
    // Links, images, autolinks
    // ------------------------------------------------------------------

    fn link(&mut self) -> Result<Inline> {
        self.cursor.bump();
        let label = self.bracketed_inlines(false, true)?;
        let (destination, title) = self.link_tail()?;
        self.last = CharKind::OtherChar;
        Ok(Inline::Link {
            label,
            destination,
            title,
        })
    }

    fn image(&mut self) -> Result<Inline> {
        self.cursor.bump();
        self.cursor.bump();
        let description = if self.cursor.peek() == Some(']') {
            // literal `![]`
            self.cursor.bump();
            vec![Inline::Plain(String::new())]
        } else {
            self.bracketed_inlines(true, false)?
        };
        let (source, title) = self.link_tail()?;
        self.last = CharKind::OtherChar;
        Ok(Inline::Image {
            description,
            source,
            title,
        })
    }

    /// The inline sequence between `[` and `]`; the closing bracket is
    /// consumed. A link label turns links off (links do not nest); an
    /// image description turns images off. The two restrictions are
    /// independent, so a description may still contain links.
    fn bracketed_inlines(&mut self, keep_links: bool, keep_images: bool) -> Result<Vec<Inline>> {
        let saved = self.config;
        self.config.allow_links = saved.allow_links && keep_links;
        self.config.allow_images = saved.allow_images && keep_images;
        let outcome = self.bracketed_run();
        self.config = saved;
        outcome
    }

    fn bracketed_run(&mut self) -> Result<Vec<Inline>> {
        let mut inlines = Vec::new();
        loop {
            match self.cursor.peek() {
                None => {
                    return Err(ParseError::unexpected_end(
                        self.cursor.position(),
                        &["']'"],
                    ))
                }
                Some(']') => break,
                _ => inlines.push(self.inline()?),
            }
        }
        if inlines.is_empty() {
            return Err(ParseError::unexpected(
                self.cursor.position(),
                ']',
                &["inline content"],
            ));
        }
        self.cursor.bump();
        Ok(inlines)
    }

    /// `(` destination, optional title, `)` after a label or
    /// description.
    fn link_tail(&mut self) -> Result<(Uri, Option<String>)> {
        self.expect_char('(')?;
        self.cursor.skip_blank();
        let destination = self.destination()?;
        self.cursor.skip_blank();
        let title = self.optional_title()?;
        self.cursor.skip_blank();
        self.expect_char(')')?;
        Ok((destination, title))
    }

    fn expect_char(&mut self, wanted: char) -> Result<()> {
        let label = format!("'{wanted}'");
        let expected = [label.as_str()];
        match self.cursor.peek() {
            Some(c) if c == wanted => {
                self.cursor.bump();
                Ok(())
            }
            Some(c) => Err(ParseError::unexpected(self.cursor.position(), c, &expected)),
            None => Err(ParseError::unexpected_end(self.cursor.position(), &expected)),
        }
    }

    /// A link destination: `<uri>` with the angles consumed, or a naked
    /// literal running to the next whitespace or `)`.
    fn destination(&mut self) -> Result<Uri> {
        if self.cursor.peek() == Some('<') {
            self.cursor.bump();
            let start = self.cursor.position();
            let rest = self.cursor.rest();
            match rest.find('>') {
                Some(end) => {
                    let slice = &rest[..end];
                    let parsed =
                        uri::parse(slice, start).map_err(|e| e.with_eof_label("URI literal"))?;
                    self.cursor.eat_str(slice);
                    self.cursor.bump();
                    Ok(parsed)
                }
                None => {
                    let mut probe = self.cursor;
                    probe.eat_str(rest);
                    Err(ParseError::unexpected_end(probe.position(), &["'>'"]))
                }
            }
        } else {
            let start = self.cursor.position();
            let rest = self.cursor.rest();
            let end = rest
                .find(|c: char| c.is_whitespace() || c == ')')
                .unwrap_or(rest.len());
            let slice = &rest[..end];
            let parsed = uri::parse(slice, start).map_err(|e| e.with_eof_label("URI literal"))?;
            self.cursor.eat_str(slice);
            Ok(parsed)
        }
    }

    /// A quoted title: `"…"`, `'…'` or `(…)`, escapes honoured.
    fn optional_title(&mut self) -> Result<Option<String>> {
        let close = match self.cursor.peek() {
            Some('"') => '"',
            Some('\'') => '\'',
            Some('(') => ')',
            _ => return Ok(None),
        };
        self.cursor.bump();

        let mut title = String::new();
        loop {
            if let Some(escaped) = self.cursor.apply(rules::escaped_char) {
                title.push(escaped);
                continue;
            }
            match self.cursor.bump() {
                Some(c) if c == close => break,
                Some(c) => title.push(c),
                None => {
                    return Err(ParseError::unexpected_end(
                        self.cursor.position(),
                        &["closing title delimiter"],
                    ))
                }
            }
        }
        Ok(Some(title))
    }

    /// Whether the cursor sits on `<…>` whose body parses as a URI.
    fn autolink_ahead(&self) -> bool {
        let rest = self.cursor.rest();
        let body = &rest[1..];
        match body.find('>') {
            Some(end) => {
                let slice = &body[..end];
                !slice.is_empty()
                    && !slice.contains(char::is_whitespace)
                    && uri::parse(slice, self.cursor.position()).is_ok()
            }
            None => false,
        }
    }

    /// `<uri>`: an email address becomes a `mailto:` link labelled with
    /// the address; anything else links to itself, labelled with the
    /// rendered URI.
    fn autolink(&mut self) -> Result<Inline> {
        self.cursor.bump();
        let start = self.cursor.position();
        let rest = self.cursor.rest();
        let end = rest.find('>').unwrap_or(rest.len());
        let slice = &rest[..end];
        let parsed = uri::parse(slice, start)?;
        self.cursor.eat_str(slice);
        self.cursor.bump();
        self.last = CharKind::OtherChar;

        let email = if matches!(parsed.scheme.as_deref(), None | Some("mailto")) {
            parsed
                .single_segment()
                .filter(|s| uri::is_email_address(s))
                .map(str::to_string)
        } else {
            None
        };

        Ok(match email {
            Some(address) => Inline::Link {
                label: vec![Inline::Plain(address)],
                destination: parsed.into_absolute("mailto"),
                title: None,
            },
            None => {
                let text = parsed.to_string();
                Inline::Link {
                    label: vec![Inline::Plain(text)],
                    destination: parsed,
                    title: None,
                }
            }
        })
    }

    // ------------------------------------------------------------------
    // Emphasis-class frames
    // ------------------------------------------------------------------

    fn enclosed(&mut self) -> Result<Inline> {
        let opener_pos = self.cursor.position();
        let (state, delims) = self.left_flanking_opener()?;
        match state {
            FrameState::Single(frame) => {
                let inlines = self.frame_body(frame, opener_pos, delims)?;
                Ok(frame.build(inlines))
            }
            FrameState::Double(outer, inner) => {
                self.double_frame(outer, inner, opener_pos, delims)
            }
        }
    }

    /// Match an opener run and check it is left-flanking: a word
    /// boundary on the left, actual content on the right.
    fn left_flanking_opener(&mut self) -> Result<(FrameState, &'static str)> {
        let pos = self.cursor.position();
        for &(delims, state) in OPENERS {
            if !self.cursor.starts_with(delims) {
                continue;
            }
            let mut probe = self.cursor;
            probe.eat_str(delims);
            let left_ok = matches!(self.last, CharKind::SpaceChar | CharKind::LeftFlankingDel);
            let right_ok = probe.peek().is_some_and(|c| !is_transparent(c));
            if !(left_ok && right_ok) {
                return Err(ParseError::non_flanking(pos, delims));
            }
            self.cursor = probe;
            self.last = CharKind::LeftFlankingDel;
            return Ok((state, delims));
        }
        // dispatch only sends delimiter characters here
        let found = self.cursor.peek().map(String::from).unwrap_or_default();
        Err(ParseError::unexpected(pos, found, &["inline content"]))
    }

    /// Attempt to close `frame` at the cursor. `Ok(true)` closed it,
    /// `Ok(false)` found no delimiter; a delimiter that is not
    /// right-flanking is an error.
    fn try_close(&mut self, frame: InlineFrame) -> Result<bool> {
        let del = frame.delimiter();
        if !self.cursor.starts_with(del) {
            return Ok(false);
        }
        let pos = self.cursor.position();
        let mut probe = self.cursor;
        probe.eat_str(del);
        let left_ok = !matches!(self.last, CharKind::SpaceChar | CharKind::LeftFlankingDel);
        let right_ok = probe
            .peek()
            .map_or(true, |c| is_transparent(c) || is_markup_char(c));
        if !(left_ok && right_ok) {
            return Err(ParseError::non_flanking(pos, del));
        }
        self.cursor = probe;
        self.last = CharKind::RightFlankingDel;
        Ok(true)
    }

    /// Body of a single frame: at least one inline, then the closer. A
    /// frame left open at the end of the payload is reported as a
    /// non-flanking run at its opener.
    fn frame_body(
        &mut self,
        frame: InlineFrame,
        opener_pos: Position,
        delims: &str,
    ) -> Result<Vec<Inline>> {
        let mut inlines = Vec::new();
        loop {
            if !inlines.is_empty() && self.try_close(frame)? {
                break;
            }
            if self.cursor.at_end() {
                return Err(ParseError::non_flanking(opener_pos, delims));
            }
            inlines.push(self.inline()?);
        }
        Ok(inlines)
    }

    /// Body of a composite opener such as `***`. The inner frame is
    /// offered its closer first; whichever closes becomes `this`, and
    /// the other (`that`) either closes immediately, wrapping the lot,
    /// or takes a second inline run before it does.
    fn double_frame(
        &mut self,
        outer: InlineFrame,
        inner: InlineFrame,
        opener_pos: Position,
        delims: &str,
    ) -> Result<Inline> {
        let mut first = Vec::new();
        let (this, that) = loop {
            if !first.is_empty() {
                if self.try_close(inner)? {
                    break (inner, outer);
                }
                if self.try_close(outer)? {
                    break (outer, inner);
                }
            }
            if self.cursor.at_end() {
                return Err(ParseError::non_flanking(opener_pos, delims));
            }
            first.push(self.inline()?);
        };

        if self.try_close(that)? {
            return Ok(that.build(vec![this.build(first)]));
        }

        let mut second = Vec::new();
        loop {
            if !second.is_empty() && self.try_close(that)? {
                break;
            }
            if self.cursor.at_end() {
                return Err(ParseError::non_flanking(opener_pos, delims));
            }
            second.push(self.inline()?);
        }

        let mut inlines = vec![this.build(first)];
        inlines.extend(second);
        Ok(that.build(inlines))
    }

    // ------------------------------------------------------------------
    // Breaks and plain text
    // ------------------------------------------------------------------

    /// Backslash at end of line, with more input following.
    fn try_hard_break(&mut self) -> Option<Inline> {
        let saved = self.cursor;
        self.cursor.apply(rules::hard_line_break)?;
        if self.cursor.at_end() {
            self.cursor = saved;
            return None;
        }
        self.cursor.skip_hws();
        self.last = CharKind::SpaceChar;
        Some(Inline::LineBreak)
    }

    /// A maximal run of ordinary characters. Stops at markup characters
    /// and anything another alternative wants; empty runs are the
    /// "nothing matched here" error.
    fn plain(&mut self) -> Result<Inline> {
        let mut text = String::new();
        let mut last = self.last;

        while let Some(c) = self.cursor.peek() {
            match c {
                '\\' => {
                    if let Some(escaped) = self.cursor.apply(rules::escaped_char) {
                        text.push(escaped);
                        last = CharKind::OtherChar;
                        continue;
                    }
                    if matches!(self.cursor.peek_second(), Some('\n') | Some('\r')) {
                        break;
                    }
                    self.cursor.bump();
                    text.push('\\');
                    last = CharKind::OtherChar;
                }
                '\n' | '\r' => {
                    while text.ends_with([' ', '\t']) {
                        text.pop();
                    }
                    self.cursor.eat_eol();
                    self.cursor.skip_hws();
                    text.push(' ');
                    last = CharKind::SpaceChar;
                }
                '!' => {
                    if self.cursor.peek_second() == Some('[') {
                        break;
                    }
                    self.cursor.bump();
                    text.push('!');
                    last = CharKind::SpaceChar;
                }
                '<' => {
                    if self.config.allow_links && self.autolink_ahead() {
                        break;
                    }
                    self.cursor.bump();
                    text.push('<');
                    last = CharKind::OtherChar;
                }
                c if is_markup_char(c) => break,
                c => {
                    self.cursor.bump();
                    text.push(c);
                    last = if c.is_ascii_whitespace() || is_transparent_punctuation(c) {
                        CharKind::SpaceChar
                    } else {
                        CharKind::OtherChar
                    };
                }
            }
        }

        if text.is_empty() {
            return Err(match self.cursor.peek() {
                Some(c) => {
                    ParseError::unexpected(self.cursor.position(), c, &["inline content"])
                }
                None => ParseError::unexpected_end(self.cursor.position(), &["inline content"]),
            });
        }

        self.last = last;
        Ok(Inline::Plain(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn payload(text: &str) -> InlineSource {
        InlineSource {
            position: Position::new(),
            text: text.to_string(),
        }
    }

    fn inlines(text: &str) -> Vec<Inline> {
        parse_inlines(&payload(text), InlineConfig::default()).expect(text)
    }

    fn error(text: &str) -> ParseError {
        parse_inlines(&payload(text), InlineConfig::default())
            .expect_err(text)
    }

    fn plain(text: &str) -> Inline {
        Inline::Plain(text.to_string())
    }

    #[test]
    fn splits_text_around_emphasis() {
        assert_eq!(
            inlines("a *b* c"),
            vec![
                plain("a "),
                Inline::Emphasis(vec![plain("b")]),
                plain(" c"),
            ]
        );
    }

    #[test]
    fn triple_stars_nest_emphasis_inside_strong() {
        assert_eq!(
            inlines("***bold-em***"),
            vec![Inline::Strong(vec![Inline::Emphasis(vec![plain(
                "bold-em"
            )])])]
        );
    }

    #[test]
    fn double_frame_closes_in_two_steps() {
        assert_eq!(
            inlines("***a* b**"),
            vec![Inline::Strong(vec![
                Inline::Emphasis(vec![plain("a")]),
                plain(" b"),
            ])]
        );
    }

    #[test]
    fn underscores_and_tildes_map_to_their_frames() {
        assert_eq!(
            inlines("__s__ _e_ ~~x~~ ~s~ ^t^"),
            vec![
                Inline::Strong(vec![plain("s")]),
                plain(" "),
                Inline::Emphasis(vec![plain("e")]),
                plain(" "),
                Inline::Strikeout(vec![plain("x")]),
                plain(" "),
                Inline::Subscript(vec![plain("s")]),
                plain(" "),
                Inline::Superscript(vec![plain("t")]),
            ]
        );
    }

    #[test]
    fn code_span_closes_on_an_exact_run() {
        assert_eq!(
            inlines("``a ` b``"),
            vec![Inline::CodeSpan("a ` b".to_string())]
        );
    }

    #[test]
    fn code_span_whitespace_is_collapsed() {
        assert_eq!(
            inlines("` a \t b `"),
            vec![Inline::CodeSpan("a b".to_string())]
        );
    }

    #[test]
    fn unclosed_code_span_reports_at_end() {
        let err = error("`code");
        assert!(matches!(err.kind, ErrorKind::Unexpected { .. }));
    }

    #[test]
    fn parses_a_link_with_title() {
        match &inlines("[site](https://example.com \"Home\")")[0] {
            Inline::Link {
                label,
                destination,
                title,
            } => {
                assert_eq!(label, &vec![plain("site")]);
                assert_eq!(destination.to_string(), "https://example.com");
                assert_eq!(title.as_deref(), Some("Home"));
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn angle_bracketed_destinations_consume_the_angles() {
        match &inlines("[x](<docs/intro>)")[0] {
            Inline::Link { destination, .. } => {
                assert_eq!(destination.to_string(), "docs/intro");
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn whitespace_inside_an_angle_destination_is_rejected() {
        let err = error("[x](<a b>)");
        assert!(matches!(err.kind, ErrorKind::Unexpected { .. }));
    }

    #[test]
    fn links_do_not_nest() {
        let err = error("[a [b](x)](y)");
        assert!(matches!(err.kind, ErrorKind::Unexpected { .. }));
    }

    #[test]
    fn image_with_empty_description() {
        match &inlines("![](pic.png)")[0] {
            Inline::Image {
                description,
                source,
                ..
            } => {
                assert_eq!(description, &vec![plain("")]);
                assert_eq!(source.to_string(), "pic.png");
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn image_descriptions_may_contain_links() {
        match &inlines("![a [b](c) d](e)")[0] {
            Inline::Image {
                description,
                source,
                ..
            } => {
                assert_eq!(description.len(), 3);
                assert_eq!(description[0], plain("a "));
                match &description[1] {
                    Inline::Link {
                        label, destination, ..
                    } => {
                        assert_eq!(label, &vec![plain("b")]);
                        assert_eq!(destination.to_string(), "c");
                    }
                    other => panic!("expected link, got {:?}", other),
                }
                assert_eq!(description[2], plain(" d"));
                assert_eq!(source.to_string(), "e");
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn images_do_not_nest_in_descriptions() {
        let err = error("![a ![b](c)](d)");
        assert!(matches!(err.kind, ErrorKind::Unexpected { .. }));
    }

    #[test]
    fn email_autolink_gets_a_mailto_destination() {
        match &inlines("<a@b.com>")[0] {
            Inline::Link {
                label, destination, ..
            } => {
                assert_eq!(label, &vec![plain("a@b.com")]);
                assert_eq!(destination.scheme.as_deref(), Some("mailto"));
                assert_eq!(destination.to_string(), "mailto:a@b.com");
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn uri_autolink_labels_itself() {
        match &inlines("<https://example.com/x>")[0] {
            Inline::Link {
                label, destination, ..
            } => {
                assert_eq!(label, &vec![plain("https://example.com/x")]);
                assert_eq!(destination.scheme.as_deref(), Some("https"));
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn stray_angle_bracket_stays_plain() {
        assert_eq!(inlines("a < b"), vec![plain("a < b")]);
    }

    #[test]
    fn hard_break_requires_following_content() {
        assert_eq!(
            inlines("a\\\nb"),
            vec![plain("a"), Inline::LineBreak, plain("b")]
        );
    }

    #[test]
    fn newlines_collapse_into_single_spaces() {
        assert_eq!(inlines("one  \n   two"), vec![plain("one two")]);
    }

    #[test]
    fn escapes_produce_the_bare_character() {
        assert_eq!(inlines("\\*not emphasis\\*"), vec![plain("*not emphasis*")]);
    }

    #[test]
    fn second_star_fails_the_flanking_check() {
        let err = error("*foo *");
        assert!(err.is_non_flanking());
        assert_eq!(err.position.column, 6);
        assert_eq!(
            err.kind,
            ErrorKind::NonFlankingDelimiterRun("*".to_string())
        );
    }

    #[test]
    fn unclosed_frame_reports_its_opener() {
        let err = error("a *b");
        assert!(err.is_non_flanking());
        assert_eq!(err.position.column, 3);
    }

    #[test]
    fn opener_before_space_is_non_flanking() {
        let err = error("* foo");
        assert!(err.is_non_flanking());
        assert_eq!(err.position.column, 1);
    }

    #[test]
    fn empty_payload_honours_allow_empty() {
        assert_eq!(
            parse_inlines(&payload(""), InlineConfig::default()).expect("empty"),
            vec![plain("")]
        );
        let config = InlineConfig {
            allow_empty: false,
            ..InlineConfig::default()
        };
        assert!(parse_inlines(&payload(""), config).is_err());
    }

    #[test]
    fn transparent_punctuation_allows_a_following_opener() {
        // the dash leaves a word boundary behind it
        assert_eq!(
            inlines("x-*y*"),
            vec![plain("x-"), Inline::Emphasis(vec![plain("y")])]
        );
    }
}
