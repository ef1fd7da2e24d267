//! Low-level scanners as pure nom rules.
//!
//! Rules are stateless `&str -> IResult` functions; [`Cursor::apply`]
//! runs one at the current offset and advances the tracked position on
//! success.
//!
//! [`Cursor::apply`]: super::Cursor::apply

use nom::branch::alt;
use nom::bytes::complete::{take_while, take_while1, take_while_m_n};
use nom::character::complete::{anychar, char, line_ending, one_of};
use nom::combinator::{eof, map, peek, recognize, verify};
use nom::sequence::{pair, preceded, terminated};
use nom::IResult;

use super::classify::{is_ascii_punctuation, is_space, is_space_or_newline, not_newline};

/// A single line terminator: `\n`, `\r\n`, or `\r`.
pub(crate) fn line_terminator(input: &str) -> IResult<&str, &str> {
    alt((line_ending, nom::bytes::complete::tag("\r")))(input)
}

/// Zero or more horizontal whitespace characters.
pub(crate) fn hws0(input: &str) -> IResult<&str, &str> {
    take_while(is_space)(input)
}

/// One or more horizontal whitespace characters.
pub(crate) fn hws1(input: &str) -> IResult<&str, &str> {
    take_while1(is_space)(input)
}

/// Zero or more whitespace characters, newlines included.
pub(crate) fn blank0(input: &str) -> IResult<&str, &str> {
    take_while(is_space_or_newline)(input)
}

/// Everything up to (excluding) the next line terminator.
pub(crate) fn rest_of_line(input: &str) -> IResult<&str, &str> {
    take_while(not_newline)(input)
}

/// A backslash escape: `\` followed by ASCII punctuation. Yields the
/// escaped character.
pub(crate) fn escaped_char(input: &str) -> IResult<&str, char> {
    preceded(char('\\'), verify(anychar, |&c| is_ascii_punctuation(c)))(input)
}

/// A thematic-break line: at least three of the same `*`, `-` or `_`
/// with nothing but horizontal whitespace around them, running to the
/// end of the line. Yields the marker character.
pub(crate) fn thematic_break_line(input: &str) -> IResult<&str, char> {
    map(
        terminated(
            verify(
                take_while1(|c: char| matches!(c, '*' | '-' | '_') || is_space(c)),
                |s: &str| {
                    let mut marks = s.chars().filter(|c| !is_space(*c));
                    match marks.next() {
                        Some(first) => {
                            matches!(first, '*' | '-' | '_')
                                && marks.clone().all(|c| c == first)
                                && marks.count() >= 2
                        }
                        None => false,
                    }
                },
            ),
            peek(alt((line_terminator, eof))),
        ),
        |s: &str| s.chars().find(|c| !is_space(*c)).unwrap_or('-'),
    )(input)
}

/// The opener of an ATX heading: one to six `#` characters that must be
/// followed by horizontal whitespace. Yields the heading level.
pub(crate) fn atx_intro(input: &str) -> IResult<&str, usize> {
    map(
        terminated(take_while_m_n(1, 6, |c| c == '#'), peek(one_of(" \t"))),
        |hashes: &str| hashes.len(),
    )(input)
}

/// A code-fence opener: three or more backticks or tildes. Yields the
/// fence character and its run length.
pub(crate) fn fence_opener(input: &str) -> IResult<&str, (char, usize)> {
    map(
        verify(
            alt((take_while1(|c| c == '`'), take_while1(|c| c == '~'))),
            |s: &str| s.len() >= 3,
        ),
        |s: &str| (s.chars().next().unwrap_or('`'), s.len()),
    )(input)
}

/// An unordered-list item marker: `*` followed by horizontal
/// whitespace.
pub(crate) fn list_marker(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('*'), hws1))(input)
}

/// A maximal run of backticks. Yields the run length.
pub(crate) fn backtick_run(input: &str) -> IResult<&str, usize> {
    map(take_while1(|c| c == '`'), |s: &str| s.len())(input)
}

/// A hard line break: backslash immediately before a line terminator.
pub(crate) fn hard_line_break(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('\\'), line_terminator))(input)
}
