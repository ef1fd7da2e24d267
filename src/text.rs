//! Text-assembly helpers used by the block and inline parsers.

use crate::scan::position::TAB_WIDTH;

/// Indentation width of a line's leading whitespace, counting a space
/// as one column and a tab as [`TAB_WIDTH`].
pub(crate) fn indent_level(line: &str) -> usize {
    let mut level = 0;
    for c in line.chars() {
        match c {
            ' ' => level += 1,
            '\t' => level += TAB_WIDTH,
            _ => break,
        }
    }
    level
}

/// Drop leading whitespace (and stray `>` markers) from `line` up to
/// `indent - 1` effective columns.
pub(crate) fn strip_indent(indent: usize, line: &str) -> &str {
    let limit = indent.saturating_sub(1);
    let mut cols = 0;
    let mut bytes = 0;
    for c in line.chars() {
        if cols >= limit {
            break;
        }
        match c {
            ' ' | '>' => cols += 1,
            '\t' => cols += TAB_WIDTH,
            _ => break,
        }
        bytes += c.len_utf8();
    }
    &line[bytes..]
}

/// Strip the shared indentation from code-block lines and join them;
/// the result always ends with a newline.
pub(crate) fn assemble_code_block(indent: usize, lines: &[String]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(strip_indent(indent, line));
        out.push('\n');
    }
    out
}

/// Join paragraph lines with `\n` and right-trim horizontal whitespace
/// from the final line.
pub(crate) fn assemble_paragraph(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.truncate(out.trim_end_matches([' ', '\t']).len());
    out
}

/// Replace every maximal run of ASCII whitespace with a single space
/// and trim both ends, as required for code-span content.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            pending = !out.is_empty();
        } else {
            if pending {
                out.push(' ');
                pending = false;
            }
            out.push(c);
        }
    }
    out
}
