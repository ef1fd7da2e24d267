//! Character-class predicates shared by the block and inline parsers.

/// Horizontal whitespace.
pub fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Horizontal whitespace or a line terminator.
pub fn is_space_or_newline(c: char) -> bool {
    is_space(c) || c == '\n' || c == '\r'
}

pub fn not_newline(c: char) -> bool {
    c != '\n' && c != '\r'
}

/// Characters that can begin or delimit an inline construct.
pub fn is_markup_char(c: char) -> bool {
    matches!(c, '*' | '~' | '_' | '`' | '^' | '[' | ']')
}

/// ASCII punctuation, the only characters a backslash may escape.
pub fn is_ascii_punctuation(c: char) -> bool {
    matches!(c, '!'..='/' | ':'..='@' | '['..='`' | '{'..='~')
}

/// Punctuation that does not count as adjacent content for flanking
/// purposes.
pub fn is_transparent_punctuation(c: char) -> bool {
    matches!(
        c,
        '!' | '"' | '(' | ')' | ',' | '-' | '.' | ':' | ';' | '?' | '{' | '}' | '–' | '—'
    )
}

/// Whitespace or transparent punctuation.
pub fn is_transparent(c: char) -> bool {
    c.is_whitespace() || is_transparent_punctuation(c)
}
