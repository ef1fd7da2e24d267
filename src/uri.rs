//! A small generic URI model with a nom-based sub-parser.
//!
//! Link destinations and autolink bodies are handed here as input
//! slices; errors come back as ordinary [`ParseError`]s positioned
//! inside the slice so the caller can surface them unchanged.

use std::fmt;

use lazy_static::lazy_static;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, satisfy};
use nom::combinator::recognize;
use nom::sequence::{pair, preceded, terminated};
use nom::IResult;
use regex::Regex;

use crate::error::{ParseError, Result};
use crate::scan::{Cursor, Position};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex");
}

/// Whether `text` looks like an email address.
pub fn is_email_address(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

/// A parsed URI, kept close to its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uri {
    pub scheme: Option<String>,
    /// The `host[:port]` part following `//`, if any.
    pub authority: Option<String>,
    /// The raw path text, slashes included.
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Uri {
    /// The path, if it consists of exactly one segment.
    pub fn single_segment(&self) -> Option<&str> {
        if self.authority.is_none() && !self.path.is_empty() && !self.path.contains('/') {
            Some(&self.path)
        } else {
            None
        }
    }

    /// Attach `scheme` when the URI does not already carry one.
    pub fn into_absolute(mut self, scheme: &str) -> Uri {
        if self.scheme.is_none() {
            self.scheme = Some(scheme.to_string());
        }
        self
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{}", authority)?;
        }
        write!(f, "{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

/// Characters acceptable anywhere in a URI literal.
fn is_uri_char(c: char) -> bool {
    !c.is_whitespace() && c != '<' && c != '>'
}

fn scheme_part(input: &str) -> IResult<&str, &str> {
    terminated(
        recognize(pair(
            satisfy(|c: char| c.is_ascii_alphabetic()),
            take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        )),
        char(':'),
    )(input)
}

fn authority_part(input: &str) -> IResult<&str, &str> {
    preceded(
        tag("//"),
        take_while(|c: char| is_uri_char(c) && !matches!(c, '/' | '?' | '#')),
    )(input)
}

fn path_part(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| is_uri_char(c) && !matches!(c, '?' | '#'))(input)
}

fn query_part(input: &str) -> IResult<&str, &str> {
    preceded(char('?'), take_while(|c: char| is_uri_char(c) && c != '#'))(input)
}

fn fragment_part(input: &str) -> IResult<&str, &str> {
    preceded(char('#'), take_while(is_uri_char))(input)
}

/// Parse a whole input slice as a URI.
///
/// `position` anchors the slice in the enclosing document so error
/// positions line up with the original source.
pub fn parse(slice: &str, position: Position) -> Result<Uri> {
    let mut cursor = Cursor::with_position(slice, position);
    if cursor.at_end() {
        return Err(ParseError::unexpected_end(cursor.position(), &["URI"]));
    }

    let scheme = cursor.apply(scheme_part).map(str::to_string);
    let authority = cursor.apply(authority_part).map(str::to_string);
    let path = cursor.apply(path_part).unwrap_or("").to_string();
    let query = cursor.apply(query_part).map(str::to_string);
    let fragment = cursor.apply(fragment_part).map(str::to_string);

    if let Some(stray) = cursor.peek() {
        return Err(ParseError::unexpected(
            cursor.position(),
            stray,
            &["URI character"],
        ));
    }

    Ok(Uri {
        scheme,
        authority,
        path,
        query,
        fragment,
    })
}
