//! Input cursor.
//!
//! A [`Cursor`] is a byte position into the input text. The parser owns one
//! cursor per parse and lends it by mutable reference to every grammar rule,
//! each of which advances it past the input it consumes. The cursor never
//! moves backwards.
//!
//! Only ASCII bytes and whole operator glyphs are ever consumed, so the
//! position always lies on a character boundary and slicing is safe.
//!
//! [`Cursor`]: struct.Cursor.html

use regex::Regex;

use crate::parser::Error;

lazy_static! {
    /// A table name: a run of ASCII letters, digits and underscores.
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z0-9_]+").unwrap();
}

/// Returns true if `c` is whitespace that separates tokens.
pub fn is_space(c: char) -> bool {
    match c {
        ' ' | '\t' | '\n' | '\r' => true,
        _ => false,
    }
}

/// A position into a borrowed input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<'a> {
    /// The whole input.
    text: &'a str,
    /// Byte offset of the next unconsumed character.
    pos: usize,
    /// Nesting depth of the grammar rule currently using the cursor.
    depth: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `text`.
    pub fn new(text: &'a str) -> Cursor<'a> {
        Cursor {
            text,
            pos: 0,
            depth: 0,
        }
    }

    /// Returns the byte offset of the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the nesting depth recorded by the parser.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Records a new nesting depth.
    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Returns the unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Returns true if all input has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Advances past any whitespace. Calling it twice in a row is a no-op.
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start_matches(is_space).len();
    }

    /// Skips whitespace, then consumes `c` if it is the next character.
    ///
    /// Returns false, consuming nothing but the whitespace, if the next
    /// character is something else or the input is exhausted.
    pub fn consume(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `glyph` if the input at the cursor starts with its bytes.
    ///
    /// Unlike `consume`, this does not skip whitespace first.
    pub fn eat(&mut self, glyph: &str) -> bool {
        if self.rest().as_bytes().starts_with(glyph.as_bytes()) {
            self.pos += glyph.len();
            true
        } else {
            false
        }
    }

    /// Skips whitespace, then consumes and returns an identifier.
    ///
    /// The identifier is returned verbatim. There is no case folding and no
    /// keyword checking.
    pub fn parse_identifier(&mut self) -> Result<&'a str, Error> {
        self.skip_whitespace();
        let rest = self.rest();
        match IDENTIFIER.find(rest) {
            Some(m) => {
                self.pos += m.end();
                Ok(&rest[..m.end()])
            }
            None => Err(Error::ExpectedIdentifier),
        }
    }

    /// Returns the offset of the next `c` at or after the cursor.
    pub fn find(&self, c: char) -> Option<usize> {
        self.rest().find(c).map(|i| self.pos + i)
    }

    /// Advances the cursor to `end` and returns the text passed over.
    ///
    /// `end` must be an offset obtained from `find`.
    pub fn take_until(&mut self, end: usize) -> &'a str {
        debug_assert!(end >= self.pos && end <= self.text.len());
        let taken = &self.text[self.pos..end];
        self.pos = end;
        taken
    }
}
