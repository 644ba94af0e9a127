//! Restricted parser for `imports_to_move = [("old", "new"), ...]`.
//!
//! Only the assignment itself, comments and blank lines are accepted. Any
//! other statement is an error.

use super::{RenamePair, LIST_NAME};
use std::iter::Peekable;
use std::str::CharIndices;

struct Cursor<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn line_at(&self, offset: usize) -> usize {
        self.src[..offset].matches('\n').count() + 1
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    fn error(&mut self, message: &str) -> String {
        let offset = self.offset();
        format!("line {}: {}", self.line_at(offset), message)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Skip whitespace (newlines included) and `#` comments
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c == '#' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.chars.next();
                }
            } else if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), String> {
        self.skip_trivia();
        match self.peek() {
            Some(c) if c == wanted => {
                self.chars.next();
                Ok(())
            },
            Some(c) => Err(self.error(&format!("expected '{}', found '{}'", wanted, c))),
            None => Err(self.error(&format!("expected '{}', found end of file", wanted))),
        }
    }

    fn identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        ident
    }

    fn string(&mut self) -> Result<String, String> {
        self.skip_trivia();
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            Some(c) => return Err(self.error(&format!("expected a string, found '{}'", c))),
            None => return Err(self.error("expected a string, found end of file")),
        };
        self.chars.next();

        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(value),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, c)) => value.push(c),
                    None => break,
                },
                Some((_, '\n')) | None => break,
                Some((_, c)) => value.push(c),
            }
        }
        Err(self.error("unterminated string"))
    }

    /// `("old", "new")` or `["old", "new"]`
    fn pair(&mut self) -> Result<RenamePair, String> {
        self.skip_trivia();
        let close = match self.peek() {
            Some('(') => ')',
            Some('[') => ']',
            _ => return Err(self.error("expected a tuple of two strings")),
        };
        self.chars.next();

        let old = self.string()?;
        self.expect(',')?;
        let new = self.string()?;

        self.skip_trivia();
        if self.peek() == Some(',') {
            self.chars.next();
        }
        self.expect(close)
            .map_err(|_| self.error("expected a tuple of exactly two strings"))?;

        Ok(RenamePair { old, new })
    }

    fn list(&mut self) -> Result<Vec<RenamePair>, String> {
        self.expect('[')?;
        let mut pairs = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(']') {
                self.chars.next();
                return Ok(pairs);
            }
            pairs.push(self.pair()?);

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.chars.next();
                },
                Some(']') => {},
                _ => return Err(self.error("expected ',' or ']' after tuple")),
            }
        }
    }
}

/// Parse the literal form of a rename list
pub fn parse(src: &str) -> Result<Vec<RenamePair>, String> {
    let mut cursor = Cursor::new(src);
    let mut pairs = None;

    loop {
        cursor.skip_trivia();
        if cursor.peek().is_none() {
            break;
        }

        let ident = cursor.identifier();
        if ident != LIST_NAME {
            return Err(cursor.error(&format!(
                "only `{} = [...]` is allowed in a rename list",
                LIST_NAME
            )));
        }
        if pairs.is_some() {
            return Err(cursor.error(&format!("`{}` is assigned twice", LIST_NAME)));
        }

        cursor.expect('=')?;
        pairs = Some(cursor.list()?);
    }

    pairs.ok_or_else(|| format!("missing `{}` list", LIST_NAME))
}
