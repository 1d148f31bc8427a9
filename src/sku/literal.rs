//! Parser for the serialized image lists stored in the SKU table.
//!
//! The export writes each record's images as a list literal such as
//! `['https://a.test/1.jpg', '']`. Only flat lists of quoted strings are
//! accepted; anything else is reported with the byte offset of the problem.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct ListSyntaxError {
    pub offset: usize,
    pub message: String,
}

/// Parse a list literal of single- or double-quoted strings.
pub fn parse_string_list(input: &str) -> Result<Vec<String>, ListSyntaxError> {
    let mut parser = Parser { src: input, pos: 0 };
    parser.skip_whitespace();
    parser.expect('[')?;

    let mut items = Vec::new();
    loop {
        parser.skip_whitespace();
        match parser.peek() {
            Some(']') => {
                parser.bump();
                break;
            }
            Some('\'') | Some('"') => items.push(parser.string()?),
            Some(_) => return Err(parser.error("expected a quoted string or `]`")),
            None => return Err(parser.error("unclosed `[`")),
        }

        parser.skip_whitespace();
        match parser.peek() {
            Some(',') => {
                parser.bump();
            }
            Some(']') => {
                parser.bump();
                break;
            }
            Some(_) => return Err(parser.error("expected `,` or `]`")),
            None => return Err(parser.error("unclosed `[`")),
        }
    }

    parser.skip_whitespace();
    if parser.peek().is_some() {
        return Err(parser.error("unexpected text after `]`"));
    }

    Ok(items)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ListSyntaxError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            _ => Err(self.error(format!("expected `{}`", expected))),
        }
    }

    fn error(&self, message: impl Into<String>) -> ListSyntaxError {
        ListSyntaxError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn string(&mut self) -> Result<String, ListSyntaxError> {
        let start = self.pos;
        let quote = self.bump().unwrap_or('\'');
        let mut out = String::new();

        loop {
            let c = match self.bump() {
                Some(c) => c,
                None => {
                    return Err(ListSyntaxError {
                        offset: start,
                        message: "unterminated string".to_string(),
                    })
                }
            };

            match c {
                c if c == quote => return Ok(out),
                '\n' => return Err(self.error("newline inside string")),
                '\\' => self.escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), ListSyntaxError> {
        let c = self
            .bump()
            .ok_or_else(|| self.error("unterminated escape"))?;

        match c {
            '\\' | '\'' | '"' => out.push(c),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '0'..='7' => out.push(self.octal(c)?),
            'x' => out.push(self.hex(2)?),
            'u' => out.push(self.hex(4)?),
            'U' => out.push(self.hex(8)?),
            'N' => return Err(self.error("named escapes are not supported")),
            // Escaped line break continues the literal.
            '\n' => {}
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    /// Up to three octal digits, the first already consumed.
    fn octal(&mut self, first: char) -> Result<char, ListSyntaxError> {
        let mut value = first.to_digit(8).unwrap_or_default();
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(digit) => {
                    self.bump();
                    value = value * 8 + digit;
                }
                None => break,
            }
        }
        char::from_u32(value).ok_or_else(|| self.error("escape is not a valid character"))
    }

    fn hex(&mut self, digits: usize) -> Result<char, ListSyntaxError> {
        let mut value = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid hex escape"))?;
            value = value * 16 + digit;
        }
        char::from_u32(value).ok_or_else(|| self.error("escape is not a valid character"))
    }
}
