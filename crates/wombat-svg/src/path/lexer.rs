//! Tokenizer for path data.
//!
//! [SVG 1.1 § 8.3.9 The grammar for path data](https://www.w3.org/TR/SVG11/paths.html#PathDataBNF)

use crate::error::SvgError;

/// A path data token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A command letter.
    Letter(char),
    /// A number, with optional sign, fraction and exponent.
    Number(f64),
    /// The end of the data.
    End,
}

/// Cursor over path data.
///
/// Whitespace and commas separate tokens and are skipped.
#[derive(Debug, Clone)]
pub struct PathLexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> PathLexer<'a> {
    /// Create a lexer at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// The next token without consuming it.
    ///
    /// # Errors
    ///
    /// [`SvgError::MalformedAttributeValue`] on characters that start no token.
    pub fn peek(&self) -> Result<Token, SvgError> {
        self.scan().map(|(token, _)| token)
    }

    /// Consume and return the next token. [`Token::End`] repeats forever.
    ///
    /// # Errors
    ///
    /// As [`PathLexer::peek`].
    pub fn next_token(&mut self) -> Result<Token, SvgError> {
        let (token, end) = self.scan()?;
        self.pos = end;
        Ok(token)
    }

    /// Read the token at the cursor, returning it with its end offset.
    fn scan(&self) -> Result<(Token, usize), SvgError> {
        let bytes = self.source.as_bytes();
        let mut start = self.pos;
        while start < bytes.len() && (bytes[start].is_ascii_whitespace() || bytes[start] == b',') {
            start += 1;
        }

        let Some(&first) = bytes.get(start) else {
            return Ok((Token::End, start));
        };
        match first {
            b if b.is_ascii_alphabetic() => Ok((Token::Letter(char::from(b)), start + 1)),
            b'0'..=b'9' | b'.' | b'+' | b'-' => self.scan_number(start),
            _ => Err(SvgError::malformed(
                &self.source[start..],
                "unexpected character in path data",
            )),
        }
    }

    /// [§ 8.3.9](https://www.w3.org/TR/SVG11/paths.html#PathDataBNF)
    ///
    /// ```text
    /// number: sign? integer-constant | sign? floating-point-constant
    /// exponent: ( "e" | "E" ) sign? digit-sequence
    /// ```
    fn scan_number(&self, start: usize) -> Result<(Token, usize), SvgError> {
        let bytes = self.source.as_bytes();
        let digits_from = |mut index: usize| {
            while bytes.get(index).is_some_and(u8::is_ascii_digit) {
                index += 1;
            }
            index
        };

        let mut end = start;
        if matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let integer_end = digits_from(end);
        let mut has_digits = integer_end > end;
        end = integer_end;
        if bytes.get(end) == Some(&b'.') {
            let fraction_end = digits_from(end + 1);
            has_digits |= fraction_end > end + 1;
            end = fraction_end;
        }
        if !has_digits {
            return Err(SvgError::malformed(&self.source[start..], "expected a number"));
        }

        // An `e` only belongs to the number when digits follow it.
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent = end + 1;
            if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
                exponent += 1;
            }
            let exponent_end = digits_from(exponent);
            if exponent_end > exponent {
                end = exponent_end;
            }
        }

        self.source[start..end]
            .parse::<f64>()
            .map(|value| (Token::Number(value), end))
            .map_err(|_| SvgError::malformed(&self.source[start..end], "expected a number"))
    }
}
