use crate::ParserError;

/// Parser that can parse a single line of a UCD data file
pub struct StrParser<'a> {
    pub line   : usize,
    pub column : usize,
    pub string : &'a str
}

impl<'a> StrParser<'a> {
    /// Create a new parser
    pub fn new(string: &'a str) -> Self {
        Self { line: 0, column: 0, string }
    }

    /// Create a new parser for a line at the given line number, the comment part of the line is dropped
    pub fn for_line(string: &'a str, line: usize) -> Self {
        Self { line, column: 0, string: Self::strip_comment(string) }
    }

    /// Get the part of a line in front of its `#` comment
    pub fn strip_comment(string: &str) -> &str {
        match string.find('#') {
            Some(idx) => &string[..idx],
            None => string,
        }
    }

    /// Try to consume a given character
    pub fn consume_char(&mut self, ch: char) -> bool {
        if self.string.starts_with(ch) {
            self.consume_count(ch.len_utf8());
            true
        } else {
            false
        }
    }

    /// Try ot consume a given string
    pub fn consume_str(&mut self, s: &str) -> bool {
        if self.string.starts_with(s) {
            self.consume_count(s.len());
            true
        } else {
            false
        }
    }

    /// Consume `count` bytes
    pub fn consume_count(&mut self, count: usize) {
        self.column += self.string[..count].chars().count();
        self.string = &self.string[count..];
    }

    pub fn consume_whitespace(&mut self) {
        let idx = self.string.find(|ch: char| !ch.is_whitespace()).unwrap_or(self.string.len());
        self.consume_count(idx);
    }

    /// Check if there is still data to parse
    pub fn can_parse(&self) -> bool {
        !self.string.trim().is_empty()
    }

    /// Create an error at the current line and column
    pub fn error(&self, msg: &'static str) -> ParserError {
        ParserError { line: self.line, column: self.column, msg }
    }

    /// Extract until a character matching `pred` is reached, the matching character is not consumed
    pub fn extract_until<P: FnMut(char) -> bool>(&mut self, pred: P) -> &'a str {
        let idx = self.string.find(pred).unwrap_or(self.string.len());
        let res = &self.string[..idx];
        self.consume_count(idx);
        res
    }

    /// Extract the next `;` separated field, trimmed of whitespace
    /// 
    /// Returns `None` when there are no fields left
    pub fn next_field(&mut self) -> Option<&'a str> {
        if self.string.is_empty() {
            return None;
        }
        let field = self.extract_until(|ch| ch == ';');
        self.consume_char(';');
        Some(field.trim())
    }

    /// Parse a field containing a single hexadecimal code point
    pub fn code_point_field(&mut self) -> Result<u32, ParserError> {
        self.consume_whitespace();
        let err = self.error("expected a hexadecimal code point");
        let field = self.next_field().ok_or(err)?;
        parse_hex_code_point(field).ok_or(err)
    }

    /// Parse a field containing a space separated sequence of hexadecimal code points
    pub fn code_point_sequence_field(&mut self) -> Result<Vec<u32>, ParserError> {
        self.consume_whitespace();
        let err = self.error("expected a sequence of hexadecimal code points");
        let field = self.next_field().ok_or(err)?;
        let seq = field.split_whitespace()
            .map(parse_hex_code_point)
            .collect::<Option<Vec<_>>>()
            .ok_or(err)?;
        if seq.is_empty() {
            Err(err)
        } else {
            Ok(seq)
        }
    }

    /// Split the remaining text into the words separated by whitespace or `;`
    pub fn words(&mut self) -> impl Iterator<Item = &'a str> {
        let rest = self.string;
        self.consume_count(rest.len());
        rest.split(|ch: char| ch == ';' || ch.is_whitespace()).filter(|word| !word.is_empty())
    }
}

/// Largest code point
const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Parse a hexadecimal code point of 4 to 6 digits, without any prefix, values past U+10FFFF are rejected
pub fn parse_hex_code_point(s: &str) -> Option<u32> {
    if s.len() < 4 || s.len() > 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(s, 16).ok().filter(|&c| c <= MAX_CODE_POINT)
}
