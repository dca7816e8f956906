//! Apple `.strings` entries.
//!
//! ```text
//! /* Window title */
//! "title" = "Hello, world!";
//! // Bare keys are accepted too.
//! max_items = "20";
//! ```
//!
//! Values are always strings. Escapes (`\"`, `\\`, `\n`, `\t`, `\r`, `\Uxxxx`)
//! are resolved. Bytes are decoded by BOM, so UTF-16 files work as well as UTF-8.

use std::io::Read;
use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

use crate::{error::Error, traits::DocumentParser, types::LocalizedData};

#[derive(Debug, Default, Clone, Copy)]
pub struct StringsParser;

impl DocumentParser for StringsParser {
    fn parse(&self, bytes: &[u8]) -> Result<LocalizedData, Error> {
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(bytes);
        let mut content = String::new();
        decoder.read_to_string(&mut content)?;

        let mut scanner = Scanner::new(&content);
        let mut data = LocalizedData::new();
        while let Some((key, value)) = scanner.next_pair()? {
            data.insert(key, Value::String(value));
        }
        Ok(data)
    }
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl AsRef<str>) -> Error {
        Error::InvalidResource(format!("line {}: {}", self.line, message.as_ref()))
    }

    fn next_pair(&mut self) -> Result<Option<(String, String)>, Error> {
        self.skip_trivia()?;
        if self.chars.peek().is_none() {
            return Ok(None);
        }
        let key = self.token("key")?;
        self.skip_trivia()?;
        self.expect('=')?;
        self.skip_trivia()?;
        let value = self.token("value")?;
        self.skip_trivia()?;
        self.expect(';')?;
        Ok(Some((key, value)))
    }

    /// Skips whitespace, `//` line comments and `/* */` block comments.
    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            match self.chars.peek().copied() {
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    match lookahead.peek() {
                        Some('/') => {
                            while let Some(c) = self.bump() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            self.bump();
                            self.bump();
                            self.skip_block_comment()?;
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), Error> {
        while let Some(c) = self.bump() {
            if c == '*' && self.chars.peek() == Some(&'/') {
                self.bump();
                return Ok(());
            }
        }
        Err(self.error("unterminated comment"))
    }

    fn expect(&mut self, expected: char) -> Result<(), Error> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected `{}`, found `{}`", expected, c))),
            None => Err(self.error(format!("expected `{}`, found end of input", expected))),
        }
    }

    fn token(&mut self, what: &str) -> Result<String, Error> {
        match self.chars.peek().copied() {
            Some('"') => {
                self.bump();
                self.quoted()
            }
            Some(c) if is_bare_char(c) => {
                let mut token = String::new();
                while let Some(c) = self.chars.peek().copied().filter(|c| is_bare_char(*c)) {
                    token.push(c);
                    self.bump();
                }
                Ok(token)
            }
            Some(c) => Err(self.error(format!("expected a {}, found `{}`", what, c))),
            None => Err(self.error(format!("expected a {}, found end of input", what))),
        }
    }

    fn quoted(&mut self) -> Result<String, Error> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn escape(&mut self) -> Result<char, Error> {
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('0') => Ok('\0'),
            Some('U') | Some('u') => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self
                        .bump()
                        .and_then(|c| c.to_digit(16))
                        .ok_or_else(|| self.error("invalid unicode escape"))?;
                    code = code * 16 + digit;
                }
                char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))
            }
            Some(c) => Ok(c),
            None => Err(self.error("unterminated string")),
        }
    }
}

fn is_bare_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '$' | ':')
}
