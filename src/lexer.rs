use crate::error::{LexResult, LexerErrKind, LexerError};
use crate::token::{check_reserved, Token};

static EOF_TOKEN: Token = Token::Eof;

/// Stream-driven tokenizer for Mython source text. Keeps the running
/// indentation level across calls and synthesizes the structural
/// `Newline`/`Indent`/`Dedent` tokens that never appear literally in
/// the input.
#[derive(Debug, Clone)]
pub struct Lexer {
    code: Vec<u8>,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
    current_indent: usize,
}

impl Lexer {
    /// Build a lexer over `code` and read the first token.
    pub fn new(code: impl Into<String>) -> LexResult<Self> {
        let mut lexer = Lexer {
            code: code.into().into_bytes(),
            pos: 0,
            line: 1,
            tokens: vec![],
            current_indent: 0,
        };
        lexer.read_token()?;
        Ok(lexer)
    }

    /// The most recently read token, or `Eof` before any token was read.
    pub fn current_token(&self) -> &Token {
        self.tokens.last().unwrap_or(&EOF_TOKEN)
    }

    /// Advance and return the new current token. Once the input is
    /// exhausted this returns `Eof` forever.
    pub fn next_token(&mut self) -> LexResult<&Token> {
        let added = self.read_token()?;
        if added {
            Ok(self.current_token())
        } else {
            Ok(&EOF_TOKEN)
        }
    }
}

impl Lexer {
    /// Require the current token to equal `expected`, payload included.
    pub fn expect(&self, expected: &Token) -> LexResult<()> {
        let found = self.current_token();
        if found == expected {
            Ok(())
        } else {
            Err(self.error_unexpected(&expected.to_string(), found))
        }
    }

    /// Require the current token to be an identifier and return its name.
    pub fn expect_id(&self) -> LexResult<&str> {
        match self.current_token() {
            Token::Id(name) => Ok(name),
            found => Err(self.error_unexpected("Id", found)),
        }
    }

    /// Require the current token to be a number literal.
    pub fn expect_number(&self) -> LexResult<i64> {
        match self.current_token() {
            Token::Number(num) => Ok(*num),
            found => Err(self.error_unexpected("Number", found)),
        }
    }

    /// Require the current token to be a string literal.
    pub fn expect_string(&self) -> LexResult<&str> {
        match self.current_token() {
            Token::String(s) => Ok(s),
            found => Err(self.error_unexpected("String", found)),
        }
    }

    /// Advance, then require the new token to equal `expected`.
    pub fn expect_next(&mut self, expected: &Token) -> LexResult<()> {
        let found = self.next_token()?.clone();
        if &found == expected {
            Ok(())
        } else {
            Err(self.error_unexpected(&expected.to_string(), &found))
        }
    }

    /// Advance, then require an identifier and return its name.
    pub fn expect_next_id(&mut self) -> LexResult<String> {
        match self.next_token()?.clone() {
            Token::Id(name) => Ok(name),
            found => Err(self.error_unexpected("Id", &found)),
        }
    }

    /// Advance, then require a number literal.
    pub fn expect_next_number(&mut self) -> LexResult<i64> {
        match self.next_token()?.clone() {
            Token::Number(num) => Ok(num),
            found => Err(self.error_unexpected("Number", &found)),
        }
    }

    /// Advance, then require a string literal.
    pub fn expect_next_string(&mut self) -> LexResult<String> {
        match self.next_token()?.clone() {
            Token::String(s) => Ok(s),
            found => Err(self.error_unexpected("String", &found)),
        }
    }

    fn error_unexpected(&self, expected: &str, found: &Token) -> LexerError {
        self.error(LexerErrKind::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        })
    }
}

impl Lexer {
    /// Read one more token into the history. Returns false once the
    /// input is exhausted.
    fn read_token(&mut self) -> LexResult<bool> {
        if self.peek().is_none() {
            return Ok(false);
        }
        if self.at_line_start() && self.calculate_indent()? {
            return Ok(true);
        }
        self.remove_spaces();
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(false),
        };
        let token = match c {
            b'\n' => {
                self.bump();
                if self.tokens.is_empty() {
                    // Nothing before the first line terminator: keep scanning.
                    return self.read_token();
                }
                Token::Newline
            }
            c if c.is_ascii_alphabetic() || c == b'_' => self.read_keyword_or_id(),
            c if c.is_ascii_digit() => self.read_number()?,
            b'\'' | b'"' => {
                self.bump();
                self.read_string(c)?
            }
            b'=' | b'<' | b'>' | b'!' => {
                self.bump();
                self.read_compare_op(c)
            }
            c => {
                self.bump();
                Token::Char(c)
            }
        };
        self.tokens.push(token);
        Ok(true)
    }

    /// Indentation is recomputed only at the start of a logical line.
    fn at_line_start(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::Newline) | Some(Token::Dedent))
    }

    /// Compute the indentation step at the start of a logical line.
    /// Emits at most one `Indent` or `Dedent` per call; the counted
    /// spaces are pushed back so that a deeper dedent is re-examined by
    /// the next call. Lines holding no token are consumed here and emit
    /// nothing.
    fn calculate_indent(&mut self) -> LexResult<bool> {
        loop {
            let mut count = 0usize;
            while self.peek() == Some(b' ') {
                self.bump();
                count += 1;
            }
            match self.peek() {
                Some(b'\n') => {
                    self.bump();
                    continue;
                }
                None => return Ok(false),
                Some(_) => {}
            }
            let diff = count as i64 - self.current_indent as i64;
            if diff == 0 {
                // The spaces stay consumed; the line body starts here.
                return Ok(false);
            }
            if diff % 2 != 0 {
                return Err(self.error(LexerErrKind::UnevenIndent));
            }
            if diff > 0 {
                self.tokens.push(Token::Indent);
                self.current_indent += 2;
            } else {
                self.tokens.push(Token::Dedent);
                self.current_indent -= 2;
            }
            self.pushback(count);
            return Ok(true);
        }
    }

    /// Skip whitespace within a line. The line terminator is left in
    /// place so it always reaches the dispatch.
    fn remove_spaces(&mut self) {
        while let Some(c) = self.peek() {
            if c != b'\n' && c.is_ascii_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Read a maximal `[A-Za-z0-9_]` run and classify it.
    fn read_keyword_or_id(&mut self) -> Token {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' {
                self.bump();
                word.push(c as char);
            } else {
                break;
            }
        }
        match check_reserved(&word) {
            Some(token) => token,
            None => Token::Id(word),
        }
    }

    /// Read a base-10 number literal.
    fn read_number(&mut self) -> LexResult<Token> {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.bump();
                digits.push(c as char);
            } else {
                break;
            }
        }
        let num = digits
            .parse::<i64>()
            .map_err(|_| self.error(LexerErrKind::NumberOverflow))?;
        Ok(Token::Number(num))
    }

    /// Read a string literal. `open` is the already-consumed quote; the
    /// other quote kind may appear literally inside. No escapes.
    fn read_string(&mut self, open: u8) -> LexResult<Token> {
        let mut s = String::new();
        loop {
            match self.get() {
                Some(c) if c == open => return Ok(Token::String(s)),
                Some(c) => s.push(c as char),
                None => return Err(self.error(LexerErrKind::UnterminatedString)),
            }
        }
    }

    /// `first` is one of `= < > !`, already consumed. A following `=`
    /// makes a two-character operator, otherwise `first` stands alone.
    fn read_compare_op(&mut self, first: u8) -> Token {
        if self.peek() == Some(b'=') {
            self.bump();
            match first {
                b'=' => Token::Eq,
                b'<' => Token::LessOrEq,
                b'>' => Token::GreaterOrEq,
                _ => Token::NotEq,
            }
        } else {
            Token::Char(first)
        }
    }
}

impl Lexer {
    fn peek(&self) -> Option<u8> {
        self.code.get(self.pos).copied()
    }

    fn bump(&mut self) {
        if let Some(c) = self.code.get(self.pos) {
            if *c == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn get(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.bump();
        Some(c)
    }

    /// Return the last `count` consumed bytes to the input.
    fn pushback(&mut self, count: usize) {
        self.pos -= count;
    }

    fn error(&self, kind: LexerErrKind) -> LexerError {
        LexerError::new(kind, self.line)
    }
}
