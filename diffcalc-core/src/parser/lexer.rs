use crate::parser::ast::BinaryOp;
use crate::parser::error::ParseError;
use std::fmt;

/// Character range of a token in the source line (zero-based, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Represents different kinds of tokens in an expression
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Literals
    Number(String),     // 3, 2.5, .5, 1e-3
    Identifier(String), // x, sin, Pi, _tmp$1

    // Operators
    Operator(BinaryOp), // + - * / ^

    // Delimiters
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,

    // End of input
    Eof,
}

/// A token together with the characters it was read from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Token {
            kind,
            span: Span::new(start, end),
        }
    }

    /// Offset of the first character of the token
    pub fn position(&self) -> usize {
        self.span.start
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(text) => write!(f, "{}", text),
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::Operator(op) => write!(f, "{}", op),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Tokenizes a single expression line
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Lexer {
            input: chars,
            position: 0,
            current_char,
        }
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Read a numeric literal.
    ///
    /// Accepts at most one decimal point and one exponent marker; the exponent
    /// may carry a sign. Scanning stops at the first repeat, so the text handed
    /// to the parser never contains two dots or two exponents.
    fn read_number(&mut self) -> Token {
        let start = self.position;
        let mut seen_dot = false;
        let mut seen_exp = false;

        while let Some(ch) = self.current_char {
            match ch {
                d if d.is_ascii_digit() => self.advance(),
                '.' if !seen_dot => {
                    seen_dot = true;
                    self.advance();
                }
                'e' | 'E' if !seen_exp => {
                    seen_exp = true;
                    self.advance();
                    if matches!(self.current_char, Some('+') | Some('-')) {
                        self.advance();
                    }
                }
                _ => break,
            }
        }

        Token::new(TokenKind::Number(self.slice(start)), start, self.position)
    }

    /// Read an identifier; case is kept as typed
    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        self.advance();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Identifier(self.slice(start)), start, self.position)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.advance();
        Token::new(kind, start, self.position)
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();

        let token = match self.current_char {
            None => Token::new(TokenKind::Eof, self.position, self.position),

            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some('.') if self.peek().is_some_and(|next| next.is_ascii_digit()) => {
                self.read_number()
            }

            Some(ch) if ch.is_alphabetic() || ch == '_' => self.read_identifier(),

            Some('+') => self.single(TokenKind::Operator(BinaryOp::Add)),
            Some('-') => self.single(TokenKind::Operator(BinaryOp::Sub)),
            Some('*') => self.single(TokenKind::Operator(BinaryOp::Mul)),
            Some('/') => self.single(TokenKind::Operator(BinaryOp::Div)),
            Some('^') => self.single(TokenKind::Operator(BinaryOp::Pow)),
            Some('(') => self.single(TokenKind::LeftParen),
            Some(')') => self.single(TokenKind::RightParen),
            Some(',') => self.single(TokenKind::Comma),

            Some(ch) => {
                return Err(ParseError::UnexpectedCharacter {
                    ch,
                    position: self.position,
                })
            }
        };

        Ok(token)
    }

    /// Tokenize the entire input. The result always ends with exactly one `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

/// Convenience function to tokenize a string
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).tokenize()
}
