use crate::parser::{
    ast::{BinaryOp, Node},
    builtins::get_registry,
    error::ParseError,
    lexer::{Lexer, Token, TokenKind},
};

/// Recursive descent parser for arithmetic expressions
///
/// Grammar, loosest binding first:
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := power (('*' | '/') power)*
/// power      := unary ('^' power)?
/// unary      := '+' unary | '-' unary | primary
/// primary    := NUMBER | IDENT ['(' [expression (',' expression)*] ')'] | '(' expression ')'
/// ```
///
/// Parentheses, signs, powers, calls and chained binary operators each add a
/// level to the tree; more than [`MAX_DEPTH`] levels is a `TooDeep` error.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

/// Deepest tree the parser will build
pub const MAX_DEPTH: usize = 256;

impl Parser {
    /// Create a new parser from input string
    pub fn new(input: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Create a parser over an existing token sequence.
    /// A trailing `Eof` is appended if the sequence lacks one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, end, end));
        }

        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Enter one tree level. Errors abort the parse, so only the success
    /// paths give levels back.
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                position: self.current().position(),
            });
        }
        Ok(())
    }

    /// Run `parse` one level down
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.descend()?;
        let result = parse(self)?;
        self.depth -= 1;
        Ok(result)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Advance to the next token; never moves past `Eof`
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    /// Consume the current token if it is the given operator
    fn match_operator(&mut self, ops: &[BinaryOp]) -> Option<BinaryOp> {
        match self.current().kind {
            TokenKind::Operator(op) if ops.contains(&op) => {
                self.advance();
                Some(op)
            }
            _ => None,
        }
    }

    /// Check if current token matches expected kind and consume it
    fn expect(&mut self, expected: TokenKind, description: &str) -> Result<(), ParseError> {
        if self.check(&expected) {
            self.advance();
            Ok(())
        } else {
            let current = self.current();
            Err(ParseError::Expected {
                expected: description.to_string(),
                found: current.to_string(),
                position: current.position(),
            })
        }
    }

    /// Parse the whole token sequence into one expression
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_expression()?;
        self.expect(TokenKind::Eof, "end of expression")?;
        Ok(node)
    }

    /// Additive level, left-associative
    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_term()?;
        let mut chained = 0;

        while let Some(op) = self.match_operator(&[BinaryOp::Add, BinaryOp::Sub]) {
            self.descend()?;
            chained += 1;
            let right = self.parse_term()?;
            left = Node::binary(op, left, right);
        }

        self.depth -= chained;
        Ok(left)
    }

    /// Multiplicative level, left-associative
    fn parse_term(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_power()?;
        let mut chained = 0;

        while let Some(op) = self.match_operator(&[BinaryOp::Mul, BinaryOp::Div]) {
            self.descend()?;
            chained += 1;
            let right = self.parse_power()?;
            left = Node::binary(op, left, right);
        }

        self.depth -= chained;
        Ok(left)
    }

    /// Exponent level; recursion on the right makes `^` right-associative
    fn parse_power(&mut self) -> Result<Node, ParseError> {
        let base = self.parse_unary()?;

        if self.match_operator(&[BinaryOp::Pow]).is_some() {
            let exponent = self.nested(Self::parse_power)?;
            return Ok(Node::binary(BinaryOp::Pow, base, exponent));
        }

        Ok(base)
    }

    /// Prefix signs; unary plus is dropped
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.match_operator(&[BinaryOp::Add]).is_some() {
            return self.nested(Self::parse_unary);
        }
        if self.match_operator(&[BinaryOp::Sub]).is_some() {
            return Ok(Node::negate(self.nested(Self::parse_unary)?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Number(text) => {
                self.advance();
                text.parse::<f64>()
                    .map(Node::Number)
                    .map_err(|_| ParseError::InvalidNumber {
                        text,
                        position: token.span.start,
                    })
            }

            TokenKind::Identifier(name) => {
                self.advance();
                let canonical = name.to_lowercase();

                if self.check(&TokenKind::LeftParen) {
                    self.advance();
                    return self.nested(|p| p.parse_call(name, canonical, token.span.start));
                }

                // Constants fold into literals and never reach the environment
                if let Some(value) = get_registry().constant_value(&canonical) {
                    return Ok(Node::Number(value));
                }

                Ok(Node::Variable(name))
            }

            TokenKind::LeftParen => {
                self.advance();
                let inner = self.nested(Self::parse_expression)?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(inner)
            }

            _ => Err(ParseError::UnexpectedToken {
                token: token.to_string(),
                position: token.span.start,
            }),
        }
    }

    /// Parse the argument list of a call; the opening paren is already consumed
    fn parse_call(
        &mut self,
        name: String,
        canonical: String,
        position: usize,
    ) -> Result<Node, ParseError> {
        let mut args = Vec::new();

        if !self.check(&TokenKind::RightParen) {
            args.push(self.parse_expression()?);

            while self.check(&TokenKind::Comma) {
                self.advance(); // consume ','
                args.push(self.parse_expression()?);
            }
        }

        let description = format!("')' after arguments of {}", name);
        self.expect(TokenKind::RightParen, &description)?;

        if !get_registry().is_function(&canonical) {
            return Err(ParseError::UnknownFunction { name, position });
        }

        Ok(Node::Call {
            name,
            canonical,
            args,
        })
    }
}

/// Convenience function to parse a string into an expression tree
pub fn parse(input: &str) -> Result<Node, ParseError> {
    let mut parser = Parser::new(input)?;
    parser.parse()
}

/// Parse an already tokenized expression
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Node, ParseError> {
    Parser::from_tokens(tokens).parse()
}
