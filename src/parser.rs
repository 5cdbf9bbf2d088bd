use std::mem;

use crate::{
    ast::{CompareOp, Expr, Literal, LogicalOp, Token},
    error::ParseError,
    lexer::{Lexer, Position},
};

/// Maximum nesting of groups and call arguments.
pub const MAX_DEPTH: usize = 128;

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
    depth: usize,
}

/// Parses a complete expression from source text.
///
/// # Examples
///
/// ```
/// use sqlexpr::{parse, Expr};
///
/// let expr = parse("id == 1 && val > 2").unwrap();
/// assert!(matches!(expr, Expr::LogicalOp { .. }));
/// ```
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(source))?.parse()
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_position();
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_position();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        if self.current_token == Token::Eof {
            ParseError::UnexpectedEof {
                expected: expected.to_string(),
                position: self.current_position,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current_token.to_string(),
                position: self.current_position,
            }
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&expected.to_string()));
        }
        self.advance()
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                position: self.current_position,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse primary expressions: literals, variables, calls and groups
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match &self.current_token {
            Token::Number(_)
            | Token::String(_)
            | Token::Boolean(_)
            | Token::Null
            | Token::Identifier(_) => {}
            Token::LParen => {
                return self.nested(|parser| {
                    parser.advance()?;
                    let expr = parser.parse_expression()?;
                    parser.expect(Token::RParen)?;
                    Ok(expr)
                });
            }
            _ => return Err(self.unexpected("an expression")),
        }

        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Number(n) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::Number(n)))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::String(s)))
            }
            Token::Boolean(b) => {
                self.advance()?;
                Ok(Expr::Literal(Literal::Boolean(b)))
            }
            Token::Null => {
                self.advance()?;
                Ok(Expr::Literal(Literal::Null))
            }
            Token::Identifier(name) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    let args = self.nested(|parser| {
                        parser.advance()?;
                        parser.parse_arguments()
                    })?;
                    Ok(Expr::FunctionCall { name, args })
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            _ => unreachable!("checked above"),
        }
    }

    /// Parses `arg, arg, ...)` after the opening parenthesis.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = vec![];

        if self.check(&Token::RParen) {
            self.advance()?;
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if self.check(&Token::Comma) {
                self.advance()?;
            } else {
                self.expect(Token::RParen)?;
                return Ok(args);
            }
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_primary()?;

        let op = match &self.current_token {
            Token::EqEq => CompareOp::Equal,
            Token::NotEq => CompareOp::NotEqual,
            Token::Lt => CompareOp::LessThan,
            Token::Gt => CompareOp::GreaterThan,
            Token::LtEq => CompareOp::LessEqual,
            Token::GtEq => CompareOp::GreaterEqual,
            _ => return Ok(left),
        };

        self.advance()?;
        let right = self.parse_primary()?;

        Ok(Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        while self.check(&Token::AndAnd) {
            self.advance()?;
            let right = self.parse_comparison()?;

            left = Expr::LogicalOp {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::OrOr) {
            self.advance()?;
            let right = self.parse_and()?;

            left = Expr::LogicalOp {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    /// Parses one expression and requires the input to end after it.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(Token::Eof)?;
        Ok(expr)
    }
}
