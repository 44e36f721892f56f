//! 路径表达式词法与语法分析
//!
//! ```text
//! sequence := expr (',' expr)*
//! expr     := term (('+' | '-') term)*
//! term     := unary (('*' | '/') unary)*
//! unary    := ('+' | '-') unary | ('++' | '--') unary | postfix
//! postfix  := primary ('++' | '--')?
//! primary  := number | 'x' | constant | function '(' args ')' | '(' sequence ')'
//! args     := (expr (',' expr)* ','?)?
//! ```
//!
//! `E` 永远是常量，`1E5` 不是科学计数法。自增/自减的操作数只能是 `x`。

use super::expression::{Ast, BinaryOp, MathName, UpdateOp};
use crate::core::error::{ExpressionError, ExpressionResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Update(UpdateOp),
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(v) => write!(f, "{}", v),
            TokenKind::Ident(name) => write!(f, "{}", name),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Update(op) => write!(f, "{}", op.symbol()),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Eof => write!(f, "<end>"),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    position: usize,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn read_number(&mut self) -> ExpressionResult<f64> {
        let start = self.pos;
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.bump();
        }

        let literal = &self.input[start..self.pos];
        literal
            .parse()
            .map_err(|_| ExpressionError::InvalidNumber {
                literal: literal.to_string(),
                position: start,
            })
    }

    fn read_ident(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek_char(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.bump();
        }
        self.input[start..self.pos].to_string()
    }

    /// `+`/`-`，紧跟同一字符时为 `++`/`--`
    fn operator(&mut self, kind: TokenKind, update: UpdateOp) -> TokenKind {
        let repeated = self.peek_second() == self.peek_char();
        self.bump();
        if repeated {
            self.bump();
            return TokenKind::Update(update);
        }
        kind
    }

    fn next_token(&mut self) -> ExpressionResult<Token> {
        self.skip_whitespace();
        let position = self.pos;

        let Some(c) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position,
            });
        };

        let kind = match c {
            '0'..='9' | '.' => TokenKind::Number(self.read_number()?),
            c if c.is_ascii_alphabetic() || c == '_' => TokenKind::Ident(self.read_ident()),
            '+' => self.operator(TokenKind::Plus, UpdateOp::Increment),
            '-' => self.operator(TokenKind::Minus, UpdateOp::Decrement),
            '*' => {
                self.bump();
                TokenKind::Star
            }
            '/' => {
                self.bump();
                TokenKind::Slash
            }
            '(' => {
                self.bump();
                TokenKind::LParen
            }
            ')' => {
                self.bump();
                TokenKind::RParen
            }
            ',' => {
                self.bump();
                TokenKind::Comma
            }
            other => {
                return Err(ExpressionError::UnexpectedChar {
                    ch: other,
                    position,
                })
            }
        };

        Ok(Token { kind, position })
    }

    fn tokenize(mut self) -> ExpressionResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize() 保证最后一个记号是 Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn unexpected(token: &Token) -> ExpressionError {
        match token.kind {
            TokenKind::Eof => ExpressionError::UnexpectedEnd,
            ref kind => ExpressionError::UnexpectedToken {
                token: kind.to_string(),
                position: token.position,
            },
        }
    }

    fn parse_sequence(&mut self) -> ExpressionResult<Ast> {
        let first = self.parse_expr()?;
        if self.peek().kind != TokenKind::Comma {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.peek().kind == TokenKind::Comma {
            self.advance();
            items.push(self.parse_expr()?);
        }
        Ok(Ast::Sequence(items))
    }

    fn parse_expr(&mut self) -> ExpressionResult<Ast> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Ast::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_term(&mut self) -> ExpressionResult<Ast> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Ast::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_unary(&mut self) -> ExpressionResult<Ast> {
        match self.peek().kind {
            TokenKind::Minus => {
                self.advance();
                Ok(Ast::Negate(Box::new(self.parse_unary()?)))
            }
            TokenKind::Plus => {
                self.advance();
                self.parse_unary()
            }
            TokenKind::Update(op) => {
                self.advance();
                match self.parse_unary()? {
                    Ast::Variable => Ok(Ast::Update { op, prefix: true }),
                    _ => Err(ExpressionError::InvalidUpdateTarget(op.symbol().to_string())),
                }
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> ExpressionResult<Ast> {
        let mut operand = self.parse_primary()?;
        while let TokenKind::Update(op) = self.peek().kind {
            if operand != Ast::Variable {
                return Err(ExpressionError::InvalidUpdateTarget(op.symbol().to_string()));
            }
            self.advance();
            operand = Ast::Update { op, prefix: false };
        }
        Ok(operand)
    }

    fn parse_primary(&mut self) -> ExpressionResult<Ast> {
        let Token { kind, position } = self.advance();
        match kind {
            TokenKind::Number(v) => Ok(Ast::Number(v)),
            TokenKind::Ident(name) => self.parse_ident(name),
            TokenKind::LParen => {
                let inner = self.parse_sequence()?;
                self.expect_close(position)?;
                Ok(inner)
            }
            kind => Err(Self::unexpected(&Token { kind, position })),
        }
    }

    fn parse_ident(&mut self, name: String) -> ExpressionResult<Ast> {
        let followed_by_call = self.peek().kind == TokenKind::LParen;

        if name == "x" {
            if followed_by_call {
                return Err(ExpressionError::NotCallable(name));
            }
            return Ok(Ast::Variable);
        }

        let math = MathName::lookup(&name)
            .ok_or_else(|| ExpressionError::UnknownIdentifier(name.clone()))?;
        if let MathName::Constant(constant) = math {
            if followed_by_call {
                return Err(ExpressionError::NotCallable(name));
            }
            return Ok(Ast::Constant(constant));
        }

        if !followed_by_call {
            return Err(ExpressionError::MissingCall(name));
        }
        let open = self.advance();
        let mut args = self.parse_args(open.position)?.into_iter();

        let ast = match math {
            MathName::Unary(function) => Ast::UnaryCall {
                function,
                arg: Box::new(next_arg(&mut args)),
                extra: args.collect(),
            },
            MathName::Binary(function) => Ast::BinaryCall {
                function,
                lhs: Box::new(next_arg(&mut args)),
                rhs: Box::new(next_arg(&mut args)),
                extra: args.collect(),
            },
            MathName::Constant(_) => unreachable!("constants are handled above"),
        };
        Ok(ast)
    }

    fn parse_args(&mut self, open_position: usize) -> ExpressionResult<Vec<Ast>> {
        let mut args = Vec::new();
        while self.peek().kind != TokenKind::RParen {
            args.push(self.parse_expr()?);
            if self.peek().kind != TokenKind::Comma {
                break;
            }
            self.advance();
        }
        self.expect_close(open_position)?;
        Ok(args)
    }

    fn expect_close(&mut self, open_position: usize) -> ExpressionResult<()> {
        let token = self.advance();
        match token.kind {
            TokenKind::RParen => Ok(()),
            TokenKind::Eof => Err(ExpressionError::UnclosedParenthesis(open_position)),
            _ => Err(Self::unexpected(&token)),
        }
    }
}

/// 缺少的参数按 `NaN` 处理
fn next_arg(args: &mut impl Iterator<Item = Ast>) -> Ast {
    args.next().unwrap_or(Ast::Number(f64::NAN))
}

/// 将过滤后的文本解析为语法树
pub fn parse(source: &str) -> ExpressionResult<Ast> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };
    let ast = parser.parse_sequence()?;

    let trailing = parser.peek();
    if trailing.kind != TokenKind::Eof {
        return Err(Parser::unexpected(trailing));
    }
    Ok(ast)
}
