//! A tiny grammar for exercising the facade end to end.
//!
//! ```text
//! script := stmt (';' stmt)*
//! stmt   := 'var' IDENT ('=' expr)? | expr ('=' expr)?
//! expr   := term (('+' | '-' | '<') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-' unary | atom
//! atom   := INT | IDENT | STRING | '(' expr ')'
//! ```
//!
//! Parameters are supplied up front; `var` declarations become locals.

use quill::{BinaryOp, Node, ParseError, ParsedScript, ScriptParser, Span, UnaryOp};

#[derive(Default)]
pub struct FixtureParser {
    parameters: Vec<String>,
}

impl FixtureParser {
    pub fn with_parameters(parameters: &[&str]) -> Self {
        FixtureParser {
            parameters: parameters.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

impl ScriptParser for FixtureParser {
    fn parse(&self, source: &str) -> Result<ParsedScript, ParseError> {
        let tokens = lex(source)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            registers: self.parameters.clone(),
        };
        let mut statements = Vec::new();
        while parser.peek().is_some() {
            statements.push(parser.statement()?);
            if !parser.eat(&Tok::Semi) {
                break;
            }
        }
        if let Some((tok, span)) = parser.peek() {
            return Err(ParseError::syntax(format!("unexpected {tok:?}"), Some(span)));
        }
        let span = statements
            .first()
            .and_then(Node::span)
            .zip(statements.last().and_then(Node::span))
            .map(|(a, b)| a.merge(b));
        let root = match span {
            Some(span) => Node::script(statements).with_span(span),
            None => Node::script(statements),
        };
        let parameter_count = self.parameters.len();
        Ok(ParsedScript::from_registers(root, parser.registers, parameter_count)?)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Tok {
    Int(i64),
    Ident(String),
    Str(String),
    Var,
    Op(char),
    LParen,
    RParen,
    Semi,
    Assign,
}

fn lex(source: &str) -> Result<Vec<(Tok, Span)>, ParseError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        let start = i;
        let tok = match c {
            c if c.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' => {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let value = source[start..i]
                    .parse()
                    .map_err(|_| ParseError::syntax("integer too large", span(start, i)))?;
                Tok::Int(value)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                match &source[start..i] {
                    "var" => Tok::Var,
                    word => Tok::Ident(word.to_string()),
                }
            }
            '"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += 1;
                }
                if i == bytes.len() {
                    return Err(ParseError::syntax("unterminated string", span(start, i)));
                }
                i += 1;
                Tok::Str(source[start + 1..i - 1].to_string())
            }
            '+' | '-' | '*' | '/' | '<' => {
                i += 1;
                Tok::Op(c)
            }
            '(' | ')' | ';' | '=' => {
                i += 1;
                match c {
                    '(' => Tok::LParen,
                    ')' => Tok::RParen,
                    ';' => Tok::Semi,
                    _ => Tok::Assign,
                }
            }
            other => {
                return Err(ParseError::syntax(
                    format!("unexpected character {other:?}"),
                    span(start, start + 1),
                ))
            }
        };
        tokens.push((tok, Span::new(start as u32, i as u32)));
    }
    Ok(tokens)
}

fn span(start: usize, end: usize) -> Option<Span> {
    Span::try_from_range(start..end).ok()
}

struct Parser {
    tokens: Vec<(Tok, Span)>,
    pos: usize,
    registers: Vec<String>,
}

impl Parser {
    fn peek(&self) -> Option<(Tok, Span)> {
        self.tokens.get(self.pos).cloned()
    }

    fn eat(&mut self, tok: &Tok) -> bool {
        if self.tokens.get(self.pos).is_some_and(|(t, _)| t == tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn bump(&mut self) -> Result<(Tok, Span), ParseError> {
        let tok = self
            .peek()
            .ok_or_else(|| ParseError::syntax("unexpected end of input", None))?;
        self.pos += 1;
        Ok(tok)
    }

    fn register_of(&self, name: &str) -> Option<u32> {
        self.registers
            .iter()
            .position(|r| r == name)
            .and_then(|i| u32::try_from(i).ok())
    }

    fn statement(&mut self) -> Result<Node, ParseError> {
        if let Some((Tok::Var, var_span)) = self.peek() {
            self.pos += 1;
            let (name, name_span) = match self.bump()? {
                (Tok::Ident(name), span) => (name, span),
                (tok, span) => {
                    return Err(ParseError::syntax(format!("expected name, found {tok:?}"), Some(span)))
                }
            };
            let register = match self.register_of(&name) {
                Some(register) => register,
                None => {
                    self.registers.push(name.clone());
                    u32::try_from(self.registers.len() - 1)
                        .map_err(|_| ParseError::syntax("too many locals", Some(name_span)))?
                }
            };
            let init = if self.eat(&Tok::Assign) {
                Some(self.expr()?)
            } else {
                None
            };
            let end = init.as_ref().and_then(Node::span).unwrap_or(name_span);
            return Ok(Node::var(name, register, init).with_span(var_span.merge(end)));
        }

        let target = self.expr()?;
        if self.eat(&Tok::Assign) {
            let value = self.expr()?;
            let span = target.span().zip(value.span()).map(|(a, b)| a.merge(b));
            let node = Node::assign(target, value);
            return Ok(match span {
                Some(span) => node.with_span(span),
                None => node,
            });
        }
        Ok(target)
    }

    fn expr(&mut self) -> Result<Node, ParseError> {
        let mut left = self.term()?;
        while let Some((Tok::Op(c @ ('+' | '-' | '<')), _)) = self.peek() {
            self.pos += 1;
            let op = match c {
                '+' => BinaryOp::Add,
                '-' => BinaryOp::Sub,
                _ => BinaryOp::Lt,
            };
            let right = self.term()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        let mut left = self.unary()?;
        while let Some((Tok::Op(c @ ('*' | '/')), _)) = self.peek() {
            self.pos += 1;
            let op = if c == '*' { BinaryOp::Mul } else { BinaryOp::Div };
            let right = self.unary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if let Some((Tok::Op('-'), minus)) = self.peek() {
            self.pos += 1;
            let operand = self.unary()?;
            let end = operand.span().unwrap_or(minus);
            return Ok(Node::unary(UnaryOp::Neg, operand).with_span(minus.merge(end)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Node, ParseError> {
        match self.bump()? {
            (Tok::Int(v), span) => Ok(Node::int(v).with_span(span)),
            (Tok::Str(s), span) => Ok(Node::string(s).with_span(span)),
            (Tok::Ident(name), span) => Ok(match self.register_of(&name) {
                Some(register) => Node::register(name, register),
                None => Node::ident(name),
            }
            .with_span(span)),
            (Tok::LParen, _) => {
                let inner = self.expr()?;
                if self.eat(&Tok::RParen) {
                    Ok(inner)
                } else {
                    Err(ParseError::syntax("expected `)`", inner.span()))
                }
            }
            (tok, span) => Err(ParseError::syntax(format!("unexpected {tok:?}"), Some(span))),
        }
    }
}

fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
    let span = left.span().zip(right.span()).map(|(a, b)| a.merge(b));
    let node = Node::binary(op, left, right);
    match span {
        Some(span) => node.with_span(span),
        None => node,
    }
}
