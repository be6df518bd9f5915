//! Recursive-descent AST builder.
//!
//! ```text
//! program      := assignment
//! assignment   := primary ('=' primary)?
//! primary      := (literal | array | object | identifier) memberOrCall*
//! memberOrCall := '.' identifier | '[' assignment ']' | '(' arguments ')'
//! array        := '[' (assignment (',' assignment)* ','?)? ']'
//! object       := '{' (key ':' assignment (',' key ':' assignment)*)? '}'
//! arguments    := (assignment (',' assignment)*)?
//! key          := identifier | literal
//! ```

use crate::ast::{Literal, Node, Property, PropertyKey};
use crate::error::ParseError;
use crate::lexer::{Token, TokenValue};
use crate::options::ParseOptions;

/// Keywords that parse to fixed nodes instead of identifiers.
fn keyword(token: &Token) -> Option<Node> {
    if !token.identifier {
        return None;
    }
    match token.text.as_str() {
        "null" => Some(Node::Literal(Literal::Null)),
        "true" => Some(Node::Literal(Literal::Bool(true))),
        "false" => Some(Node::Literal(Literal::Bool(false))),
        "this" => Some(Node::ThisExpression),
        "$locals" => Some(Node::LocalsExpression),
        _ => None,
    }
}

/// Builds an AST from the tokens of one expression.
pub struct AstBuilder<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    options: &'a ParseOptions,
}

impl<'a> AstBuilder<'a> {
    pub fn new(tokens: Vec<Token>, options: &'a ParseOptions) -> Self {
        AstBuilder {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Parses the whole token list into a `Program` node.
    pub fn program(mut self) -> Result<Node, ParseError> {
        let body = self.assignment()?;
        if !self.options.allow_trailing_tokens {
            if let Some(token) = self.peek(&[]) {
                return Err(ParseError::TrailingTokens {
                    token: token.text.clone(),
                });
            }
        }
        Ok(Node::program(body))
    }

    // ------------------------------------------------------------ Token cursor

    /// Returns the next token if its text is one of `expected`, or any next
    /// token when `expected` is empty.
    fn peek(&self, expected: &[&str]) -> Option<&Token> {
        let token = self.tokens.get(self.pos)?;
        if expected.is_empty() || expected.iter().any(|e| token.is(e)) {
            Some(token)
        } else {
            None
        }
    }

    /// Like `peek`, but consumes the token on a match.
    fn expect(&mut self, expected: &[&str]) -> Option<Token> {
        self.peek(expected)?;
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        Some(token)
    }

    fn consume(&mut self, expected: &str) -> Result<Token, ParseError> {
        match self.expect(&[expected]) {
            Some(token) => Ok(token),
            None => Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.peek(&[]).map(|t| t.text.clone()),
            }),
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.expect(&[]).ok_or(ParseError::UnexpectedEnd)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::MaxDepthExceeded {
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------ Grammar

    fn assignment(&mut self) -> Result<Node, ParseError> {
        self.enter()?;
        let left = self.primary()?;
        let node = if self.expect(&["="]).is_some() {
            let right = self.primary()?;
            Node::assign(left, right)
        } else {
            left
        };
        self.depth -= 1;
        Ok(node)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let base_depth = self.depth;

        let mut primary = if self.expect(&["["]).is_some() {
            self.array_declaration()?
        } else if self.expect(&["{"]).is_some() {
            self.object()?
        } else if let Some(node) = self.peek(&[]).and_then(keyword) {
            self.pos += 1;
            node
        } else if self.peek(&[]).is_some_and(|t| t.identifier) {
            self.identifier()?
        } else {
            Node::Literal(self.literal()?)
        };

        // Suffixes nest to the left, one AST level each.
        while let Some(next) = self.expect(&[".", "[", "("]) {
            self.enter()?;
            primary = match next.text.as_str() {
                "[" => {
                    let property = self.assignment()?;
                    self.consume("]")?;
                    Node::computed_member(primary, property)
                }
                "." => Node::MemberExpression {
                    object: Box::new(primary),
                    property: Box::new(self.identifier()?),
                    computed: false,
                },
                _ => {
                    let arguments = self.arguments()?;
                    self.consume(")")?;
                    Node::call(primary, arguments)
                }
            };
        }

        self.depth = base_depth;
        Ok(primary)
    }

    fn identifier(&mut self) -> Result<Node, ParseError> {
        let token = self.next_token()?;
        if !token.identifier {
            return Err(ParseError::UnexpectedToken {
                expected: "identifier".to_string(),
                found: Some(token.text),
            });
        }
        Ok(Node::Identifier { name: token.text })
    }

    fn literal(&mut self) -> Result<Literal, ParseError> {
        let token = self.next_token()?;
        match token.value {
            Some(TokenValue::Number(n)) => Ok(Literal::Number(n)),
            Some(TokenValue::String(s)) => Ok(Literal::String(s)),
            None => Err(ParseError::NotAPrimaryExpression { token: token.text }),
        }
    }

    fn array_declaration(&mut self) -> Result<Node, ParseError> {
        let mut elements = Vec::new();
        loop {
            if self.peek(&["]"]).is_some() {
                break;
            }
            elements.push(self.assignment()?);
            if self.expect(&[","]).is_none() {
                break;
            }
        }
        self.consume("]")?;
        Ok(Node::ArrayExpression { elements })
    }

    fn object(&mut self) -> Result<Node, ParseError> {
        let mut properties = Vec::new();
        if self.peek(&["}"]).is_none() {
            loop {
                let key = if self.peek(&[]).is_some_and(|t| t.identifier) {
                    PropertyKey::Identifier(self.next_token()?.text)
                } else {
                    PropertyKey::Literal(self.literal()?)
                };
                self.consume(":")?;
                let value = self.assignment()?;
                properties.push(Property { key, value });
                if self.expect(&[","]).is_none() {
                    break;
                }
            }
        }
        self.consume("}")?;
        Ok(Node::ObjectExpression { properties })
    }

    fn arguments(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut arguments = Vec::new();
        if self.peek(&[")"]).is_none() {
            loop {
                arguments.push(self.assignment()?);
                if self.expect(&[","]).is_none() {
                    break;
                }
            }
        }
        Ok(arguments)
    }
}
