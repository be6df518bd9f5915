//! Parse facade: source text in, [`Evaluator`] out.

use crate::ast::Node;
use crate::builder::AstBuilder;
use crate::compiler::AstCompiler;
use crate::error::Error;
use crate::evaluator::Evaluator;
use crate::lexer::{tokenize, Token};
use crate::options::ParseOptions;
use tracing::debug;

/// Parser configured with [`ParseOptions`]. Holds no per-parse state, so one
/// instance can be reused for any number of expressions.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses and compiles `text`.
    pub fn parse(&self, text: &str) -> Result<Evaluator, Error> {
        let tokens = tokenize(text)?;
        let token_count = tokens.len();
        let ast = self.build(tokens)?;
        let evaluator = AstCompiler::new().compile(&ast)?;
        debug!(
            expression = text,
            tokens = token_count,
            temporaries = evaluator.temporaries().len(),
            "compiled expression"
        );
        Ok(evaluator)
    }

    /// Parses `text` into its `Program` node without compiling it.
    pub fn parse_ast(&self, text: &str) -> Result<Node, Error> {
        self.build(tokenize(text)?)
    }

    fn build(&self, tokens: Vec<Token>) -> Result<Node, Error> {
        Ok(AstBuilder::new(tokens, &self.options).program()?)
    }
}

/// Parses and compiles `text` with default options.
pub fn parse(text: &str) -> Result<Evaluator, Error> {
    Parser::default().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, ParseError};
    use crate::value::Value;

    #[test]
    fn test_parse_and_eval() {
        let evaluator = parse("a").unwrap();
        let scope = Value::object();
        scope.set_member("a", Value::from(1)).unwrap();
        assert_eq!(evaluator.eval(&scope).unwrap(), Value::from(1));
    }

    #[test]
    fn test_errors_keep_their_stage() {
        assert_eq!(
            parse("1e").unwrap_err(),
            Error::Lex(LexError::InvalidExponent)
        );
        assert_eq!(parse("").unwrap_err(), Error::Parse(ParseError::UnexpectedEnd));
        assert_eq!(
            parse("1 = 2").unwrap_err(),
            Error::Parse(ParseError::InvalidAssignmentTarget)
        );
    }

    #[test]
    fn test_parse_ast() {
        let ast = Parser::default().parse_ast("a.b").unwrap();
        assert_eq!(ast, Node::program(Node::member(Node::identifier("a"), "b")));
    }

    #[test]
    fn test_strict_parser() {
        let parser = Parser::new(ParseOptions::strict());
        assert!(!parser.options().allow_trailing_tokens);
        assert!(matches!(
            parser.parse("a b"),
            Err(Error::Parse(ParseError::TrailingTokens { .. }))
        ));
        assert_eq!(Parser::default().parse("a b").unwrap().source(), "a");
    }
}
