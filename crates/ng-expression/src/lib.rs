//! Sandboxed template expressions.
//!
//! A small expression language for templates: literals, arrays, objects,
//! identifiers, `this`, `$locals`, member access, calls and assignment.
//! [`parse`] tokenizes and parses the source, then compiles it into an
//! [`Evaluator`] that can be run any number of times against a pair of
//! values: the `locals` and the `scope`.
//!
//! Expressions run inside a sandbox. Member names that lead to constructors
//! or the prototype chain are rejected, and so is any attempt to read, pass
//! or return the global object, a document node, or the function and object
//! constructors, or to invoke `call`, `apply` or `bind`.
//!
//! # Example
//!
//! ```
//! use ng_expression::{parse, Value};
//! use serde_json::json;
//!
//! let scope = Value::from(json!({"user": {"name": "Ada"}}));
//! let evaluator = parse("user.name").unwrap();
//! assert_eq!(evaluator.eval(&scope).unwrap(), Value::from("Ada"));
//!
//! let locals = Value::object();
//! parse("$locals.seen = true").unwrap().call(&locals, &scope).unwrap();
//! assert_eq!(locals.to_json(), json!({"seen": true}));
//! ```

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod guards;
pub mod lexer;
pub mod options;
pub mod parse;
pub mod value;

pub use ast::{Literal, Node, Property, PropertyKey};
pub use compiler::AstCompiler;
pub use error::{
    DisallowedFunction, DisallowedObject, Error, EvalError, LexError, ParseError, SandboxViolation,
};
pub use evaluator::Evaluator;
pub use lexer::{tokenize, Token, TokenValue};
pub use options::ParseOptions;
pub use parse::{parse, Parser};
pub use value::{Array, Function, FunctionKind, NativeFn, Object, ObjectKind, Value};
