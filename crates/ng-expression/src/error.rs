use std::fmt;
use thiserror::Error;

/// Failures raised while turning source text into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected next character: {0}")]
    UnexpectedCharacter(char),

    #[error("Invalid exponent")]
    InvalidExponent,

    #[error("Invalid unicode escape")]
    InvalidUnicodeEscape,
}

/// Failures raised while building the AST from tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The next token is not the one the grammar requires.
    #[error("Unexpected. Expecting: {expected}")]
    UnexpectedToken {
        expected: String,
        found: Option<String>,
    },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    /// A punctuation token sits where a literal, identifier, array or object
    /// must start.
    #[error("Token '{token}' is not a primary expression")]
    NotAPrimaryExpression { token: String },

    #[error("Trying to assign a value to a non l-value")]
    InvalidAssignmentTarget,

    /// Only raised when trailing tokens are disallowed by the parse options.
    #[error("Unexpected token after end of expression: {token}")]
    TrailingTokens { token: String },

    #[error("Expression nesting exceeds the limit of {limit}")]
    MaxDepthExceeded { limit: usize },
}

/// Something an expression must never be able to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisallowedObject {
    Window,
    DomNode,
    Function,
    Object,
}

impl fmt::Display for DisallowedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisallowedObject::Window => "window",
            DisallowedObject::DomNode => "DOM nodes",
            DisallowedObject::Function => "Function",
            DisallowedObject::Object => "Object",
        };
        f.write_str(name)
    }
}

/// A function an expression must never be able to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisallowedFunction {
    Function,
    CallApplyBind,
}

impl fmt::Display for DisallowedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisallowedFunction::Function => "Function",
            DisallowedFunction::CallApplyBind => "call, apply, or bind",
        };
        f.write_str(name)
    }
}

/// Raised by the safety guards, either while compiling (statically known
/// member names) or while evaluating (values only known at call time).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SandboxViolation {
    #[error("Attempting to access a disallowed field in Angular expressions!")]
    DisallowedMemberName { name: String },

    #[error("Referencing {0} in Angular expressions is disallowed!")]
    DisallowedObjectReference(DisallowedObject),

    #[error("Referencing {0} in Angular expressions is disallowed!")]
    DisallowedFunctionReference(DisallowedFunction),
}

/// Failures raised while invoking a compiled evaluator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Sandbox(#[from] SandboxViolation),

    #[error("{callee} is not a function")]
    NotAFunction { callee: String },

    #[error("Cannot set property '{key}' of {target}")]
    CannotSetProperty { key: String, target: &'static str },

    /// A method was called on `undefined` or `null`.
    #[error("Cannot read property '{key}' of {target}")]
    CannotReadProperty { key: String, target: &'static str },

    #[error("Invalid array length")]
    InvalidArrayLength { length: f64 },

    /// Raised by a host function.
    #[error("{0}")]
    Thrown(String),
}

/// Failures raised by [`crate::parse`]: lexing, parsing, or a member name
/// rejected at compile time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sandbox(#[from] SandboxViolation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_messages() {
        assert_eq!(
            LexError::UnexpectedCharacter('+').to_string(),
            "Unexpected next character: +"
        );
        assert_eq!(LexError::InvalidExponent.to_string(), "Invalid exponent");
        assert_eq!(
            LexError::InvalidUnicodeEscape.to_string(),
            "Invalid unicode escape"
        );
    }

    #[test]
    fn test_parse_messages() {
        let err = ParseError::UnexpectedToken {
            expected: "]".to_string(),
            found: None,
        };
        assert_eq!(err.to_string(), "Unexpected. Expecting: ]");
    }

    #[test]
    fn test_sandbox_messages() {
        let cases = [
            (
                SandboxViolation::DisallowedMemberName {
                    name: "constructor".to_string(),
                },
                "Attempting to access a disallowed field in Angular expressions!",
            ),
            (
                SandboxViolation::DisallowedObjectReference(DisallowedObject::Window),
                "Referencing window in Angular expressions is disallowed!",
            ),
            (
                SandboxViolation::DisallowedObjectReference(DisallowedObject::DomNode),
                "Referencing DOM nodes in Angular expressions is disallowed!",
            ),
            (
                SandboxViolation::DisallowedObjectReference(DisallowedObject::Function),
                "Referencing Function in Angular expressions is disallowed!",
            ),
            (
                SandboxViolation::DisallowedObjectReference(DisallowedObject::Object),
                "Referencing Object in Angular expressions is disallowed!",
            ),
            (
                SandboxViolation::DisallowedFunctionReference(DisallowedFunction::Function),
                "Referencing Function in Angular expressions is disallowed!",
            ),
            (
                SandboxViolation::DisallowedFunctionReference(DisallowedFunction::CallApplyBind),
                "Referencing call, apply, or bind in Angular expressions is disallowed!",
            ),
        ];
        for (err, message) in cases {
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_eval_messages() {
        let err = EvalError::CannotReadProperty {
            key: "f".to_string(),
            target: "undefined",
        };
        assert_eq!(err.to_string(), "Cannot read property 'f' of undefined");
        let err = EvalError::InvalidArrayLength { length: -1.0 };
        assert_eq!(err.to_string(), "Invalid array length");
    }

    #[test]
    fn test_wrapped_errors_keep_message() {
        let err: Error = LexError::InvalidExponent.into();
        assert_eq!(err.to_string(), "Invalid exponent");

        let err: EvalError = SandboxViolation::DisallowedObjectReference(DisallowedObject::Object).into();
        assert_eq!(
            err.to_string(),
            "Referencing Object in Angular expressions is disallowed!"
        );
    }
}
