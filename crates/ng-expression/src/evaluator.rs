//! Compiled expressions.

use crate::error::EvalError;
use crate::value::Value;
use std::fmt;

/// The two values an evaluator runs against.
pub(crate) struct Frame<'a> {
    pub locals: &'a Value,
    pub scope: &'a Value,
}

/// A compiled piece of an expression.
pub(crate) type EvalFn = Box<dyn Fn(&Frame<'_>) -> Result<Value, EvalError> + Send + Sync>;

/// A compiled expression, callable any number of times.
///
/// The evaluator holds no values of its own: everything it reads or writes
/// comes from the `locals` and `scope` passed to [`Evaluator::call`], so it
/// can be shared across threads while each thread evaluates against its own
/// values.
pub struct Evaluator {
    source: String,
    temporaries: Vec<String>,
    eval: EvalFn,
}

impl Evaluator {
    pub(crate) fn new(source: String, temporaries: Vec<String>, eval: EvalFn) -> Self {
        Evaluator {
            source,
            temporaries,
            eval,
        }
    }

    /// Evaluates against `locals` and `scope`. Identifiers resolve in
    /// `locals` first, then in `scope`.
    pub fn call(&self, locals: &Value, scope: &Value) -> Result<Value, EvalError> {
        (self.eval)(&Frame { locals, scope })
    }

    /// Evaluates against `scope` with no locals.
    pub fn eval(&self, scope: &Value) -> Result<Value, EvalError> {
        self.call(&Value::Undefined, scope)
    }

    /// Canonical source text of the compiled expression.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// One entry per temporary the compiler allocated, e.g. `v1 = a.b`.
    pub fn temporaries(&self) -> &[String] {
        &self.temporaries
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("source", &self.source)
            .field("temporaries", &self.temporaries)
            .finish_non_exhaustive()
    }
}
