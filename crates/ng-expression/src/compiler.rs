//! AST compiler.
//!
//! Turns an AST into a tree of closures. Identifier and member nodes compile
//! to resolvers that also report the container and key they read from, which
//! is what method calls (`this` binding) and assignments need. Every read,
//! argument and call result passes through the sandbox guards.

use crate::ast::Node;
use crate::error::{Error, EvalError, ParseError};
use crate::evaluator::{EvalFn, Evaluator, Frame};
use crate::guards::{ensure_safe_function, ensure_safe_member_name, ensure_safe_object};
use crate::value::{Array, Object, Value};

/// A resolved storage location.
struct Reference {
    container: Value,
    key: String,
    value: Value,
}

type ResolveFn = Box<dyn Fn(&Frame<'_>) -> Result<Reference, EvalError> + Send + Sync>;

enum Compiled {
    Value(EvalFn),
    Reference(ResolveFn),
}

impl Compiled {
    fn into_value(self) -> EvalFn {
        match self {
            Compiled::Value(eval) => eval,
            Compiled::Reference(resolve) => {
                Box::new(move |frame: &Frame<'_>| Ok(resolve(frame)?.value))
            }
        }
    }
}

enum MemberKey {
    Static(String),
    Computed(EvalFn),
}

/// Compiles one AST into an [`Evaluator`].
#[derive(Debug, Default)]
pub struct AstCompiler {
    next_id: usize,
    temporaries: Vec<String>,
}

impl AstCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `ast`. Fails if a statically known member name is disallowed
    /// or an assignment target is not an identifier or member access.
    pub fn compile(mut self, ast: &Node) -> Result<Evaluator, Error> {
        let eval = self.recurse(ast, false)?.into_value();
        Ok(Evaluator::new(ast.to_string(), self.temporaries, eval))
    }

    fn temporary(&mut self, node: &Node) {
        self.temporaries.push(format!("v{} = {}", self.next_id, node));
        self.next_id += 1;
    }

    /// `create` makes missing intermediate containers spring into existence,
    /// as required on the left of an assignment.
    fn recurse(&mut self, node: &Node, create: bool) -> Result<Compiled, Error> {
        let compiled = match node {
            Node::Program { body } => Compiled::Value(self.recurse(body, false)?.into_value()),
            Node::Literal(literal) => {
                let literal = literal.clone();
                Compiled::Value(Box::new(move |_: &Frame<'_>| Ok(Value::from(&literal))))
            }
            Node::ArrayExpression { elements } => {
                let elements = self.recurse_all(elements)?;
                Compiled::Value(Box::new(move |frame: &Frame<'_>| {
                    let items = elements
                        .iter()
                        .map(|element| element(frame))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Value::Array(Array::new(items)))
                }))
            }
            Node::ObjectExpression { properties } => {
                let properties = properties
                    .iter()
                    .map(|property| {
                        let value = self.recurse(&property.value, false)?.into_value();
                        Ok((property.key.to_property_key(), value))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                Compiled::Value(Box::new(move |frame: &Frame<'_>| {
                    let object = Object::new();
                    for (key, value) in &properties {
                        object.insert(key.as_str(), value(frame)?);
                    }
                    Ok(Value::Object(object))
                }))
            }
            Node::ThisExpression => {
                Compiled::Value(Box::new(|frame: &Frame<'_>| Ok(frame.scope.clone())))
            }
            Node::LocalsExpression => {
                Compiled::Value(Box::new(|frame: &Frame<'_>| Ok(frame.locals.clone())))
            }
            Node::Identifier { name } => {
                ensure_safe_member_name(name)?;
                self.temporary(node);
                Compiled::Reference(identifier(name.clone(), create))
            }
            Node::MemberExpression {
                object,
                property,
                computed,
            } => {
                self.temporary(node);
                let object = self.recurse(object, create)?.into_value();
                let key = if *computed {
                    MemberKey::Computed(self.recurse(property, false)?.into_value())
                } else {
                    match property.as_ref() {
                        Node::Identifier { name } => {
                            ensure_safe_member_name(name)?;
                            MemberKey::Static(name.clone())
                        }
                        other => {
                            return Err(ParseError::UnexpectedToken {
                                expected: "identifier".to_string(),
                                found: Some(other.to_string()),
                            }
                            .into())
                        }
                    }
                };
                Compiled::Reference(member(object, key, create))
            }
            Node::CallExpression { callee, arguments } => {
                let text = callee.to_string();
                let callee = self.recurse(callee, false)?;
                let arguments = self.recurse_all(arguments)?;
                Compiled::Value(call(callee, arguments, text))
            }
            Node::AssignmentExpression { left, right } => {
                let Compiled::Reference(target) = self.recurse(left, true)? else {
                    return Err(ParseError::InvalidAssignmentTarget.into());
                };
                let right = self.recurse(right, false)?.into_value();
                Compiled::Value(Box::new(move |frame: &Frame<'_>| {
                    let target = target(frame)?;
                    let value = ensure_safe_object(right(frame)?)?;
                    target.container.set_member(&target.key, value.clone())?;
                    Ok(value)
                }))
            }
        };
        Ok(compiled)
    }

    fn recurse_all(&mut self, nodes: &[Node]) -> Result<Vec<EvalFn>, Error> {
        nodes
            .iter()
            .map(|node| Ok(self.recurse(node, false)?.into_value()))
            .collect()
    }
}

// ---------------------------------------------------------------- Resolvers

/// Locals shadow scope. A name that is in neither reads as `undefined`.
fn identifier(name: String, create: bool) -> ResolveFn {
    Box::new(move |frame: &Frame<'_>| {
        let in_locals = frame.locals.has_member(&name);
        let scope_usable = frame.scope.is_truthy();
        if create && !in_locals && scope_usable && !frame.scope.has_member(&name) {
            frame.scope.set_member(&name, Value::object())?;
        }
        let (container, value) = if in_locals {
            (frame.locals.clone(), frame.locals.get_member(&name))
        } else if scope_usable {
            (frame.scope.clone(), frame.scope.get_member(&name))
        } else {
            (frame.scope.clone(), Value::Undefined)
        };
        Ok(Reference {
            container,
            key: name.clone(),
            value: ensure_safe_object(value)?,
        })
    })
}

fn member(object: EvalFn, key: MemberKey, create: bool) -> ResolveFn {
    Box::new(move |frame: &Frame<'_>| {
        let container = object(frame)?;
        let key = match &key {
            MemberKey::Static(name) => name.clone(),
            MemberKey::Computed(eval) => {
                let key = eval(frame)?.to_property_key();
                ensure_safe_member_name(&key)?;
                key
            }
        };
        if create && !container.get_member(&key).is_truthy() {
            container.set_member(&key, Value::object())?;
        }
        let value = if container.is_truthy() {
            ensure_safe_object(container.get_member(&key))?
        } else {
            Value::Undefined
        };
        Ok(Reference {
            container,
            key,
            value,
        })
    })
}

/// Arguments are evaluated right after the callee is resolved, so reads
/// inside them are guarded even when the call itself is skipped.
fn call(callee: Compiled, arguments: Vec<EvalFn>, text: String) -> EvalFn {
    match callee {
        Compiled::Reference(resolve) => Box::new(move |frame: &Frame<'_>| {
            let target = resolve(frame)?;
            let args = evaluate_all(frame, &arguments)?;
            let this = ensure_safe_object(target.container)?;
            if matches!(this, Value::Undefined | Value::Null) {
                return Err(EvalError::CannotReadProperty {
                    key: target.key,
                    target: this.type_name(),
                });
            }
            invoke(target.value, &this, args, &text)
        }),
        Compiled::Value(eval) => Box::new(move |frame: &Frame<'_>| {
            let function = eval(frame)?;
            let args = evaluate_all(frame, &arguments)?;
            invoke(function, &Value::Undefined, args, &text)
        }),
    }
}

fn evaluate_all(frame: &Frame<'_>, arguments: &[EvalFn]) -> Result<Vec<Value>, EvalError> {
    arguments.iter().map(|argument| argument(frame)).collect()
}

/// A falsy callee yields `undefined`.
fn invoke(function: Value, this: &Value, args: Vec<Value>, text: &str) -> Result<Value, EvalError> {
    let function = ensure_safe_function(function)?;
    if !function.is_truthy() {
        return Ok(Value::Undefined);
    }
    let Value::Function(function) = function else {
        return Err(EvalError::NotAFunction {
            callee: text.to_string(),
        });
    };
    let args = args
        .into_iter()
        .map(ensure_safe_object)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ensure_safe_object(function.invoke(this, &args)?)?)
}
