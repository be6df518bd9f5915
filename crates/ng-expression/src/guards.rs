//! Sandbox guards.
//!
//! Each guard passes its argument through unchanged when it is safe, so the
//! compiler can wrap a read, an argument or a call result in one expression.

use crate::error::{DisallowedFunction, DisallowedObject, SandboxViolation};
use crate::value::{FunctionKind, ObjectKind, Value};
use tracing::debug;

/// Member names that open a path to constructors or accessor internals.
const DISALLOWED_MEMBER_NAMES: [&str; 6] = [
    "constructor",
    "__proto__",
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
];

fn reject<T>(violation: SandboxViolation) -> Result<T, SandboxViolation> {
    debug!(%violation, "sandbox guard rejected expression");
    Err(violation)
}

/// Rejects member names that could reach a constructor or the prototype chain.
pub fn ensure_safe_member_name(name: &str) -> Result<&str, SandboxViolation> {
    if DISALLOWED_MEMBER_NAMES.contains(&name) {
        return reject(SandboxViolation::DisallowedMemberName {
            name: name.to_string(),
        });
    }
    Ok(name)
}

/// Rejects the global object, document nodes, and the function and object
/// constructors. Checked in that order.
pub fn ensure_safe_object(value: Value) -> Result<Value, SandboxViolation> {
    let disallowed = match &value {
        Value::Object(object) => match object.kind() {
            ObjectKind::Global => Some(DisallowedObject::Window),
            ObjectKind::DomNode => Some(DisallowedObject::DomNode),
            ObjectKind::Plain => None,
        },
        Value::Function(function) => match function.kind() {
            FunctionKind::FunctionConstructor => Some(DisallowedObject::Function),
            FunctionKind::ObjectConstructor => Some(DisallowedObject::Object),
            FunctionKind::Native | FunctionKind::Call | FunctionKind::Apply | FunctionKind::Bind => {
                None
            }
        },
        Value::Undefined
        | Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Array(_) => None,
    };
    match disallowed {
        Some(object) => reject(SandboxViolation::DisallowedObjectReference(object)),
        None => Ok(value),
    }
}

/// Rejects the function constructor and the reflective `call`, `apply` and
/// `bind` primitives before they are invoked.
pub fn ensure_safe_function(value: Value) -> Result<Value, SandboxViolation> {
    let disallowed = match &value {
        Value::Function(function) => match function.kind() {
            FunctionKind::FunctionConstructor => Some(DisallowedFunction::Function),
            FunctionKind::Call | FunctionKind::Apply | FunctionKind::Bind => {
                Some(DisallowedFunction::CallApplyBind)
            }
            FunctionKind::Native | FunctionKind::ObjectConstructor => None,
        },
        _ => None,
    };
    match disallowed {
        Some(function) => reject(SandboxViolation::DisallowedFunctionReference(function)),
        None => Ok(value),
    }
}
