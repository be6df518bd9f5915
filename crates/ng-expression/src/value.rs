//! Runtime values an evaluator reads from and writes to.
//!
//! Arrays and objects are shared handles: cloning a [`Value`] clones the
//! handle, so assignments made through an evaluator are visible to the host.
//! Capability tags ([`ObjectKind`], [`FunctionKind`]) mark the values the
//! sandbox guards must reject.
//!
//! An assignment such as `a.self = a` makes a container reachable from
//! itself. Conversions, equality and `Debug` stop at the repeated container,
//! but the handles are reference counted, so a cycle keeps its containers
//! alive until the host breaks it (for example by overwriting the property).

use crate::ast::Literal;
use crate::error::{DisallowedFunction, EvalError, SandboxViolation};
use indexmap::IndexMap;
use ng_expression_util::{has_own_property, number_to_string, parse_array_index};
use serde_json::Value as Json;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Host function body: receives `this` and the call arguments.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, EvalError>;

/// Any value an expression can produce or observe.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Object),
    Function(Function),
}

// ----------------------------------------------------------------- Containers

/// Shared, mutable array handle.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    /// Largest length an array may be grown to by an expression.
    pub const MAX_LENGTH: usize = 1 << 24;

    pub fn new(items: Vec<Value>) -> Self {
        Array(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Sets `index`, filling any gap with `Undefined`. Fails if the array
    /// would grow beyond [`Array::MAX_LENGTH`].
    pub fn set(&self, index: usize, value: Value) -> Result<(), EvalError> {
        let mut items = self.0.borrow_mut();
        if index >= items.len() {
            let len = index
                .checked_add(1)
                .filter(|len| *len <= Self::MAX_LENGTH)
                .ok_or(EvalError::InvalidArrayLength {
                    length: index as f64 + 1.0,
                })?;
            items.resize(len, Value::Undefined);
        }
        items[index] = value;
        Ok(())
    }

    fn set_len(&self, len: f64) -> Result<(), EvalError> {
        if len < 0.0 || len.fract() != 0.0 || len > Self::MAX_LENGTH as f64 {
            return Err(EvalError::InvalidArrayLength { length: len });
        }
        self.0.borrow_mut().resize(len as usize, Value::Undefined);
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles point at the same array.
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

/// Capability tag of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKind {
    #[default]
    Plain,
    /// The host's global, window-like singleton.
    Global,
    /// A host document node.
    DomNode,
}

struct ObjectInner {
    kind: ObjectKind,
    properties: RefCell<IndexMap<String, Value>>,
}

/// Shared, mutable object handle with insertion-ordered properties.
#[derive(Clone)]
pub struct Object(Rc<ObjectInner>);

impl Object {
    pub fn new() -> Self {
        Self::with_kind(ObjectKind::Plain)
    }

    pub fn with_kind(kind: ObjectKind) -> Self {
        Object(Rc::new(ObjectInner {
            kind,
            properties: RefCell::new(IndexMap::new()),
        }))
    }

    pub fn kind(&self) -> ObjectKind {
        self.0.kind
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.properties.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.properties.borrow_mut().insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        has_own_property(&self.0.properties.borrow(), key)
    }

    pub fn len(&self) -> usize {
        self.0.properties.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.properties.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.properties.borrow().keys().cloned().collect()
    }

    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .properties
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns `true` if both handles point at the same object.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

// ----------------------------------------------------------------- Functions

/// Capability tag of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// A host closure.
    Native,
    /// The constructor of all functions; its `constructor` is itself.
    FunctionConstructor,
    /// The generic object constructor.
    ObjectConstructor,
    /// `Function.prototype.call`
    Call,
    /// `Function.prototype.apply`
    Apply,
    /// `Function.prototype.bind`
    Bind,
}

struct FunctionInner {
    kind: FunctionKind,
    native: Option<Box<NativeFn>>,
}

/// Callable handle. Identity, not structure, decides equality.
#[derive(Clone)]
pub struct Function(Rc<FunctionInner>);

impl Function {
    /// Wraps a host closure.
    pub fn native<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, EvalError> + 'static,
    {
        Function(Rc::new(FunctionInner {
            kind: FunctionKind::Native,
            native: Some(Box::new(f)),
        }))
    }

    /// Creates one of the built-in, non-native functions.
    pub fn builtin(kind: FunctionKind) -> Self {
        Function(Rc::new(FunctionInner { kind, native: None }))
    }

    pub fn kind(&self) -> FunctionKind {
        self.0.kind
    }

    /// Invokes the function with the given `this` binding.
    pub fn invoke(&self, this: &Value, args: &[Value]) -> Result<Value, EvalError> {
        match (self.0.kind, &self.0.native) {
            (FunctionKind::Native, Some(native)) => native(this, args),
            (FunctionKind::Native, None) => Ok(Value::Undefined),
            (FunctionKind::ObjectConstructor, _) => match args.first() {
                Some(value @ (Value::Object(_) | Value::Array(_) | Value::Function(_))) => {
                    Ok(value.clone())
                }
                _ => Ok(Value::object()),
            },
            (FunctionKind::FunctionConstructor, _) => Err(SandboxViolation::DisallowedFunctionReference(
                DisallowedFunction::Function,
            )
            .into()),
            (FunctionKind::Call | FunctionKind::Apply | FunctionKind::Bind, _) => {
                Err(SandboxViolation::DisallowedFunctionReference(
                    DisallowedFunction::CallApplyBind,
                )
                .into())
            }
        }
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ----------------------------------------------------------------- Value

impl Value {
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Array::new(items))
    }

    /// A fresh global (window-like) object. Expressions may be evaluated
    /// against it as scope but can never obtain a reference to it.
    pub fn global() -> Self {
        Value::Object(Object::with_kind(ObjectKind::Global))
    }

    /// A fresh object tagged as a document node.
    pub fn dom_node() -> Self {
        Value::Object(Object::with_kind(ObjectKind::DomNode))
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, EvalError> + 'static,
    {
        Value::Function(Function::native(f))
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    /// The `typeof`-style name of the value, with `null` and arrays named
    /// separately.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Converts the value to the string used as a property key. An array
    /// nested in itself joins as an empty string.
    pub fn to_property_key(&self) -> String {
        self.property_key_in(&mut Vec::new())
    }

    fn property_key_in(&self, seen: &mut Vec<usize>) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => {
                if seen.contains(&items.addr()) {
                    return String::new();
                }
                seen.push(items.addr());
                let joined = items
                    .to_vec()
                    .iter()
                    .map(|item| match item {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.property_key_in(seen),
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                seen.pop();
                joined
            }
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(_) => "function".to_string(),
        }
    }

    /// Reads a property. Missing properties and reads on values without
    /// properties yield `Undefined`.
    pub fn get_member(&self, key: &str) -> Value {
        match self {
            Value::Object(object) => object.get(key).unwrap_or_default(),
            Value::Array(items) => {
                if key == "length" {
                    return Value::Number(items.len() as f64);
                }
                parse_array_index(key)
                    .and_then(|i| items.get(i))
                    .unwrap_or_default()
            }
            Value::String(s) => {
                if key == "length" {
                    return Value::Number(s.encode_utf16().count() as f64);
                }
                parse_array_index(key)
                    .and_then(|i| s.encode_utf16().nth(i))
                    .map(|unit| Value::String(String::from_utf16_lossy(&[unit])))
                    .unwrap_or_default()
            }
            Value::Function(_) => match key {
                "call" => Value::Function(Function::builtin(FunctionKind::Call)),
                "apply" => Value::Function(Function::builtin(FunctionKind::Apply)),
                "bind" => Value::Function(Function::builtin(FunctionKind::Bind)),
                _ => Value::Undefined,
            },
            Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) => Value::Undefined,
        }
    }

    /// Returns `true` if `key` is a property of the value (`key in value`).
    pub fn has_member(&self, key: &str) -> bool {
        match self {
            Value::Object(object) => object.contains_key(key),
            Value::Array(items) => {
                key == "length" || parse_array_index(key).is_some_and(|i| i < items.len())
            }
            Value::Function(_) => matches!(key, "call" | "apply" | "bind"),
            _ => false,
        }
    }

    /// Writes a property. Writes on `undefined`/`null` fail; writes on other
    /// primitives and on functions are ignored. On arrays, writes to
    /// non-index keys are ignored, and growing past [`Array::MAX_LENGTH`] or
    /// a negative or fractional `length` fails with `InvalidArrayLength`.
    pub fn set_member(&self, key: &str, value: Value) -> Result<(), EvalError> {
        match self {
            Value::Object(object) => {
                object.insert(key, value);
            }
            Value::Array(items) => {
                if key == "length" {
                    if let Some(len) = value.as_number() {
                        items.set_len(len)?;
                    }
                } else if let Some(index) = parse_array_index(key) {
                    items.set(index, value)?;
                }
            }
            Value::Undefined | Value::Null => {
                return Err(EvalError::CannotSetProperty {
                    key: key.to_string(),
                    target: self.type_name(),
                });
            }
            Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Function(_) => {}
        }
        Ok(())
    }

    /// Converts to JSON. Integral numbers become JSON integers; `undefined`,
    /// functions and non-finite numbers become `null`. A container nested in
    /// itself becomes `null` at the point it recurs.
    pub fn to_json(&self) -> Json {
        self.to_json_in(&mut Vec::new())
    }

    fn to_json_in(&self, seen: &mut Vec<usize>) -> Json {
        match self {
            Value::Undefined | Value::Null | Value::Function(_) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => {
                if seen.contains(&items.addr()) {
                    return Json::Null;
                }
                seen.push(items.addr());
                let json = Json::Array(
                    items
                        .to_vec()
                        .iter()
                        .map(|v| v.to_json_in(seen))
                        .collect(),
                );
                seen.pop();
                json
            }
            Value::Object(object) => {
                if seen.contains(&object.addr()) {
                    return Json::Null;
                }
                seen.push(object.addr());
                let json = Json::Object(
                    object
                        .entries()
                        .into_iter()
                        .map(|(k, v)| (k, v.to_json_in(seen)))
                        .collect(),
                );
                seen.pop();
                json
            }
        }
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_to_json(n: f64) -> Json {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Json::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(Json::Number)
        .unwrap_or(Json::Null)
}

// ----------------------------------------------------------------- Conversions

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

// ----------------------------------------------------------------- Equality & Debug

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut Vec::new())
    }
}

impl Value {
    /// Structural equality. A pair of containers already being compared
    /// further up counts as equal, so cyclic values compare without
    /// recursing forever.
    fn eq_in(&self, other: &Value, seen: &mut Vec<(usize, usize)>) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                let pair = (a.addr(), b.addr());
                if a.ptr_eq(b) || seen.contains(&pair) {
                    return true;
                }
                let (left, right) = (a.to_vec(), b.to_vec());
                seen.push(pair);
                let equal = left.len() == right.len()
                    && left.iter().zip(&right).all(|(l, r)| l.eq_in(r, seen));
                seen.pop();
                equal
            }
            (Value::Object(a), Value::Object(b)) => {
                let pair = (a.addr(), b.addr());
                if a.ptr_eq(b) || seen.contains(&pair) {
                    return true;
                }
                if a.kind() != b.kind() || a.len() != b.len() {
                    return false;
                }
                seen.push(pair);
                let equal = a
                    .entries()
                    .iter()
                    .all(|(k, v)| b.get(k).is_some_and(|other| v.eq_in(&other, seen)));
                seen.pop();
                equal
            }
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Debug view of a value that prints `[Circular]` where a container recurs.
struct DebugValue<'a> {
    value: &'a Value,
    seen: &'a RefCell<Vec<usize>>,
}

impl DebugValue<'_> {
    fn nested<'b>(&'b self, value: &'b Value) -> DebugValue<'b> {
        DebugValue {
            value,
            seen: self.seen,
        }
    }

    fn enter(&self, addr: usize) -> bool {
        let mut seen = self.seen.borrow_mut();
        if seen.contains(&addr) {
            return false;
        }
        seen.push(addr);
        true
    }

    fn leave(&self) {
        self.seen.borrow_mut().pop();
    }
}

impl fmt::Debug for DebugValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&number_to_string(*n)),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                if !self.enter(items.addr()) {
                    return f.write_str("[Circular]");
                }
                let items = items.to_vec();
                let result = f
                    .debug_list()
                    .entries(items.iter().map(|item| self.nested(item)))
                    .finish();
                self.leave();
                result
            }
            Value::Object(object) => {
                if !self.enter(object.addr()) {
                    return f.write_str("[Circular]");
                }
                let entries = object.entries();
                let kind = match object.kind() {
                    ObjectKind::Plain => Ok(()),
                    kind => write!(f, "{:?} ", kind),
                };
                let result = kind.and_then(|()| {
                    f.debug_map()
                        .entries(entries.iter().map(|(k, v)| (k, self.nested(v))))
                        .finish()
                });
                self.leave();
                result
            }
            Value::Function(function) => write!(f, "Function({:?})", function.kind()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seen = RefCell::new(Vec::new());
        fmt::Debug::fmt(&DebugValue { value: self, seen: &seen }, f)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:?})", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::array(vec![]).is_truthy());
        assert!(Value::object().is_truthy());
    }

    #[test]
    fn test_json_round_trip() {
        let doc = json!({"a": [1, 2.5, "x", null, true], "b": {"c": {}}});
        assert_eq!(Value::from(doc.clone()).to_json(), doc);
    }

    #[test]
    fn test_to_json_special_values() {
        assert_eq!(Value::Undefined.to_json(), json!(null));
        assert_eq!(Value::Number(f64::NAN).to_json(), json!(null));
        assert_eq!(Value::Number(3.0).to_json(), json!(3));
        assert_eq!(Value::function(|_, _| Ok(Value::Undefined)).to_json(), json!(null));
    }

    #[test]
    fn test_object_members() {
        let value = Value::from(json!({"a": 1}));
        assert_eq!(value.get_member("a"), Value::Number(1.0));
        assert_eq!(value.get_member("b"), Value::Undefined);
        assert!(value.has_member("a"));
        assert!(!value.has_member("b"));

        value.set_member("b", Value::from("x")).unwrap();
        assert_eq!(value.to_json(), json!({"a": 1, "b": "x"}));
    }

    #[test]
    fn test_objects_are_shared_handles() {
        let value = Value::object();
        let alias = value.clone();
        alias.set_member("k", Value::Bool(true)).unwrap();
        assert_eq!(value.get_member("k"), Value::Bool(true));
    }

    #[test]
    fn test_array_members() {
        let value = Value::from(json!([10, 20]));
        assert_eq!(value.get_member("1"), Value::Number(20.0));
        assert_eq!(value.get_member("2"), Value::Undefined);
        assert_eq!(value.get_member("01"), Value::Undefined);
        assert_eq!(value.get_member("length"), Value::Number(2.0));
        assert!(value.has_member("0"));
        assert!(!value.has_member("5"));

        value.set_member("3", Value::from(40)).unwrap();
        assert_eq!(value.to_json(), json!([10, 20, null, 40]));

        value.set_member("length", Value::from(1)).unwrap();
        assert_eq!(value.to_json(), json!([10]));
    }

    #[test]
    fn test_array_growth_is_bounded() {
        let value = Value::array(vec![]);
        let array = value.as_array().unwrap();

        let huge = (Array::MAX_LENGTH + 1).to_string();
        assert_eq!(
            value.set_member(&huge, Value::Null),
            Err(EvalError::InvalidArrayLength {
                length: Array::MAX_LENGTH as f64 + 2.0
            })
        );
        assert_eq!(
            value.set_member("length", Value::Number(1e14)),
            Err(EvalError::InvalidArrayLength { length: 1e14 })
        );
        assert!(value.set_member("length", Value::Number(-1.0)).is_err());
        assert!(value.set_member("length", Value::Number(1.5)).is_err());
        assert!(array.is_empty());

        // Not an index at all: ignored like any other non-index key.
        value
            .set_member("18446744073709551615", Value::Null)
            .unwrap();
        assert!(array.is_empty());

        value.set_member("length", Value::from(3)).unwrap();
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn test_cyclic_values() {
        let a = Value::object();
        a.set_member("self", a.clone()).unwrap();
        a.set_member("n", Value::from(1)).unwrap();
        assert_eq!(a.to_json(), json!({"self": null, "n": 1}));
        assert_eq!(format!("{:?}", a), r#"{"self": [Circular], "n": 1}"#);

        let b = Value::object();
        b.set_member("self", b.clone()).unwrap();
        b.set_member("n", Value::from(1)).unwrap();
        assert_eq!(a, b);
        b.set_member("n", Value::from(2)).unwrap();
        assert_ne!(a, b);

        let list = Value::array(vec![Value::from(1)]);
        list.set_member("1", list.clone()).unwrap();
        assert_eq!(list.to_json(), json!([1, null]));
        assert_eq!(list.to_property_key(), "1,");
        assert_eq!(format!("{:?}", list), "[1, [Circular]]");
    }

    #[test]
    fn test_string_members() {
        let value = Value::from("héllo");
        assert_eq!(value.get_member("length"), Value::Number(5.0));
        assert_eq!(value.get_member("1"), Value::from("é"));
        assert_eq!(value.get_member("9"), Value::Undefined);
    }

    #[test]
    fn test_function_reflective_members() {
        let value = Value::function(|_, _| Ok(Value::Undefined));
        for (name, kind) in [
            ("call", FunctionKind::Call),
            ("apply", FunctionKind::Apply),
            ("bind", FunctionKind::Bind),
        ] {
            let member = value.get_member(name);
            assert_eq!(member.as_function().map(Function::kind), Some(kind));
        }
        assert_eq!(value.get_member("name"), Value::Undefined);
    }

    #[test]
    fn test_set_member_on_undefined_fails() {
        assert_eq!(
            Value::Undefined.set_member("a", Value::Null),
            Err(EvalError::CannotSetProperty {
                key: "a".into(),
                target: "undefined"
            })
        );
        assert!(Value::Null.set_member("a", Value::Null).is_err());
        assert!(Value::Number(1.0).set_member("a", Value::Null).is_ok());
    }

    #[test]
    fn test_property_keys() {
        assert_eq!(Value::Number(1.0).to_property_key(), "1");
        assert_eq!(Value::Number(1.5).to_property_key(), "1.5");
        assert_eq!(Value::Bool(true).to_property_key(), "true");
        assert_eq!(Value::Undefined.to_property_key(), "undefined");
        assert_eq!(
            Value::from(json!(["constructor"])).to_property_key(),
            "constructor"
        );
        assert_eq!(Value::from(json!([1, null, 2])).to_property_key(), "1,,2");
        assert_eq!(Value::object().to_property_key(), "[object Object]");
    }

    #[test]
    fn test_equality() {
        assert_eq!(Value::from(json!({"a": [1]})), Value::from(json!({"a": [1]})));
        assert_ne!(Value::from(json!({"a": 1})), Value::from(json!({"a": 2})));
        assert_ne!(Value::global(), Value::object());
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));

        let f = Value::function(|_, _| Ok(Value::Undefined));
        let g = Value::function(|_, _| Ok(Value::Undefined));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }

    #[test]
    fn test_native_invoke_receives_this() {
        let f = Function::native(|this, args| {
            Ok(Value::array(vec![this.clone(), Value::from(args.len() as f64)]))
        });
        let result = f.invoke(&Value::from("self"), &[Value::Null]).unwrap();
        assert_eq!(result.to_json(), json!(["self", 1]));
    }

    #[test]
    fn test_object_constructor_invoke() {
        let ctor = Function::builtin(FunctionKind::ObjectConstructor);
        let result = ctor.invoke(&Value::Undefined, &[]).unwrap();
        assert_eq!(result.to_json(), json!({}));

        let existing = Value::from(json!({"a": 1}));
        let result = ctor.invoke(&Value::Undefined, &[existing.clone()]).unwrap();
        assert!(result.as_object().unwrap().ptr_eq(existing.as_object().unwrap()));
    }

    #[test]
    fn test_reflective_invoke_is_rejected() {
        let call = Function::builtin(FunctionKind::Call);
        assert!(matches!(
            call.invoke(&Value::Undefined, &[]),
            Err(EvalError::Sandbox(SandboxViolation::DisallowedFunctionReference(
                DisallowedFunction::CallApplyBind
            )))
        ));
    }
}
