//! Expression AST.
//!
//! A small fixed set of node kinds. `Display` renders a node back to
//! canonical source text, with string literals fully escaped so the text can
//! be tokenized again. Non-finite number literals are the exception: `NaN`
//! (from malformed decimals such as `1.2.3`) and `Infinity` (from `1e999`)
//! display under those names, which read back as identifiers.

use ng_expression_util::strings::{number_to_string, quote};
use std::fmt;

/// A constant value embedded in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Literal {
    /// The property-key string this literal denotes when used as an object key.
    pub fn to_property_key(&self) -> String {
        match self {
            Literal::Null => "null".to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Number(n) => number_to_string(*n),
            Literal::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => f.write_str(&number_to_string(*n)),
            Literal::String(s) => f.write_str(&quote(s)),
        }
    }
}

/// Key of an object literal property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(String),
    Literal(Literal),
}

impl PropertyKey {
    pub fn to_property_key(&self) -> String {
        match self {
            PropertyKey::Identifier(name) => name.clone(),
            PropertyKey::Literal(literal) => literal.to_property_key(),
        }
    }
}

/// A `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Node,
}

/// AST node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root of a parsed expression; always has exactly one body.
    Program { body: Box<Node> },
    Literal(Literal),
    ArrayExpression { elements: Vec<Node> },
    ObjectExpression { properties: Vec<Property> },
    Identifier { name: String },
    /// `this`: the scope the evaluator was invoked with.
    ThisExpression,
    /// `$locals`: the locals the evaluator was invoked with.
    LocalsExpression,
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    AssignmentExpression { left: Box<Node>, right: Box<Node> },
}

impl Node {
    pub fn program(body: Node) -> Self {
        Node::Program {
            body: Box::new(body),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier { name: name.into() }
    }

    pub fn number(n: f64) -> Self {
        Node::Literal(Literal::Number(n))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::Literal(Literal::String(s.into()))
    }

    /// `object.name`
    pub fn member(object: Node, name: impl Into<String>) -> Self {
        Node::MemberExpression {
            object: Box::new(object),
            property: Box::new(Node::identifier(name)),
            computed: false,
        }
    }

    /// `object[property]`
    pub fn computed_member(object: Node, property: Node) -> Self {
        Node::MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: true,
        }
    }

    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Node::CallExpression {
            callee: Box::new(callee),
            arguments,
        }
    }

    pub fn assign(left: Node, right: Node) -> Self {
        Node::AssignmentExpression {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", node)?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Program { body } => write!(f, "{}", body),
            Node::Literal(literal) => write!(f, "{}", literal),
            Node::ArrayExpression { elements } => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }
            Node::ObjectExpression { properties } => {
                f.write_str("{")?;
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match &property.key {
                        PropertyKey::Identifier(name) => f.write_str(name)?,
                        PropertyKey::Literal(literal) => write!(f, "{}", literal)?,
                    }
                    write!(f, ": {}", property.value)?;
                }
                f.write_str("}")
            }
            Node::Identifier { name } => f.write_str(name),
            Node::ThisExpression => f.write_str("this"),
            Node::LocalsExpression => f.write_str("$locals"),
            Node::MemberExpression {
                object,
                property,
                computed: true,
            } => write!(f, "{}[{}]", object, property),
            Node::MemberExpression {
                object, property, ..
            } => write!(f, "{}.{}", object, property),
            Node::CallExpression { callee, arguments } => {
                write!(f, "{}(", callee)?;
                write_list(f, arguments)?;
                f.write_str(")")
            }
            Node::AssignmentExpression { left, right } => write!(f, "{} = {}", left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Null.to_string(), "null");
        assert_eq!(Literal::Bool(true).to_string(), "true");
        assert_eq!(Literal::Number(1.5).to_string(), "1.5");
        assert_eq!(Literal::Number(3.0).to_string(), "3");
        assert_eq!(Literal::String("a b".into()).to_string(), "'a b'");
        assert_eq!(Literal::String("it's".into()).to_string(), "'it\\u0027s'");
        assert_eq!(Literal::Number(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_property_keys() {
        assert_eq!(Literal::Number(1.0).to_property_key(), "1");
        assert_eq!(Literal::Null.to_property_key(), "null");
        assert_eq!(Literal::String("x y".into()).to_property_key(), "x y");
        assert_eq!(PropertyKey::Identifier("a".into()).to_property_key(), "a");
    }

    #[test]
    fn test_member_and_call_display() {
        let node = Node::call(
            Node::computed_member(Node::member(Node::identifier("a"), "b"), Node::number(0.0)),
            vec![Node::string("x"), Node::ThisExpression],
        );
        assert_eq!(node.to_string(), "a.b[0]('x', this)");
    }

    #[test]
    fn test_object_and_assignment_display() {
        let node = Node::assign(
            Node::member(Node::LocalsExpression, "o"),
            Node::ObjectExpression {
                properties: vec![
                    Property {
                        key: PropertyKey::Identifier("a".into()),
                        value: Node::ArrayExpression {
                            elements: vec![Node::number(1.0), Node::Literal(Literal::Null)],
                        },
                    },
                    Property {
                        key: PropertyKey::Literal(Literal::String("b-c".into())),
                        value: Node::Literal(Literal::Bool(false)),
                    },
                ],
            },
        );
        assert_eq!(
            node.to_string(),
            "$locals.o = {a: [1, null], 'b\\u002dc': false}"
        );
    }
}
