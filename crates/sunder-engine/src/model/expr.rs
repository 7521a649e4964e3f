//! Expression trees for method bodies
//!
//! The host parser hands every method body over as an [`Expression`]. Only
//! calls and member accesses carry meaning for placement analysis; every
//! other node kind is traversed through [`Expression::children`].

use serde::{Deserialize, Serialize};

/// A node of a method body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// Call: `callee(args...)`
    Call {
        callee: Box<Expression>,
        #[serde(default)]
        args: Vec<Expression>,
    },

    /// Member access: `base.member`
    Member { base: Box<Expression>, member: String },

    /// Bare identifier
    Identifier { name: String },

    /// Literal value
    Literal { value: Literal },

    /// Object literal: `{ key: value, ... }`
    Object {
        #[serde(default)]
        fields: Vec<ObjectField>,
    },

    /// Local binding: `const name = value`
    Let { name: String, value: Box<Expression> },

    /// `await value`
    Await { value: Box<Expression> },

    /// `return value?`
    Return {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<Expression>>,
    },

    /// Statement sequence
    Block {
        #[serde(default)]
        body: Vec<Expression>,
    },

    /// Any node kind not modelled above (conditionals, loops, closures,
    /// array literals, ...). `label` is the host's name for the node kind.
    Other {
        label: String,
        #[serde(default)]
        children: Vec<Expression>,
    },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

/// A `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectField {
    pub key: String,
    pub value: Expression,
}

impl Expression {
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal {
            value: Literal::String(value.into()),
        }
    }

    pub fn member(base: Expression, member: impl Into<String>) -> Self {
        Expression::Member {
            base: Box::new(base),
            member: member.into(),
        }
    }

    pub fn call(callee: Expression, args: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee),
            args,
        }
    }

    /// Member chain from a dotted path: `path("a.b.c")` is `a.b.c`.
    pub fn path(dotted: &str) -> Self {
        let mut segments = dotted.split('.');
        let root = Expression::ident(segments.next().unwrap_or_default());
        segments.fold(root, |base, seg| Expression::member(base, seg))
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Expression)>) -> Self {
        Expression::Object {
            fields: fields
                .into_iter()
                .map(|(key, value)| ObjectField {
                    key: key.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn let_(name: impl Into<String>, value: Expression) -> Self {
        Expression::Let {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn await_(value: Expression) -> Self {
        Expression::Await {
            value: Box::new(value),
        }
    }

    pub fn return_(value: Expression) -> Self {
        Expression::Return {
            value: Some(Box::new(value)),
        }
    }

    pub fn block(body: Vec<Expression>) -> Self {
        Expression::Block { body }
    }

    pub fn other(label: impl Into<String>, children: Vec<Expression>) -> Self {
        Expression::Other {
            label: label.into(),
            children,
        }
    }

    /// Direct sub-expressions, in source order.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Call { callee, args } => {
                let mut out = Vec::with_capacity(args.len() + 1);
                out.push(callee.as_ref());
                out.extend(args.iter());
                out
            }
            Expression::Member { base, .. } => vec![base.as_ref()],
            Expression::Identifier { .. } | Expression::Literal { .. } => Vec::new(),
            Expression::Object { fields } => fields.iter().map(|f| &f.value).collect(),
            Expression::Let { value, .. } | Expression::Await { value } => vec![value.as_ref()],
            Expression::Return { value } => value.iter().map(|v| v.as_ref()).collect(),
            Expression::Block { body } => body.iter().collect(),
            Expression::Other { children, .. } => children.iter().collect(),
        }
    }

    /// Total number of nodes in this tree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().into_iter().map(Expression::node_count).sum::<usize>()
    }
}
