//! Class models handed over by the host compiler
//!
//! A [`ClassModel`] is created once per annotated class, rewritten by a
//! [`Compilation`](crate::Compilation) and not retained afterwards.

pub mod expr;
pub mod visitor;

pub use expr::{Expression, Literal, ObjectField};
pub use visitor::Visitor;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{SunderError, SunderResult};

/// Metadata tag marking a variable as shared state.
pub const SHARED_TAG: &str = "shared";

/// Metadata tag exempting a method from dead-code elimination.
pub const KEEP_TAG: &str = "keep";

/// Global scope object the generated RPC stubs reach `fetch` and `JSON`
/// through. A parameter of this name would shadow it.
pub const GLOBAL_SCOPE: &str = "globalThis";

/// One declared class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldModel>,
}

/// A class member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldModel {
    Variable(Variable),
    Method(Method),
}

/// Instance or static variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub metadata: BTreeSet<String>,
}

/// Method declaration with an optional body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Expression>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub metadata: BTreeSet<String>,
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>, fields: Vec<FieldModel>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Iterate over the methods of this class, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.fields.iter().filter_map(|f| match f {
            FieldModel::Method(m) => Some(m),
            FieldModel::Variable(_) => None,
        })
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods().find(|m| m.name == name)
    }

    /// Reject declarations the pipeline cannot process.
    pub fn validate(&self) -> SunderResult<()> {
        if !is_identifier(&self.name) {
            return Err(SunderError::InvalidClassName {
                name: self.name.clone(),
            });
        }

        let mut seen = FxHashSet::default();
        for field in &self.fields {
            let name = field.name();
            if !is_identifier(name) {
                return Err(SunderError::InvalidMemberName {
                    class: self.name.clone(),
                    name: name.to_string(),
                });
            }
            if let FieldModel::Method(method) = field {
                if !seen.insert(name) {
                    return Err(SunderError::DuplicateMethod {
                        class: self.name.clone(),
                        method: name.to_string(),
                    });
                }
                method.validate_parameters(&self.name)?;
            }
        }
        Ok(())
    }
}

impl FieldModel {
    pub fn name(&self) -> &str {
        match self {
            FieldModel::Variable(v) => &v.name,
            FieldModel::Method(m) => &m.name,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            FieldModel::Method(m) => Some(m),
            FieldModel::Variable(_) => None,
        }
    }
}

impl Variable {
    pub fn new(name: impl Into<String>, declared_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            declared_type,
            metadata: BTreeSet::new(),
        }
    }

    pub fn is_shared(&self) -> bool {
        self.metadata.contains(SHARED_TAG)
    }
}

impl Method {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>, body: Option<Expression>) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type: None,
            body,
            metadata: BTreeSet::new(),
        }
    }

    pub fn with_return_type(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Constructors have no return value and run once per object
    /// initialisation.
    pub fn is_constructor(&self) -> bool {
        matches!(self.name.as_str(), "new" | "constructor")
            && self.return_type.as_deref().map_or(true, |t| t == "Void")
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.metadata.contains(tag)
    }

    pub fn param_names(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.name.clone()).collect()
    }

    fn validate_parameters(&self, class: &str) -> SunderResult<()> {
        let mut seen = FxHashSet::default();
        for param in &self.parameters {
            if !is_identifier(&param.name) {
                return Err(SunderError::InvalidMemberName {
                    class: class.to_string(),
                    name: format!("{}({})", self.name, param.name),
                });
            }
            if param.name == GLOBAL_SCOPE {
                return Err(SunderError::ReservedParameter {
                    class: class.to_string(),
                    method: self.name.clone(),
                    param: param.name.clone(),
                });
            }
            if !seen.insert(param.name.as_str()) {
                return Err(SunderError::DuplicateParameter {
                    class: class.to_string(),
                    method: self.name.clone(),
                    param: param.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
        }
    }

    pub fn typed(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(ty.into()),
        }
    }
}

/// Names end up verbatim in generated JavaScript, so they must be plain
/// identifiers.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, params: &[&str]) -> FieldModel {
        FieldModel::Method(Method::new(
            name,
            params.iter().map(|p| Parameter::new(*p)).collect(),
            None,
        ))
    }

    #[test]
    fn test_validate_accepts_well_formed_class() {
        let class = ClassModel::new(
            "Todo",
            vec![
                FieldModel::Variable(Variable::new("items", Some("Array<String>".into()))),
                method("addItem", &["text"]),
                method("render", &[]),
            ],
        );
        assert!(class.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_class_name() {
        let class = ClassModel::new("", vec![]);
        assert!(matches!(
            class.validate(),
            Err(SunderError::InvalidClassName { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_parameter() {
        let class = ClassModel::new("Todo", vec![method("add", &["a", "a"])]);
        assert!(matches!(
            class.validate(),
            Err(SunderError::DuplicateParameter { ref param, .. }) if param == "a"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_method() {
        let class = ClassModel::new("Todo", vec![method("add", &[]), method("add", &["x"])]);
        assert!(matches!(
            class.validate(),
            Err(SunderError::DuplicateMethod { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_global_scope_parameter() {
        let class = ClassModel::new("Todo", vec![method("add", &["globalThis"])]);
        assert!(matches!(
            class.validate(),
            Err(SunderError::ReservedParameter { ref param, .. }) if param == GLOBAL_SCOPE
        ));
    }

    #[test]
    fn test_constructor_detection() {
        assert!(Method::new("new", vec![], None).is_constructor());
        assert!(Method::new("new", vec![], None).with_return_type("Void").is_constructor());
        assert!(!Method::new("new", vec![], None).with_return_type("Int").is_constructor());
        assert!(!Method::new("create", vec![], None).is_constructor());
    }

    #[test]
    fn test_shared_tag() {
        let mut var = Variable::new("count", None);
        assert!(!var.is_shared());
        var.metadata.insert(SHARED_TAG.to_string());
        assert!(var.is_shared());
    }
}
