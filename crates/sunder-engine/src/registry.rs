//! Endpoint registry
//!
//! One registry lives for exactly one server-target compilation pass. It is
//! owned by the [`Compilation`](crate::Compilation), filled by the rewriter
//! and consumed once by the emitter. Entries are never removed or merged.

use serde::{Deserialize, Serialize};

/// A server-bound method reachable over RPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub class_name: String,
    pub method_name: String,
    pub param_names: Vec<String>,
}

impl Endpoint {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        param_names: Vec<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            param_names,
        }
    }

    /// Wire name of the endpoint: `Class.method`.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.class_name, &self.method_name)
    }
}

pub fn qualified_name(class_name: &str, method_name: &str) -> String {
    format!("{}.{}", class_name, method_name)
}

/// Append-only, ordered endpoint list.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an endpoint. Duplicates are kept; see [`contains`](Self::contains).
    pub fn register(&mut self, endpoint: Endpoint) {
        log::debug!(
            "registered endpoint {}({})",
            endpoint.qualified_name(),
            endpoint.param_names.join(", ")
        );
        self.endpoints.push(endpoint);
    }

    pub fn contains(&self, class_name: &str, method_name: &str) -> bool {
        self.endpoints
            .iter()
            .any(|e| e.class_name == class_name && e.method_name == method_name)
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn into_endpoints(self) -> Vec<Endpoint> {
        self.endpoints
    }
}
