//! Dual-target rewriting
//!
//! The same class model is compiled twice. Under [`Target::Server`] every
//! server-bound method is kept verbatim and registered as an endpoint,
//! while client-anchored methods are dropped. Under [`Target::Client`]
//! server-bound methods are replaced by an RPC stub with the same
//! signature.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analysis::Placement;
use crate::config::RpcConfig;
use crate::model::{Expression, Method, GLOBAL_SCOPE, KEEP_TAG};
use crate::registry::{qualified_name, Endpoint, EndpointRegistry};

/// Return type of an RPC stub. The decoded JSON response no longer has the
/// method's declared type.
pub const STUB_RETURN_TYPE: &str = "Dynamic";

const PAYLOAD_LOCAL: &str = "__payload";
const RESPONSE_LOCAL: &str = "__response";

/// Which compiled output is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Front-end program.
    Client,
    /// Backend program; populates the endpoint registry.
    Server,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Client => "client",
            Target::Server => "server",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Target::Client),
            "server" => Ok(Target::Server),
            other => Err(format!("unknown target '{}' (expected client or server)", other)),
        }
    }
}

/// Rewrite one method for `target`. `None` removes the method from the
/// compiled output.
///
/// Server-bound methods compiled for the server are appended to `registry`
/// and tagged [`KEEP_TAG`] so dead-code elimination leaves them callable.
pub fn rewrite(
    mut method: Method,
    placement: Placement,
    target: Target,
    class_name: &str,
    registry: &mut EndpointRegistry,
    rpc: &RpcConfig,
) -> Option<Method> {
    if method.is_constructor() {
        return Some(method);
    }

    match (target, placement) {
        (Target::Server, Placement::ClientAnchored) => {
            log::debug!("dropping {}.{} from server output", class_name, method.name);
            None
        }
        (Target::Server, Placement::ServerBound) => {
            registry.register(Endpoint::new(class_name, &method.name, method.param_names()));
            method.metadata.insert(KEEP_TAG.to_string());
            Some(method)
        }
        (Target::Server, Placement::Portable) => Some(method),
        (Target::Client, Placement::ServerBound) => Some(rpc_stub(method, class_name, rpc)),
        (Target::Client, Placement::ClientAnchored | Placement::Portable) => Some(method),
    }
}

/// Replace the body of `method` with a call to the RPC endpoint:
///
/// ```text
/// const __payload = globalThis.JSON.stringify({ method: "Class.name", args: { p: p } });
/// const __response = await globalThis.fetch("/rpc", { method: "POST", headers: {...}, body: __payload });
/// return await __response.json();
/// ```
///
/// Globals are reached through `globalThis` and locals are renamed away
/// from the parameter names, so no parameter can shadow them.
pub fn rpc_stub(method: Method, class_name: &str, rpc: &RpcConfig) -> Method {
    let payload_local = fresh_local(PAYLOAD_LOCAL, &method);
    let response_local = fresh_local(RESPONSE_LOCAL, &method);

    let args = Expression::object(
        method
            .parameters
            .iter()
            .map(|p| (p.name.clone(), Expression::ident(&p.name))),
    );
    let request = Expression::object([
        ("method", Expression::string(qualified_name(class_name, &method.name))),
        ("args", args),
    ]);

    let payload = Expression::let_(
        payload_local.as_str(),
        Expression::call(
            Expression::member(
                Expression::member(Expression::ident(GLOBAL_SCOPE), "JSON"),
                "stringify",
            ),
            vec![request],
        ),
    );
    let response = Expression::let_(
        response_local.as_str(),
        Expression::await_(Expression::call(
            Expression::member(Expression::ident(GLOBAL_SCOPE), "fetch"),
            vec![
                Expression::string(&rpc.path),
                Expression::object([
                    ("method", Expression::string("POST")),
                    (
                        "headers",
                        Expression::object([("Content-Type", Expression::string("application/json"))]),
                    ),
                    ("body", Expression::ident(payload_local.as_str())),
                ]),
            ],
        )),
    );
    let result = Expression::return_(Expression::await_(Expression::call(
        Expression::member(Expression::ident(response_local), "json"),
        vec![],
    )));

    Method {
        name: method.name,
        parameters: method.parameters,
        return_type: Some(STUB_RETURN_TYPE.to_string()),
        body: Some(Expression::block(vec![payload, response, result])),
        metadata: method.metadata,
    }
}

/// `base`, suffixed with a counter until it names no parameter of `method`.
fn fresh_local(base: &str, method: &Method) -> String {
    let taken = |name: &str| method.parameters.iter().any(|p| p.name == name);
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}{}", base, n))
        .find(|name| !taken(name))
        .unwrap_or_else(|| base.to_string())
}
