//! Stateful shell module.
//!
//! The shell owns one instance of every application class that exposes an
//! endpoint and answers RPC requests with an exhaustive `switch` over the
//! registered qualified names.

use std::fmt::Write;

use super::{js_string, Naming};
use crate::config::SunderConfig;
use crate::registry::Endpoint;

pub fn render(endpoints: &[Endpoint], naming: &Naming, config: &SunderConfig) -> String {
    let mut out = String::new();
    writeln!(out, "// Generated by sunder. Do not edit.").unwrap();
    writeln!(out, "import {};", js_string(&format!("./{}", config.emit.program_file))).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "const RPC_PATH = {};", js_string(&config.rpc.path)).unwrap();
    writeln!(out).unwrap();
    out.push_str(
        r#"function json(body, status = 200) {
  return new Response(JSON.stringify(body === undefined ? null : body), {
    status,
    headers: { "Content-Type": "application/json" },
  });
}
"#,
    );
    writeln!(out).unwrap();

    writeln!(out, "export class {} {{", naming.shell_class).unwrap();
    writeln!(out, "  constructor(state, env) {{").unwrap();
    writeln!(out, "    this.state = state;").unwrap();
    writeln!(out, "    this.env = env;").unwrap();
    writeln!(out, "    this.instances = {{").unwrap();
    for class in distinct_classes(endpoints) {
        writeln!(out, "      {}: new globalThis[{}](),", class, js_string(class)).unwrap();
    }
    writeln!(out, "    }};").unwrap();
    writeln!(out, "  }}").unwrap();
    writeln!(out).unwrap();

    out.push_str(
        r#"  async fetch(request) {
    const url = new URL(request.url);
    if (url.pathname !== RPC_PATH) {
      return json({ error: "Not found: " + url.pathname }, 404);
    }
    if (request.method !== "POST") {
      return json({ error: "Method not allowed: " + request.method }, 405);
    }
    let call;
    try {
      call = await request.json();
    } catch (e) {
      return json({ error: "Invalid JSON body" }, 400);
    }
    if (call === null || typeof call !== "object" || Array.isArray(call)) {
      return json({ error: "Request body must be an object" }, 400);
    }
    const method = call.method;
    const args = call.args || {};
    switch (method) {
"#,
    );
    for endpoint in endpoints {
        let call_args: Vec<String> = endpoint
            .param_names
            .iter()
            .map(|p| format!("args[{}]", js_string(p)))
            .collect();
        writeln!(out, "      case {}:", js_string(&endpoint.qualified_name())).unwrap();
        writeln!(
            out,
            "        return json(await this.instances.{}.{}({}));",
            endpoint.class_name,
            endpoint.method_name,
            call_args.join(", ")
        )
        .unwrap();
    }
    out.push_str(
        r#"      default:
        return json({ error: "Unknown method: " + method }, 404);
    }
  }

  // Timer-triggered entry point; nothing schedules timers yet.
  async alarm() {}

  // Message-triggered entry point; nothing routes messages here yet.
  async webSocketMessage(ws, message) {}
}
"#,
    );
    out
}

/// Class names in first-registration order, without repeats.
fn distinct_classes(endpoints: &[Endpoint]) -> Vec<&str> {
    let mut classes: Vec<&str> = Vec::new();
    for endpoint in endpoints {
        if !classes.contains(&endpoint.class_name.as_str()) {
            classes.push(&endpoint.class_name);
        }
    }
    classes
}
