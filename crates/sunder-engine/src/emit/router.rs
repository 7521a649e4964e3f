//! Stateless router module.
//!
//! Every request goes to the same logical shell instance; there is no
//! sharding by request attributes.

use std::fmt::Write;

use super::{js_string, Naming, SHELL_FILE};
use crate::config::SunderConfig;

pub fn render(naming: &Naming, config: &SunderConfig) -> String {
    let mut out = String::new();
    writeln!(out, "// Generated by sunder. Do not edit.").unwrap();
    writeln!(
        out,
        "import {{ {} }} from {};",
        naming.shell_class,
        js_string(&format!("./{}", SHELL_FILE))
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "export {{ {} }};", naming.shell_class).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "export default {{").unwrap();
    writeln!(out, "  async fetch(request, env) {{").unwrap();
    writeln!(
        out,
        "    const id = env.{}.idFromName({});",
        naming.binding,
        js_string(&config.deploy.instance_name)
    )
    .unwrap();
    writeln!(out, "    return env.{}.get(id).fetch(request);", naming.binding).unwrap();
    writeln!(out, "  }},").unwrap();
    writeln!(out, "}};").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_forwards_to_single_instance() {
        let naming = Naming {
            program: "todo".to_string(),
            shell_class: "TodoShell".to_string(),
            binding: "TODO_SHELL".to_string(),
        };
        let router = render(&naming, &SunderConfig::default());
        assert!(router.contains("import { TodoShell } from \"./shell.js\";"));
        assert!(router.contains("export { TodoShell };"));
        assert!(router.contains("env.TODO_SHELL.idFromName(\"singleton\")"));
        assert!(router.contains("return env.TODO_SHELL.get(id).fetch(request);"));
    }
}
