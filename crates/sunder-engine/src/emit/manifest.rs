//! API manifest (`API.md`): one section per endpoint, in registration order.

use std::fmt::Write;

use super::Naming;
use crate::config::SunderConfig;
use crate::registry::Endpoint;

pub fn render(endpoints: &[Endpoint], naming: &Naming, config: &SunderConfig) -> String {
    let mut out = String::new();
    writeln!(out, "# {} API", naming.program).unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "All endpoints are served at `POST {}` with a JSON body",
        config.rpc.path
    )
    .unwrap();
    writeln!(out, "`{{\"method\": \"<Class>.<method>\", \"args\": {{...}}}}`.").unwrap();

    for endpoint in endpoints {
        writeln!(out).unwrap();
        writeln!(out, "## {}", endpoint.qualified_name()).unwrap();
        writeln!(out).unwrap();
        if endpoint.param_names.is_empty() {
            writeln!(out, "- Parameters: none").unwrap();
        } else {
            let params: Vec<String> = endpoint
                .param_names
                .iter()
                .map(|p| format!("`{}`", p))
                .collect();
            writeln!(out, "- Parameters: {}", params.join(", ")).unwrap();
        }
    }
    out
}

/// Qualified names listed in a rendered manifest, in order.
pub fn listed_endpoints(manifest: &str) -> Vec<&str> {
    manifest
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_follow_registration_order() {
        let naming = Naming {
            program: "todo".to_string(),
            shell_class: "TodoShell".to_string(),
            binding: "TODO_SHELL".to_string(),
        };
        let endpoints = vec![
            Endpoint::new("Todo", "methodA", vec!["x".to_string(), "y".to_string()]),
            Endpoint::new("Todo", "methodB", vec![]),
        ];
        let manifest = render(&endpoints, &naming, &SunderConfig::default());

        assert_eq!(listed_endpoints(&manifest), vec!["Todo.methodA", "Todo.methodB"]);
        assert!(manifest.contains("- Parameters: `x`, `y`"));
        assert!(manifest.contains("- Parameters: none"));
        assert!(manifest.contains("`POST /rpc`"));
    }
}
