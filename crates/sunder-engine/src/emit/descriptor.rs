//! Deployment descriptor (`wrangler.toml`).

use serde::{Deserialize, Serialize};

use super::{Naming, ROUTER_FILE};
use crate::config::SunderConfig;
use crate::error::SunderResult;

/// Deployment descriptor document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Descriptor {
    /// Program name
    pub name: String,
    /// Entry module (the router)
    pub main: String,
    pub compatibility_date: String,
    pub durable_objects: DurableObjects,
    pub migrations: Vec<Migration>,
}

/// Bindings between the router environment and stateful shell classes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DurableObjects {
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Binding {
    pub name: String,
    pub class_name: String,
}

/// Declares shell classes to the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Migration {
    pub tag: String,
    pub new_classes: Vec<String>,
}

impl Descriptor {
    pub fn new(naming: &Naming, config: &SunderConfig) -> Self {
        Self {
            name: naming.program.clone(),
            main: ROUTER_FILE.to_string(),
            compatibility_date: config.deploy.compatibility_date.clone(),
            durable_objects: DurableObjects {
                bindings: vec![Binding {
                    name: naming.binding.clone(),
                    class_name: naming.shell_class.clone(),
                }],
            },
            migrations: vec![Migration {
                tag: "v1".to_string(),
                new_classes: vec![naming.shell_class.clone()],
            }],
        }
    }
}

pub fn render(naming: &Naming, config: &SunderConfig) -> SunderResult<String> {
    let descriptor = Descriptor::new(naming, config);
    let mut out = String::from("# Generated by sunder. Do not edit.\n");
    out.push_str(&toml::to_string(&descriptor)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_round_trips_through_toml() {
        let naming = Naming {
            program: "todo".to_string(),
            shell_class: "TodoShell".to_string(),
            binding: "TODO_SHELL".to_string(),
        };
        let text = render(&naming, &SunderConfig::default()).unwrap();
        let parsed: Descriptor = toml::from_str(&text).unwrap();

        assert_eq!(parsed.name, "todo");
        assert_eq!(parsed.main, "router.js");
        assert_eq!(parsed.durable_objects.bindings[0].name, "TODO_SHELL");
        assert_eq!(parsed.durable_objects.bindings[0].class_name, "TodoShell");
        assert_eq!(parsed.migrations[0].new_classes, vec!["TodoShell"]);
    }
}
