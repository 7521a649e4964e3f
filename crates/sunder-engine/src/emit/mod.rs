//! Backend artifact emission
//!
//! Runs once at the end of a server-target compilation and turns the
//! endpoint registry into four documents that must agree with each other:
//!
//! - [`shell`]: stateful module wrapping the compiled application and
//!   dispatching RPC requests to it
//! - [`router`]: stateless entry point forwarding every request to the
//!   single shell instance
//! - [`descriptor`]: deployment descriptor binding router and shell
//! - [`manifest`]: human-readable API listing
//!
//! [`patch`] additionally rewrites the compiled backend program so the
//! shell can find application classes on the global scope.

pub mod descriptor;
pub mod manifest;
pub mod patch;
pub mod router;
pub mod shell;

use std::path::{Path, PathBuf};

use crate::config::SunderConfig;
use crate::diagnostic::{codes, Diagnostic, Diagnostics};
use crate::error::SunderResult;
use crate::registry::Endpoint;

pub const SHELL_FILE: &str = "shell.js";
pub const ROUTER_FILE: &str = "router.js";
pub const DESCRIPTOR_FILE: &str = "wrangler.toml";
pub const MANIFEST_FILE: &str = "API.md";

/// Names shared by all artifacts, derived from the first endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Deployed program name (`todo-app`).
    pub program: String,
    /// Class name of the stateful shell (`TodoAppShell`).
    pub shell_class: String,
    /// Environment binding the router resolves the shell through
    /// (`TODO_APP_SHELL`).
    pub binding: String,
}

impl Naming {
    pub fn derive(first: &Endpoint, config: &SunderConfig) -> Self {
        let mut words = split_words(&first.class_name);
        if words.is_empty() {
            words.push(first.class_name.to_lowercase());
        }
        let program = config
            .deploy
            .name
            .clone()
            .unwrap_or_else(|| words.join("-"));
        let mut binding = words.join("_").to_uppercase();
        binding.push_str("_SHELL");
        Self {
            program,
            shell_class: format!("{}Shell", first.class_name),
            binding,
        }
    }
}

/// Lowercase words of a camel-case identifier: `TodoAPIClient` gives
/// `["todo", "api", "client"]`.
fn split_words(ident: &str) -> Vec<String> {
    let chars: Vec<char> = ident.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '$' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let boundary = c.is_uppercase()
            && !current.is_empty()
            && (chars[i - 1].is_lowercase()
                || chars[i - 1].is_ascii_digit()
                || chars.get(i + 1).map_or(false, |n| n.is_lowercase()));
        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Quote a string as a JavaScript string literal.
pub(crate) fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// The emitted documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub naming: Naming,
    pub shell: String,
    pub router: String,
    pub descriptor: String,
    pub manifest: String,
    /// Compiled backend program, when one was supplied. The export scope
    /// is patched when the pattern was found; otherwise the source is kept
    /// as is so the shell's import still resolves.
    pub program: Option<String>,
}

impl Artifacts {
    /// Write all artifacts into `dir`, creating it if needed. Returns the
    /// written paths.
    pub fn write_to(&self, dir: &Path, program_file: &str) -> SunderResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut files = vec![
            (SHELL_FILE, &self.shell),
            (ROUTER_FILE, &self.router),
            (DESCRIPTOR_FILE, &self.descriptor),
            (MANIFEST_FILE, &self.manifest),
        ];
        if let Some(program) = &self.program {
            files.push((program_file, program));
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, content) in files {
            let path = dir.join(name);
            std::fs::write(&path, content)?;
            log::info!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// Produces [`Artifacts`] from a finished registry.
pub struct Emitter<'a> {
    config: &'a SunderConfig,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a SunderConfig) -> Self {
        Self { config }
    }

    /// Emit all artifacts. Returns `None` and records an
    /// [`codes::NO_ENDPOINTS`] note when `endpoints` is empty.
    pub fn emit(
        &self,
        endpoints: &[Endpoint],
        program: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) -> SunderResult<Option<Artifacts>> {
        let Some(first) = endpoints.first() else {
            diagnostics.push(Diagnostic::note(
                codes::NO_ENDPOINTS,
                "no server-bound methods; skipping artifact emission",
            ));
            return Ok(None);
        };
        let naming = Naming::derive(first, self.config);

        let program = program.map(|source| {
            match patch::patch_export_scope(source, &self.config.emit) {
                Ok(patched) => patched,
                Err(warning) => {
                    diagnostics.push(warning);
                    source.to_string()
                }
            }
        });

        Ok(Some(Artifacts {
            shell: shell::render(endpoints, &naming, self.config),
            router: router::render(&naming, self.config),
            descriptor: descriptor::render(&naming, self.config)?,
            manifest: manifest::render(endpoints, &naming, self.config),
            naming,
            program,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("Todo"), vec!["todo"]);
        assert_eq!(split_words("TodoApp"), vec!["todo", "app"]);
        assert_eq!(split_words("TodoAPIClient"), vec!["todo", "api", "client"]);
        assert_eq!(split_words("chat_room2"), vec!["chat", "room2"]);
    }

    #[test]
    fn test_naming_from_first_endpoint() {
        let endpoint = Endpoint::new("TodoApp", "add", vec![]);
        let naming = Naming::derive(&endpoint, &SunderConfig::default());
        assert_eq!(naming.program, "todo-app");
        assert_eq!(naming.shell_class, "TodoAppShell");
        assert_eq!(naming.binding, "TODO_APP_SHELL");
    }

    #[test]
    fn test_naming_respects_configured_name() {
        let mut config = SunderConfig::default();
        config.deploy.name = Some("my-worker".to_string());
        let naming = Naming::derive(&Endpoint::new("Todo", "add", vec![]), &config);
        assert_eq!(naming.program, "my-worker");
        assert_eq!(naming.shell_class, "TodoShell");
    }

    #[test]
    fn test_naming_falls_back_to_class_name_without_words() {
        let config = SunderConfig::default();
        let naming = Naming::derive(&Endpoint::new("_", "add", vec![]), &config);
        assert_eq!(naming.program, "_");
        assert_eq!(naming.shell_class, "_Shell");
        assert_eq!(naming.binding, "__SHELL");

        let naming = Naming::derive(&Endpoint::new("$", "add", vec![]), &config);
        assert_eq!(naming.program, "$");
        assert_eq!(naming.binding, "$_SHELL");
    }

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("Todo.add"), "\"Todo.add\"");
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_empty_registry_emits_nothing() {
        let config = SunderConfig::default();
        let mut diagnostics = Diagnostics::new();
        let out = Emitter::new(&config)
            .emit(&[], Some("program"), &mut diagnostics)
            .unwrap();
        assert!(out.is_none());
        assert_eq!(diagnostics.len(), 1);
        let note = diagnostics.iter().next().unwrap();
        assert_eq!(note.code, codes::NO_ENDPOINTS);
        assert_eq!(note.severity, Severity::Note);
    }
}
