//! Export-scope patch for the compiled backend program.
//!
//! The host compiler resolves its export object with a fixed expression.
//! Replacing it with the global scope lets the shell look application
//! classes up by name (`globalThis["Todo"]`).

use crate::config::EmitConfig;
use crate::diagnostic::{codes, Diagnostic};

/// Replace the first occurrence of the export-resolution expression.
/// A program without it is returned as a warning and must be used as is.
pub fn patch_export_scope(program: &str, config: &EmitConfig) -> Result<String, Diagnostic> {
    if config.export_scope_pattern.is_empty() || !program.contains(&config.export_scope_pattern) {
        return Err(Diagnostic::warning(
            codes::EXPORT_SCOPE_NOT_FOUND,
            "export-resolution expression not found in the compiled backend program; leaving it unpatched",
        )
        .with_note(format!("looked for: {}", config.export_scope_pattern)));
    }
    Ok(program.replacen(
        &config.export_scope_pattern,
        &config.export_scope_replacement,
        1,
    ))
}
