//! `sunder classify`: report the placement of every method.

use std::path::Path;

use serde_json::json;
use sunder_engine::{analyze_method, Diagnostic};
use termcolor::ColorChoice;

use super::{load_config, load_models};
use crate::output::{emit_diagnostics, StyledOutput};

pub fn execute(
    models: &Path,
    config: Option<&Path>,
    json: bool,
    color: ColorChoice,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let classes = load_models(models)?;
    for class in &classes {
        class.validate()?;
    }

    let mut rows = Vec::new();
    let mut warnings: Vec<Diagnostic> = Vec::new();
    for class in &classes {
        for method in class.methods() {
            let analysis = analyze_method(method, &config.signals);
            warnings.extend(analysis.ambiguity(&class.name, method));
            rows.push((format!("{}.{}", class.name, method.name), analysis));
        }
    }

    if json {
        let entries: Vec<_> = rows
            .iter()
            .map(|(name, analysis)| {
                json!({
                    "method": name,
                    "placement": analysis.placement,
                    "signals": analysis.signals.describe(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = StyledOutput::new(color);
    for (name, analysis) in &rows {
        out.bold(&format!("{:<width$}  ", name, width = width));
        out.placement(analysis.placement, 16);
        let signals = analysis.signals.describe();
        if signals.is_empty() {
            out.dim("-");
        } else {
            out.plain(&signals.join(", "));
        }
        out.newline();
    }
    out.flush();

    emit_diagnostics(&warnings, color);
    Ok(())
}
