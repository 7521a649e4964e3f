//! `sunder build`: compile class models for one target.

use std::path::{Path, PathBuf};

use anyhow::Context;
use sunder_engine::{compile, PrettyPrint, Severity, Target};
use termcolor::ColorChoice;

use super::{load_config, load_models};
use crate::output::{emit_diagnostics, StyledOutput};

pub struct BuildArgs {
    pub models: PathBuf,
    pub target: Target,
    pub out_dir: Option<PathBuf>,
    pub program: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: BuildArgs, color: ColorChoice) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let classes = load_models(&args.models)?;
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| config.emit.out_dir.clone());

    let program = match (&args.program, args.target) {
        (Some(path), Target::Server) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        (Some(path), Target::Client) => {
            log::warn!("ignoring {} for the client target", path.display());
            None
        }
        (None, _) => None,
    };

    let compiled = compile(classes, args.target, &config, program.as_deref())?;
    emit_diagnostics(&compiled.output.diagnostics, color);

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let mut written = vec![
        write(
            &out_dir,
            &format!("{}.classes.js", args.target),
            &compiled.classes.pretty_print(),
        )?,
        write(
            &out_dir,
            &format!("{}.model.json", args.target),
            &serde_json::to_string_pretty(&compiled.classes)?,
        )?,
    ];

    if let Some(artifacts) = &compiled.output.artifacts {
        written.extend(artifacts.write_to(&out_dir, &config.emit.program_file)?);
    }

    let mut out = StyledOutput::new(color);
    out.success("Built");
    out.plain(&format!(
        " {} target: {} class(es), {} endpoint(s)",
        args.target,
        compiled.classes.len(),
        compiled.output.endpoints.len()
    ));
    out.newline();
    for path in &written {
        out.dim(&format!("  {}", path.display()));
        out.newline();
    }
    let warnings = compiled
        .output
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    if warnings > 0 {
        out.warning(&format!("{} warning(s)", warnings));
        out.newline();
    }
    out.flush();
    Ok(())
}

fn write(dir: &Path, name: &str, content: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
