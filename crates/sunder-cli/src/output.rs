//! Colored terminal output and diagnostic rendering.
//!
//! Respects the `NO_COLOR` environment variable and the `--color` flag.

use std::io::Write;

use codespan_reporting::diagnostic::Diagnostic as Report;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use sunder_engine::{Diagnostic, Placement, Severity};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Styled writer over stdout.
pub struct StyledOutput {
    stdout: StandardStream,
}

impl StyledOutput {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    fn write_styled(&mut self, text: &str, color: Option<Color>, bold: bool) {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        let _ = self.stdout.set_color(&spec);
        let _ = write!(self.stdout, "{}", text);
        let _ = self.stdout.reset();
    }

    /// Green bold text.
    pub fn success(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Green), true);
    }

    /// Yellow bold text.
    pub fn warning(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Yellow), true);
    }

    /// Bold text.
    pub fn bold(&mut self, text: &str) {
        self.write_styled(text, None, true);
    }

    /// Dim text.
    pub fn dim(&mut self, text: &str) {
        self.write_styled(text, Some(Color::White), false);
    }

    pub fn plain(&mut self, text: &str) {
        let _ = write!(self.stdout, "{}", text);
    }

    pub fn newline(&mut self) {
        let _ = writeln!(self.stdout);
    }

    /// Placement label, padded to `width`, colored by side.
    pub fn placement(&mut self, placement: Placement, width: usize) {
        let color = match placement {
            Placement::ServerBound => Color::Magenta,
            Placement::ClientAnchored => Color::Cyan,
            Placement::Portable => Color::Green,
        };
        let text = format!("{:<width$}", placement.as_str(), width = width);
        self.write_styled(&text, Some(color), false);
    }

    pub fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

/// Render engine diagnostics to stderr through codespan.
///
/// Engine diagnostics carry no source spans, so they are rendered as
/// label-less reports with their notes.
pub fn emit_diagnostics(diagnostics: &[Diagnostic], choice: ColorChoice) {
    if diagnostics.is_empty() {
        return;
    }
    let files: SimpleFiles<String, String> = SimpleFiles::new();
    let config = term::Config::default();
    let mut writer = StandardStream::stderr(choice);

    for diagnostic in diagnostics {
        let report = match diagnostic.severity {
            Severity::Warning => Report::warning(),
            Severity::Note => Report::note(),
        }
        .with_code(diagnostic.code)
        .with_message(&diagnostic.message)
        .with_notes(diagnostic.notes.clone());

        if term::emit(&mut writer, &config, &files, &report).is_err() {
            eprintln!("{}", diagnostic);
        }
    }
}
