//! Placement analysis
//!
//! - [`signals`] walks a method body and records placement signals.
//! - [`placement`] turns a signal set into a [`Placement`].
//!
//! [`analyze_method`] combines the two and reports ambiguous methods.

pub mod placement;
pub mod signals;

pub use placement::{classify, Placement};
pub use signals::{walk, SignalSet};

use crate::config::SignalVocabulary;
use crate::diagnostic::{codes, Diagnostic};
use crate::model::Method;

/// Analysis result for one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodAnalysis {
    pub signals: SignalSet,
    pub placement: Placement,
}

impl MethodAnalysis {
    /// Warning for a method carrying both server and client signals, which
    /// is resolved to [`Placement::ServerBound`].
    pub fn ambiguity(&self, class_name: &str, method: &Method) -> Option<Diagnostic> {
        if !self.signals.is_ambiguous() {
            return None;
        }
        Some(
            Diagnostic::warning(
                codes::AMBIGUOUS_PLACEMENT,
                format!(
                    "{}.{} mixes server and client signals; placing it on the server",
                    class_name, method.name
                ),
            )
            .with_note(format!("signals: {}", self.signals.describe().join(", ")))
            .with_note("move the client-only code into a separate method"),
        )
    }
}

/// Walk and classify a method body.
pub fn analyze_method(method: &Method, vocab: &SignalVocabulary) -> MethodAnalysis {
    let signals = walk(method.body.as_ref(), vocab);
    MethodAnalysis {
        signals,
        placement: classify(&signals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expression, Parameter};

    fn analyze(body: Expression) -> MethodAnalysis {
        let method = Method::new("m", vec![Parameter::new("x")], Some(body));
        analyze_method(&method, &SignalVocabulary::default())
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let method = Method::new(
            "save",
            vec![],
            Some(Expression::call(Expression::ident("remote"), vec![])),
        );
        let vocab = SignalVocabulary::default();
        let first = analyze_method(&method, &vocab);
        let second = analyze_method(&method, &vocab);
        assert_eq!(first, second);
        assert_eq!(first.placement, Placement::ServerBound);
    }

    #[test]
    fn test_ambiguity_warning() {
        let analysis = analyze(Expression::block(vec![
            Expression::call(Expression::ident("remote"), vec![]),
            Expression::path("js.Browser.window"),
        ]));
        assert_eq!(analysis.placement, Placement::ServerBound);

        let method = Method::new("sync", vec![], None);
        let diag = analysis.ambiguity("Todo", &method).expect("warning expected");
        assert_eq!(diag.code, codes::AMBIGUOUS_PLACEMENT);
        assert!(diag.message.contains("Todo.sync"));
    }

    #[test]
    fn test_no_warning_for_clean_method() {
        let analysis = analyze(Expression::ident("x"));
        let method = Method::new("m", vec![], None);
        assert_eq!(analysis.placement, Placement::Portable);
        assert!(analysis.ambiguity("Todo", &method).is_none());
    }
}
