//! Signal detection over method bodies.
//!
//! Matching is purely syntactic: a call is identified by its trailing name
//! (`remote(..)` and `api.remote(..)` both match), never by resolving what
//! the name refers to. An unrelated function that happens to share a
//! vocabulary name is therefore reported as a signal as well.

use crate::config::SignalVocabulary;
use crate::model::visitor::{self, Visitor};
use crate::model::Expression;

/// Placement signals found in one method body.
///
/// Flags only ever go from `false` to `true` during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalSet {
    pub has_server_call: bool,
    pub has_forced_server_call: bool,
    pub has_host_anchor_ref: bool,
    pub has_forced_client_call: bool,
}

impl SignalSet {
    pub fn wants_server(&self) -> bool {
        self.has_server_call || self.has_forced_server_call
    }

    pub fn wants_client(&self) -> bool {
        self.has_host_anchor_ref || self.has_forced_client_call
    }

    /// Both server and client signals are present.
    pub fn is_ambiguous(&self) -> bool {
        self.wants_server() && self.wants_client()
    }

    /// Names of the set flags, for diagnostics.
    pub fn describe(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.has_server_call {
            out.push("remote call");
        }
        if self.has_forced_server_call {
            out.push("forced server");
        }
        if self.has_host_anchor_ref {
            out.push("host environment reference");
        }
        if self.has_forced_client_call {
            out.push("forced client");
        }
        out
    }
}

/// Collect the signals of a method body. An absent body has none.
pub fn walk(body: Option<&Expression>, vocab: &SignalVocabulary) -> SignalSet {
    let mut walker = SignalWalker {
        vocab,
        signals: SignalSet::default(),
    };
    if let Some(body) = body {
        walker.visit_expression(body);
    }
    walker.signals
}

struct SignalWalker<'a> {
    vocab: &'a SignalVocabulary,
    signals: SignalSet,
}

impl SignalWalker<'_> {
    fn check_host_anchor(&mut self, expr: &Expression) {
        if is_host_anchor(expr, self.vocab) {
            self.signals.has_host_anchor_ref = true;
        }
    }
}

impl Visitor for SignalWalker<'_> {
    fn visit_call(&mut self, callee: &Expression, args: &[Expression]) {
        if let Some(name) = call_name(callee) {
            if name == self.vocab.remote_call {
                self.signals.has_server_call = true;
            }
            if name == self.vocab.force_server {
                self.signals.has_forced_server_call = true;
            }
            if name == self.vocab.force_client {
                self.signals.has_forced_client_call = true;
            }
        }
        self.check_host_anchor(callee);

        // A member callee has been inspected above; only its base remains.
        match callee {
            Expression::Member { base, .. } => self.visit_expression(base),
            _ => self.visit_expression(callee),
        }
        for arg in args {
            self.visit_expression(arg);
        }
    }

    fn visit_member(&mut self, base: &Expression, member: &str) {
        if chain_is_anchor(base, member, self.vocab) {
            self.signals.has_host_anchor_ref = true;
        }
        visitor::walk_member(self, base);
    }
}

/// Name a call is matched by: the identifier itself, or the trailing
/// member of a member callee.
pub fn call_name(callee: &Expression) -> Option<&str> {
    match callee {
        Expression::Identifier { name } => Some(name.as_str()),
        Expression::Member { member, .. } => Some(member.as_str()),
        _ => None,
    }
}

/// Dotted chain of a member/identifier expression down to its root
/// identifier: `a.b.c` gives `["a", "b", "c"]`. `None` when the chain is
/// rooted at anything other than an identifier.
pub fn member_chain(expr: &Expression) -> Option<Vec<&str>> {
    let mut chain = Vec::new();
    let mut current = expr;
    loop {
        match current {
            Expression::Member { base, member } => {
                chain.push(member.as_str());
                current = base.as_ref();
            }
            Expression::Identifier { name } => {
                chain.push(name.as_str());
                chain.reverse();
                return Some(chain);
            }
            _ => return None,
        }
    }
}

/// Whether `expr` refers into a front-end-only host module
/// (`<host_root>.<module>...`).
pub fn is_host_anchor(expr: &Expression, vocab: &SignalVocabulary) -> bool {
    match member_chain(expr) {
        Some(chain) => anchors(&chain, vocab),
        None => false,
    }
}

fn chain_is_anchor(base: &Expression, member: &str, vocab: &SignalVocabulary) -> bool {
    match member_chain(base) {
        Some(mut chain) => {
            chain.push(member);
            anchors(&chain, vocab)
        }
        None => false,
    }
}

fn anchors(chain: &[&str], vocab: &SignalVocabulary) -> bool {
    chain.len() >= 2
        && chain[0] == vocab.host_root
        && vocab.host_modules.iter().any(|m| m == chain[1])
}
