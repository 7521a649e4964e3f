//! Placement classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::signals::SignalSet;

/// Where a method's logic must execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Must run in the backend; the client gets an RPC stub.
    ServerBound,
    /// Depends on the front-end runtime; omitted from the backend.
    ClientAnchored,
    /// Runs anywhere; kept verbatim in both outputs.
    Portable,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::ServerBound => "server-bound",
            Placement::ClientAnchored => "client-anchored",
            Placement::Portable => "portable",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a signal set. Server signals win over client signals; callers
/// report the overlap through [`SignalSet::is_ambiguous`].
pub fn classify(signals: &SignalSet) -> Placement {
    if signals.wants_server() {
        Placement::ServerBound
    } else if signals.wants_client() {
        Placement::ClientAnchored
    } else {
        Placement::Portable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signals_is_portable() {
        assert_eq!(classify(&SignalSet::default()), Placement::Portable);
    }

    #[test]
    fn test_server_signals() {
        let remote = SignalSet {
            has_server_call: true,
            ..Default::default()
        };
        let forced = SignalSet {
            has_forced_server_call: true,
            ..Default::default()
        };
        assert_eq!(classify(&remote), Placement::ServerBound);
        assert_eq!(classify(&forced), Placement::ServerBound);
    }

    #[test]
    fn test_client_signals() {
        let anchor = SignalSet {
            has_host_anchor_ref: true,
            ..Default::default()
        };
        let forced = SignalSet {
            has_forced_client_call: true,
            ..Default::default()
        };
        assert_eq!(classify(&anchor), Placement::ClientAnchored);
        assert_eq!(classify(&forced), Placement::ClientAnchored);
    }

    #[test]
    fn test_server_wins_over_client() {
        let mixed = SignalSet {
            has_server_call: true,
            has_host_anchor_ref: true,
            ..Default::default()
        };
        assert!(mixed.is_ambiguous());
        assert_eq!(classify(&mixed), Placement::ServerBound);

        let forced_both = SignalSet {
            has_forced_server_call: true,
            has_forced_client_call: true,
            ..Default::default()
        };
        assert_eq!(classify(&forced_both), Placement::ServerBound);
    }

    #[test]
    fn test_display() {
        assert_eq!(Placement::ServerBound.to_string(), "server-bound");
        assert_eq!(Placement::Portable.to_string(), "portable");
    }
}
