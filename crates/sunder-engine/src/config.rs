//! Configuration (`sunder.toml`)
//!
//! Every key is optional; an absent file is equivalent to
//! `SunderConfig::default()`.
//!
//! ```toml
//! [signals]
//! remote_call = "remote"
//! force_server = "serverOnly"
//! force_client = "clientOnly"
//! host_root = "js"
//! host_modules = ["Browser", "html"]
//!
//! [rpc]
//! path = "/rpc"
//!
//! [deploy]
//! name = "todo-app"
//! compatibility_date = "2024-09-23"
//!
//! [emit]
//! out_dir = "dist"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SunderError, SunderResult};

/// Expression emitted by the host compiler to pick the export object of
/// the compiled program.
pub const DEFAULT_EXPORT_SCOPE_PATTERN: &str = "typeof exports != \"undefined\" ? exports : typeof window != \"undefined\" ? window : typeof self != \"undefined\" ? self : this";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunderConfig {
    pub signals: SignalVocabulary,
    pub rpc: RpcConfig,
    pub deploy: DeployConfig,
    pub emit: EmitConfig,
}

/// The fixed names the signal walker matches on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignalVocabulary {
    /// Remote-call primitive. Any call with this trailing name is server-bound.
    pub remote_call: String,
    /// Explicit marker forcing server placement.
    pub force_server: String,
    /// Explicit marker forcing client placement.
    pub force_client: String,
    /// Root identifier of the front-end host environment.
    pub host_root: String,
    /// Modules under `host_root` that only exist in a front-end runtime.
    pub host_modules: Vec<String>,
}

impl Default for SignalVocabulary {
    fn default() -> Self {
        Self {
            remote_call: "remote".to_string(),
            force_server: "serverOnly".to_string(),
            force_client: "clientOnly".to_string(),
            host_root: "js".to_string(),
            host_modules: vec!["Browser".to_string(), "html".to_string()],
        }
    }
}

/// RPC wire settings shared by the client stubs and the generated shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RpcConfig {
    pub path: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            path: "/rpc".to_string(),
        }
    }
}

/// Deployment descriptor settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeployConfig {
    /// Program name; derived from the first endpoint's class when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub compatibility_date: String,
    /// Logical name of the single shell instance the router forwards to.
    pub instance_name: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            name: None,
            compatibility_date: "2024-09-23".to_string(),
            instance_name: "singleton".to_string(),
        }
    }
}

/// Artifact output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmitConfig {
    pub out_dir: PathBuf,
    /// File name of the compiled backend program, imported by the shell.
    pub program_file: String,
    pub export_scope_pattern: String,
    pub export_scope_replacement: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("dist"),
            program_file: "server.js".to_string(),
            export_scope_pattern: DEFAULT_EXPORT_SCOPE_PATTERN.to_string(),
            export_scope_replacement: "globalThis".to_string(),
        }
    }
}

impl SunderConfig {
    /// Parse configuration from a TOML string.
    pub fn from_str(source: &str) -> SunderResult<Self> {
        let config: SunderConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> SunderResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load `sunder.toml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> SunderResult<Self> {
        let path = dir.join("sunder.toml");
        if path.is_file() {
            log::debug!("loading configuration from {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> SunderResult<()> {
        let s = &self.signals;
        for (key, value) in [
            ("signals.remote_call", &s.remote_call),
            ("signals.force_server", &s.force_server),
            ("signals.force_client", &s.force_client),
            ("signals.host_root", &s.host_root),
        ] {
            if value.is_empty() {
                return Err(SunderError::Config {
                    message: format!("{} must not be empty", key),
                });
            }
        }
        if !self.rpc.path.starts_with('/') {
            return Err(SunderError::Config {
                message: format!("rpc.path must start with '/', got '{}'", self.rpc.path),
            });
        }
        Ok(())
    }
}
