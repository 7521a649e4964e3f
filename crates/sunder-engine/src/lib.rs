//! Sunder Engine
//!
//! Build-time placement analysis for class models. For every method the
//! engine decides whether it must run on the backend, in the front end, or
//! either, rewrites the class once per compiled target, and emits the
//! backend infrastructure for every server-bound method.
//!
//! This crate provides:
//! - The class and expression model the host compiler hands over ([`model`])
//! - Signal detection and placement classification ([`analysis`])
//! - Dual-target rewriting with RPC stubs ([`rewrite`])
//! - The per-pass endpoint registry ([`registry`])
//! - Shell, router, deployment descriptor and API manifest emission ([`emit`])
//!
//! # Usage
//!
//! ```ignore
//! use sunder_engine::{Compilation, SunderConfig, Target};
//!
//! let config = SunderConfig::default();
//! let mut pass = Compilation::new(Target::Server, &config);
//! pass.configure();
//! for class in classes {
//!     let fields = pass.build_class(class)?;
//!     // hand `fields` back to the host compiler
//! }
//! let output = pass.finish(Some(&compiled_program))?;
//! if let Some(artifacts) = output.artifacts {
//!     artifacts.write_to(&config.emit.out_dir, &config.emit.program_file)?;
//! }
//! ```

pub mod analysis;
pub mod compilation;
pub mod config;
pub mod diagnostic;
pub mod emit;
pub mod error;
pub mod model;
pub mod printer;
pub mod registry;
pub mod rewrite;

pub use analysis::{analyze_method, classify, MethodAnalysis, Placement, SignalSet};
pub use compilation::{compile, Compilation, CompilationOutput, CompiledProgram};
pub use config::{SignalVocabulary, SunderConfig};
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use emit::{Artifacts, Emitter, Naming};
pub use error::{SunderError, SunderResult};
pub use model::{ClassModel, Expression, FieldModel, Method, Parameter, Variable};
pub use printer::PrettyPrint;
pub use registry::{Endpoint, EndpointRegistry};
pub use rewrite::{rewrite, Target};
