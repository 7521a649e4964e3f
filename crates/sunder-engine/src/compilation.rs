//! Compilation pass driver
//!
//! A [`Compilation`] models one host compiler run for one [`Target`]:
//!
//! 1. [`configure`](Compilation::configure) is the per-target hook; under
//!    the server target it registers the finalization step (once, however
//!    often it is called).
//! 2. [`build_class`](Compilation::build_class) is the per-class hook. It
//!    analyses every method, rewrites it for the target and returns the new
//!    field list in declaration order.
//! 3. [`finish`](Compilation::finish) consumes the pass. When finalization
//!    was registered it runs the [`Emitter`] over the endpoint registry.
//!
//! Classes are processed strictly one at a time; the registry is owned by
//! the pass and only reachable through `&mut self`. Dropping a
//! `Compilation` without finishing discards the registry unwritten.

use crate::analysis::{analyze_method, Placement};
use crate::config::SunderConfig;
use crate::diagnostic::{codes, Diagnostic, Diagnostics};
use crate::emit::{Artifacts, Emitter};
use crate::error::SunderResult;
use crate::model::{ClassModel, FieldModel};
use crate::registry::{qualified_name, Endpoint, EndpointRegistry};
use crate::rewrite::{rewrite, Target};

/// Result of a finished compilation pass.
#[derive(Debug)]
pub struct CompilationOutput {
    pub target: Target,
    /// Registered endpoints, in encounter order. Always empty for the
    /// client target.
    pub endpoints: Vec<Endpoint>,
    /// Emitted artifacts; `None` for the client target, when finalization
    /// was never registered, or when no endpoint was registered.
    pub artifacts: Option<Artifacts>,
    pub diagnostics: Vec<Diagnostic>,
}

/// One compilation pass for one target.
pub struct Compilation<'c> {
    target: Target,
    config: &'c SunderConfig,
    registry: EndpointRegistry,
    diagnostics: Diagnostics,
    finalize_registered: bool,
}

impl<'c> Compilation<'c> {
    pub fn new(target: Target, config: &'c SunderConfig) -> Self {
        Self {
            target,
            config,
            registry: EndpointRegistry::new(),
            diagnostics: Diagnostics::new(),
            finalize_registered: false,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Per-target configuration hook. Returns `true` only for the call that
    /// actually registered finalization.
    pub fn configure(&mut self) -> bool {
        if self.target != Target::Server || self.finalize_registered {
            return false;
        }
        log::debug!("registered artifact emission for the server target");
        self.finalize_registered = true;
        true
    }

    pub fn is_finalize_registered(&self) -> bool {
        self.finalize_registered
    }

    /// Per-class build hook: rewrite `class` for this pass's target.
    ///
    /// Malformed declarations are fatal and leave the registry untouched.
    pub fn build_class(&mut self, class: ClassModel) -> SunderResult<Vec<FieldModel>> {
        class.validate()?;
        let ClassModel { name: class_name, fields } = class;

        let mut out = Vec::with_capacity(fields.len());
        for field in fields {
            let method = match field {
                FieldModel::Method(method) => method,
                variable => {
                    out.push(variable);
                    continue;
                }
            };

            let analysis = analyze_method(&method, &self.config.signals);
            log::debug!(
                "{} {}: {}",
                self.target,
                qualified_name(&class_name, &method.name),
                analysis.placement
            );
            if let Some(warning) = analysis.ambiguity(&class_name, &method) {
                self.diagnostics.push(warning);
            }
            if self.target == Target::Server
                && analysis.placement == Placement::ServerBound
                && !method.is_constructor()
                && self.registry.contains(&class_name, &method.name)
            {
                self.diagnostics.push(Diagnostic::warning(
                    codes::DUPLICATE_ENDPOINT,
                    format!(
                        "endpoint {} registered more than once in this pass",
                        qualified_name(&class_name, &method.name)
                    ),
                ));
            }

            if let Some(rewritten) = rewrite(
                method,
                analysis.placement,
                self.target,
                &class_name,
                &mut self.registry,
                &self.config.rpc,
            ) {
                out.push(FieldModel::Method(rewritten));
            }
        }
        Ok(out)
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// End the pass. `program` is the host's compiled backend output, used
    /// for the export-scope patch.
    pub fn finish(mut self, program: Option<&str>) -> SunderResult<CompilationOutput> {
        let artifacts = if self.finalize_registered {
            Emitter::new(self.config).emit(self.registry.endpoints(), program, &mut self.diagnostics)?
        } else {
            None
        };
        Ok(CompilationOutput {
            target: self.target,
            endpoints: self.registry.into_endpoints(),
            artifacts,
            diagnostics: self.diagnostics.into_vec(),
        })
    }
}

/// A whole program compiled for one target.
#[derive(Debug)]
pub struct CompiledProgram {
    pub classes: Vec<ClassModel>,
    pub output: CompilationOutput,
}

/// Run a complete pass over `classes`: configure, build every class in
/// order, finish.
pub fn compile(
    classes: Vec<ClassModel>,
    target: Target,
    config: &SunderConfig,
    program: Option<&str>,
) -> SunderResult<CompiledProgram> {
    let mut compilation = Compilation::new(target, config);
    compilation.configure();

    let mut rewritten = Vec::with_capacity(classes.len());
    for class in classes {
        let name = class.name.clone();
        let fields = compilation.build_class(class)?;
        rewritten.push(ClassModel::new(name, fields));
    }

    Ok(CompiledProgram {
        classes: rewritten,
        output: compilation.finish(program)?,
    })
}
