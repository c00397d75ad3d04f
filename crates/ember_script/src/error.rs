//! Error taxonomy for the embed pipeline

use crate::trace::ScriptTrace;
use thiserror::Error;

/// Top-level pipeline stage an error belongs to.
///
/// Stages are checked in order: resolve, build, invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Runtime bring-up and callable lookup
    Resolve,
    /// Argument marshaling
    Build,
    /// The call itself
    Invoke,
}

impl Stage {
    /// Process exit code reported for a failure in this stage.
    pub fn exit_code(self) -> u8 {
        match self {
            Stage::Resolve => 1,
            Stage::Build => 2,
            Stage::Invoke => 1,
        }
    }

    /// Short human-readable prefix naming the failing stage.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Resolve => "fail to load func",
            Stage::Build => "fail to build args",
            Stage::Invoke => "fail to invoke func",
        }
    }
}

/// Errors raised while embedding the runtime and calling into it.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("script runtime failed to start: {reason}")]
    Init { reason: String },

    #[error("cannot add '{path}' to the module search path: {reason}")]
    PathConfig { path: String, reason: &'static str },

    #[error("module '{module}' could not be loaded")]
    ModuleNotFound {
        module: String,
        trace: Option<ScriptTrace>,
    },

    #[error("module '{module}' has no export named '{name}'")]
    AttributeNotFound { module: String, name: String },

    #[error("'{module}.{name}' is not callable (found {found})")]
    NotCallable {
        module: String,
        name: String,
        found: String,
    },

    #[error("failed to allocate {what}")]
    Allocation {
        what: &'static str,
        trace: Option<ScriptTrace>,
    },

    #[error("failed to insert record {index} into the argument list")]
    Insertion {
        index: usize,
        trace: Option<ScriptTrace>,
    },

    #[error("'{function}' raised an error")]
    ScriptedRuntime {
        function: String,
        trace: ScriptTrace,
    },
}

impl ScriptError {
    pub fn stage(&self) -> Stage {
        match self {
            ScriptError::Init { .. }
            | ScriptError::PathConfig { .. }
            | ScriptError::ModuleNotFound { .. }
            | ScriptError::AttributeNotFound { .. }
            | ScriptError::NotCallable { .. } => Stage::Resolve,
            ScriptError::Allocation { .. } | ScriptError::Insertion { .. } => Stage::Build,
            ScriptError::ScriptedRuntime { .. } => Stage::Invoke,
        }
    }

    /// The runtime's own diagnostic for this failure, when it produced one.
    pub fn trace(&self) -> Option<&ScriptTrace> {
        match self {
            ScriptError::ModuleNotFound { trace, .. }
            | ScriptError::Allocation { trace, .. }
            | ScriptError::Insertion { trace, .. } => trace.as_ref(),
            ScriptError::ScriptedRuntime { trace, .. } => Some(trace),
            _ => None,
        }
    }
}
