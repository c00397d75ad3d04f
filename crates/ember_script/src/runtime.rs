//! Script runtime management
//!
//! Owns the embedded QuickJS runtime and the context scripts run in. Having a
//! `ScriptRuntime` means initialization succeeded, so every later stage takes
//! a context borrowed from one instead of checking a global flag.

use crate::error::ScriptError;
use crate::settings::Settings;
use rquickjs::convert::Coerced;
use rquickjs::loader::{FileResolver, ScriptLoader};
use rquickjs::{Context, Ctx, Function, Runtime};
use std::path::Path;

/// Script execution context
pub struct ScriptRuntime {
    runtime: Runtime,
    context: Context,
    search_paths: Vec<String>,
}

impl ScriptRuntime {
    /// Bring up the runtime and add `settings.search_path` to the module
    /// search path.
    pub fn initialize(settings: &Settings) -> Result<Self, ScriptError> {
        let runtime = Runtime::new().map_err(|err| ScriptError::Init {
            reason: err.to_string(),
        })?;
        if let Some(limit) = settings.memory_limit {
            runtime.set_memory_limit(limit);
        }

        let context = Context::full(&runtime).map_err(|err| ScriptError::Init {
            reason: err.to_string(),
        })?;

        // QuickJS has no console; give scripts a way to write a line.
        context
            .with(|ctx| {
                let print_fn = Function::new(ctx.clone(), |msg: Coerced<String>| {
                    println!("{}", msg.0);
                })?;
                ctx.globals().set("print", print_fn)?;
                Ok::<_, rquickjs::Error>(())
            })
            .map_err(|err| ScriptError::Init {
                reason: err.to_string(),
            })?;

        let mut script_runtime = Self {
            runtime,
            context,
            search_paths: Vec::new(),
        };
        script_runtime.extend_search_path(&settings.search_path)?;

        tracing::info!(
            "script runtime initialized (search path: {})",
            script_runtime.search_paths.join(", ")
        );
        Ok(script_runtime)
    }

    /// Add a directory to the module search path. Adding a path twice is a
    /// no-op.
    ///
    /// Paths are resolved against the working directory at import time, so
    /// only relative paths are accepted.
    pub fn extend_search_path(&mut self, path: &str) -> Result<(), ScriptError> {
        if path.trim().is_empty() {
            return Err(ScriptError::PathConfig {
                path: path.to_string(),
                reason: "path is empty",
            });
        }
        if Path::new(path).is_absolute() {
            return Err(ScriptError::PathConfig {
                path: path.to_string(),
                reason: "search paths must be relative to the working directory",
            });
        }
        if self.search_paths.iter().any(|known| known == path) {
            return Ok(());
        }

        self.search_paths.push(path.to_string());

        // The loader is replaced wholesale, so install every known path again.
        let resolver = self
            .search_paths
            .iter()
            .fold(FileResolver::default(), |resolver, dir| {
                resolver.with_path(dir.as_str())
            });
        self.runtime.set_loader(resolver, ScriptLoader::default());

        tracing::debug!("module search path extended with {}", path);
        Ok(())
    }

    pub fn search_paths(&self) -> &[String] {
        &self.search_paths
    }

    /// Run `f` with the script context. All runtime handles created inside
    /// are tied to this scope.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: for<'js> FnOnce(Ctx<'js>) -> R,
    {
        self.context.with(f)
    }
}
