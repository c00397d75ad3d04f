//! Ember scripting bridge
//!
//! Embeds QuickJS, finds a function exported by a script module, marshals a
//! list of `{ value, opaque }` records into it and calls it.
//!
//! ## Pipeline
//!
//! `initialize → resolve → build → invoke`. Each stage fails with a
//! [`ScriptError`] whose [`Stage`] decides the process exit code. Runtime
//! objects are released by `Drop` on every path.

pub mod args;
pub mod error;
pub mod invoke;
pub mod resolve;
pub mod runtime;
pub mod settings;
pub mod trace;

pub use args::{build_arguments, build_arguments_from, ArgumentTuple, Record};
pub use error::{ScriptError, Stage};
pub use invoke::invoke;
pub use resolve::{resolve_callable, Callable};
pub use runtime::ScriptRuntime;
pub use settings::{Settings, SettingsError};
pub use trace::ScriptTrace;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the whole call path once.
pub fn run(settings: &Settings) -> Result<(), ScriptError> {
    let runtime = ScriptRuntime::initialize(settings)?;

    runtime.with(|ctx| {
        let callable = resolve_callable(&ctx, &settings.module, &settings.function)?;
        let args = build_arguments(&ctx)?;
        invoke(&ctx, &callable, &args)?;

        tracing::debug!("{}.{} returned", settings.module, settings.function);
        Ok(())
    })
}
