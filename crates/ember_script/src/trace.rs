//! Runtime diagnostics captured out of the script context
//!
//! Exceptions live inside the runtime and borrow it. A `ScriptTrace` copies
//! what we need to report into owned strings so errors can outlive the
//! context they came from.

use rquickjs::{Ctx, Value};
use std::fmt;

/// Message and stack of a script-side failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTrace {
    pub message: String,
    pub stack: Option<String>,
}

impl ScriptTrace {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    /// Turn an `rquickjs` error into a trace.
    ///
    /// `Error::Exception` only signals that something was thrown, so the
    /// pending exception is taken off the context here. That also clears it.
    pub fn capture(ctx: &Ctx<'_>, err: rquickjs::Error) -> Self {
        if matches!(err, rquickjs::Error::Exception) {
            Self::from_thrown(ctx.catch())
        } else {
            Self::from_message(err.to_string())
        }
    }

    fn from_thrown(thrown: Value<'_>) -> Self {
        if let Some(exception) = thrown.as_exception() {
            return Self {
                message: exception.message().unwrap_or_default(),
                stack: exception.stack().filter(|stack| !stack.trim().is_empty()),
            };
        }

        // `throw "text"` and friends
        if let Some(text) = thrown.as_string() {
            if let Ok(text) = text.to_string() {
                return Self::from_message(text);
            }
        }

        Self::from_message(format!("{:?}", thrown))
    }
}

impl fmt::Display for ScriptTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.message)?;
        if let Some(stack) = &self.stack {
            write!(f, "\n{}", stack.trim_end())?;
        }
        Ok(())
    }
}
