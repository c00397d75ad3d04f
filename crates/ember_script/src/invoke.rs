//! Invocation of a resolved callable

use crate::args::ArgumentTuple;
use crate::error::ScriptError;
use crate::resolve::Callable;
use crate::trace::ScriptTrace;
use rquickjs::Ctx;

/// Call `callable` with `args`, synchronously. The return value is discarded.
pub fn invoke<'js>(
    ctx: &Ctx<'js>,
    callable: &Callable<'js>,
    args: &ArgumentTuple<'js>,
) -> Result<(), ScriptError> {
    tracing::debug!(
        "calling {}.{} with {} argument(s)",
        callable.module(),
        callable.name(),
        args.arity()
    );

    callable
        .function()
        .call::<_, ()>(args.as_call_args())
        .map_err(|err| ScriptError::ScriptedRuntime {
            function: callable.name().to_string(),
            trace: ScriptTrace::capture(ctx, err),
        })
}
