//! Callable lookup by (module, function) name

use crate::error::ScriptError;
use crate::trace::ScriptTrace;
use rquickjs::{Ctx, Function, Module, Object, Value};

/// An owned reference to a script function.
///
/// Dropping it releases the runtime's reference.
pub struct Callable<'js> {
    module: String,
    name: String,
    function: Function<'js>,
}

impl<'js> Callable<'js> {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self) -> &Function<'js> {
        &self.function
    }
}

/// Import `module` from the search path and fetch its `name` export.
pub fn resolve_callable<'js>(
    ctx: &Ctx<'js>,
    module: &str,
    name: &str,
) -> Result<Callable<'js>, ScriptError> {
    let namespace = import_module(ctx, module)?;

    let not_found = || ScriptError::AttributeNotFound {
        module: module.to_string(),
        name: name.to_string(),
    };
    if name.is_empty() || !namespace.contains_key(name).map_err(|_| not_found())? {
        return Err(not_found());
    }

    let value: Value<'js> = namespace.get(name).map_err(|_| not_found())?;
    let Some(function) = value.as_function().cloned() else {
        return Err(ScriptError::NotCallable {
            module: module.to_string(),
            name: name.to_string(),
            found: format!("{:?}", value.type_of()),
        });
    };

    tracing::debug!("resolved {}.{}", module, name);
    Ok(Callable {
        module: module.to_string(),
        name: name.to_string(),
        function,
    })
}

/// Load and evaluate a module, returning its namespace object.
fn import_module<'js>(ctx: &Ctx<'js>, module: &str) -> Result<Object<'js>, ScriptError> {
    let not_found = |trace| ScriptError::ModuleNotFound {
        module: module.to_string(),
        trace,
    };
    if module.is_empty() {
        return Err(not_found(None));
    }
    let specifier = serde_json::to_string(module).map_err(|_| not_found(None))?;

    // The import runs from inside a declared module so the resolver always
    // sees a real base name. Importing straight from the host does not.
    let source = format!("import * as ns from {};\nexport {{ ns }};\n", specifier);
    let bootstrap = format!("<import {}>", module);

    // A throwing module rejects the evaluation promise the same way a
    // missing one does.
    Module::declare(ctx.clone(), bootstrap, source)
        .and_then(|declared| declared.eval())
        .and_then(|(evaluated, promise)| {
            promise.finish::<()>()?;
            evaluated.namespace()
        })
        .and_then(|namespace| namespace.get::<_, Object<'js>>("ns"))
        .map_err(|err| not_found(Some(ScriptTrace::capture(ctx, err))))
}
