//! Argument marshaling from native records into script values
//!
//! The call takes a single positional argument: a list of records, each an
//! object `{ value, opaque }` where `opaque` is a `Uint8Array` holding raw
//! bytes. The bytes are never decoded as text on the way in.

use crate::error::ScriptError;
use crate::trace::ScriptTrace;
use rquickjs::{Array, Ctx, Object, TypedArray};

/// Number of records handed to the call.
pub const RECORD_COUNT: usize = 2;

/// Native side of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub value: i32,
    pub opaque: Vec<u8>,
}

impl Record {
    /// The record synthesized for position `index`.
    pub fn synthesized(index: i32) -> Self {
        Self {
            value: index,
            opaque: format!("opaque {}", index).into_bytes(),
        }
    }

    fn to_object<'js>(&self, ctx: &Ctx<'js>) -> Result<Object<'js>, ScriptError> {
        let alloc = |what: &'static str| move |err: rquickjs::Error| ScriptError::Allocation {
            what,
            trace: Some(ScriptTrace::capture(ctx, err)),
        };

        let object = Object::new(ctx.clone()).map_err(alloc("record object"))?;
        let opaque = TypedArray::<u8>::new(ctx.clone(), self.opaque.clone())
            .map_err(alloc("opaque byte array"))?;

        object.set("value", self.value).map_err(alloc("record field 'value'"))?;
        object.set("opaque", opaque).map_err(alloc("record field 'opaque'"))?;
        Ok(object)
    }
}

/// The single-argument tuple passed to the call.
///
/// Owns the argument list; the list moves in when the tuple is built.
pub struct ArgumentTuple<'js> {
    list: Array<'js>,
}

impl<'js> ArgumentTuple<'js> {
    fn new(list: Array<'js>) -> Self {
        Self { list }
    }

    pub fn arity(&self) -> usize {
        1
    }

    pub fn list(&self) -> &Array<'js> {
        &self.list
    }

    /// Positional arguments for `Function::call`.
    pub(crate) fn as_call_args(&self) -> (Array<'js>,) {
        (self.list.clone(),)
    }
}

/// Build the argument tuple from the synthesized records.
pub fn build_arguments<'js>(ctx: &Ctx<'js>) -> Result<ArgumentTuple<'js>, ScriptError> {
    let records: Vec<Record> = (0..).take(RECORD_COUNT).map(Record::synthesized).collect();
    build_arguments_from(ctx, &records)
}

/// Build the argument tuple from explicit native records.
///
/// On failure the partially filled list is dropped here, releasing any
/// records already inserted.
pub fn build_arguments_from<'js>(
    ctx: &Ctx<'js>,
    records: &[Record],
) -> Result<ArgumentTuple<'js>, ScriptError> {
    let list = Array::new(ctx.clone()).map_err(|err| ScriptError::Allocation {
        what: "argument list",
        trace: Some(ScriptTrace::capture(ctx, err)),
    })?;

    for (index, record) in records.iter().enumerate() {
        let object = record.to_object(ctx)?;
        insert(ctx, &list, index, object)?;
    }

    tracing::debug!("built argument list with {} records", records.len());
    Ok(ArgumentTuple::new(list))
}

/// Place `record` at `index`. Takes ownership of `record` whatever the
/// outcome.
fn insert<'js>(
    ctx: &Ctx<'js>,
    list: &Array<'js>,
    index: usize,
    record: Object<'js>,
) -> Result<(), ScriptError> {
    list.set(index, record).map_err(|err| ScriptError::Insertion {
        index,
        trace: Some(ScriptTrace::capture(ctx, err)),
    })
}
