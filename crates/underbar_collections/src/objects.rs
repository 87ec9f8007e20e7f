//! Merging keys from source mappings into a target mapping.

use underbar_foundation::{Error, ErrorContext, LtMap, Result, Type, Value};

use crate::source::{Key, each};

fn expect_map<'a>(
    value: &'a mut Value,
    operation: &'static str,
) -> Result<&'a mut LtMap<Value, Value>> {
    let actual = value.value_type();
    match value {
        Value::Map(entries) => Ok(entries),
        _ => Err(Error::type_mismatch(Type::Map, actual)
            .with_context(ErrorContext::new().with_operation(operation).with_argument(0))),
    }
}

fn merge<'a>(
    target: &'a mut Value,
    sources: &[Value],
    operation: &'static str,
    overwrite: bool,
) -> Result<&'a Value> {
    let entries = expect_map(target, operation)?;
    for (position, source) in sources.iter().enumerate() {
        if !matches!(source, Value::Map(_)) {
            return Err(Error::type_mismatch(Type::Map, source.value_type()).with_context(
                ErrorContext::new()
                    .with_operation(operation)
                    .with_argument(position + 1),
            ));
        }
        each(source, |value, key, _| {
            let Key::Name(name) = key else { return };
            let present = entries.get(name).is_some_and(|current| !current.is_undefined());
            if overwrite || !present {
                *entries = entries.insert(name.clone(), value.clone());
            }
        })?;
    }
    Ok(&*target)
}

/// Copies every entry of every source onto `target`, later sources winning,
/// and returns the updated target.
///
/// # Errors
///
/// Returns a type mismatch if the target or any source is not a mapping.
pub fn extend<'a>(target: &'a mut Value, sources: &[Value]) -> Result<&'a Value> {
    merge(target, sources, "extend", true)
}

/// Copies entries from the sources onto `target` only where the target has
/// no value (or `undefined`) for the key, and returns the updated target.
///
/// # Errors
///
/// Returns a type mismatch if the target or any source is not a mapping.
pub fn defaults<'a>(target: &'a mut Value, sources: &[Value]) -> Result<&'a Value> {
    merge(target, sources, "defaults", false)
}
