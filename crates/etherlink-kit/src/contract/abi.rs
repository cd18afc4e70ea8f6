//! ABI plumbing for the dynamic contract engine.
//!
//! Callers hand the engine a JSON ABI, a function name, and loosely-typed
//! JSON arguments. This module resolves the target function, coerces each
//! argument into its Solidity type, and converts decoded return values back
//! into JSON. All failures surface as [`CallError`] with enough context to
//! point at the offending argument.

use alloy::dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt, Specifier};
use alloy::json_abi::{Function, JsonAbi};

use crate::error::CallError;

// ============================================================================
// Function Resolution
// ============================================================================

/// Look up `name` in `abi`, preferring the overload whose arity matches
/// `arg_count`.
///
/// When no overload matches the arity, the first one is returned and the
/// mismatch is reported later by [`coerce_args`] with the expected count.
pub(crate) fn resolve_function<'a>(
    abi: &'a JsonAbi,
    name: &str,
    arg_count: usize,
) -> Result<&'a Function, CallError> {
    let overloads = abi
        .function(name)
        .filter(|fns| !fns.is_empty())
        .ok_or_else(|| CallError::FunctionNotFound(name.to_string()))?;

    Ok(overloads
        .iter()
        .find(|f| f.inputs.len() == arg_count)
        .unwrap_or(&overloads[0]))
}

// ============================================================================
// Argument Coercion
// ============================================================================

/// Coerce JSON `args` into the Solidity values `func` expects.
pub(crate) fn coerce_args(
    func: &Function,
    args: &[serde_json::Value],
) -> Result<Vec<DynSolValue>, CallError> {
    let mut types = Vec::with_capacity(func.inputs.len());
    for param in &func.inputs {
        let ty: DynSolType = param.resolve().map_err(|e| CallError::AbiType {
            param: param.name.clone(),
            reason: e.to_string(),
        })?;
        types.push(ty);
    }

    if types.len() != args.len() {
        return Err(CallError::ArgumentCount {
            name: func.name.clone(),
            expected: types.len(),
            actual: args.len(),
        });
    }

    args.iter()
        .zip(types.iter())
        .enumerate()
        .map(|(index, (arg, ty))| {
            coerce_value(arg, ty).map_err(|reason| CallError::InvalidArgument {
                name: func.name.clone(),
                index,
                reason,
            })
        })
        .collect()
}

/// ABI-encode `values` as calldata for `func` (selector included).
pub(crate) fn encode_input(func: &Function, values: &[DynSolValue]) -> Result<Vec<u8>, CallError> {
    func.abi_encode_input(values)
        .map_err(|e| CallError::Encode(e.to_string()))
}

/// Coerce a single JSON value into `ty`.
///
/// Compound JSON arrays map onto Solidity arrays and tuples; everything else
/// is rendered to text and parsed by the type itself, so `"42"`, `42`, and
/// `true` all coerce naturally.
fn coerce_value(value: &serde_json::Value, ty: &DynSolType) -> Result<DynSolValue, String> {
    match (value, ty) {
        (serde_json::Value::Array(items), DynSolType::Array(inner)) => {
            let values = items
                .iter()
                .map(|item| coerce_value(item, inner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::Array(values))
        }
        (serde_json::Value::Array(items), DynSolType::FixedArray(inner, size)) => {
            if items.len() != *size {
                return Err(format!(
                    "fixed array expects {size} element(s), got {}",
                    items.len()
                ));
            }
            let values = items
                .iter()
                .map(|item| coerce_value(item, inner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::FixedArray(values))
        }
        (serde_json::Value::Array(items), DynSolType::Tuple(components)) => {
            if items.len() != components.len() {
                return Err(format!(
                    "tuple expects {} component(s), got {}",
                    components.len(),
                    items.len()
                ));
            }
            let values = items
                .iter()
                .zip(components.iter())
                .map(|(item, component)| coerce_value(item, component))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::Tuple(values))
        }
        (serde_json::Value::Array(_), other) => Err(format!("cannot coerce an array into {other}")),
        (serde_json::Value::Object(_), other) => Err(format!(
            "cannot coerce an object into {other}; pass tuple components as an array"
        )),
        (serde_json::Value::Null, other) => Err(format!("null is not a valid {other}")),
        (scalar, ty) => {
            let text = match scalar {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            ty.coerce_str(&text).map_err(|e| e.to_string())
        }
    }
}

// ============================================================================
// Return Decoding
// ============================================================================

/// Decode `data` against `func`'s outputs and render the result as JSON.
///
/// A single return value is unwrapped; multiple values become a JSON array.
pub(crate) fn decode_output(func: &Function, data: &[u8]) -> Result<serde_json::Value, CallError> {
    let values = func
        .abi_decode_output(data)
        .map_err(|e| CallError::Decode(e.to_string()))?;

    Ok(match values.as_slice() {
        [] => serde_json::Value::Null,
        [single] => value_to_json(single),
        many => serde_json::Value::Array(many.iter().map(value_to_json).collect()),
    })
}

/// Render a decoded Solidity value as JSON.
///
/// Numbers become decimal strings so that 256-bit values survive JSON
/// round-tripping; byte blobs become 0x-prefixed hex.
pub(crate) fn value_to_json(value: &DynSolValue) -> serde_json::Value {
    match value {
        DynSolValue::Address(addr) => serde_json::Value::String(addr.to_string()),
        DynSolValue::Bool(b) => serde_json::Value::Bool(*b),
        DynSolValue::Uint(n, _) => serde_json::Value::String(n.to_string()),
        DynSolValue::Int(n, _) => serde_json::Value::String(n.to_string()),
        DynSolValue::String(s) => serde_json::Value::String(s.clone()),
        DynSolValue::Bytes(bytes) => {
            serde_json::Value::String(alloy::hex::encode_prefixed(bytes))
        }
        DynSolValue::FixedBytes(word, size) => {
            serde_json::Value::String(alloy::hex::encode_prefixed(&word[..*size]))
        }
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            serde_json::Value::Array(values.iter().map(value_to_json).collect())
        }
        DynSolValue::Tuple(values) => {
            serde_json::Value::Array(values.iter().map(value_to_json).collect())
        }
        // Function pointers and custom structs have no canonical JSON form.
        other => serde_json::Value::String(format!("{other:?}")),
    }
}

// ============================================================================
// Tests
// ============================================================================
