//! Loose JSON value semantics inherited from webhook senders: truthiness and string coercion.

// self
use crate::_prelude::*;

/// Returns `false` for `null`, `false`, `0` and `""`; every other value is truthy.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => !text.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// Coerces an optional value with `(value || "").toString()` semantics.
pub fn coerce_text(value: Option<&Value>) -> String {
	match value {
		Some(value) if is_truthy(value) => to_display_string(value),
		_ => String::new(),
	}
}

fn to_display_string(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::Bool(flag) => flag.to_string(),
		Value::Number(number) => format_number(number),
		Value::String(text) => text.clone(),
		Value::Array(items) => items
			.iter()
			.map(|item| match item {
				Value::Null => String::new(),
				other => to_display_string(other),
			})
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => "[object Object]".into(),
	}
}

// Integral floats below 1e21 print in full; larger exponents carry an explicit sign.
fn format_number(number: &serde_json::Number) -> String {
	match number.as_f64() {
		Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e21 =>
			format!("{float:.0}"),
		Some(_) if number.is_f64() => {
			let text = number.to_string();

			match text.split_once('e') {
				Some((mantissa, exponent)) if !exponent.starts_with('-') =>
					format!("{mantissa}e+{exponent}"),
				_ => text,
			}
		},
		_ => number.to_string(),
	}
}
