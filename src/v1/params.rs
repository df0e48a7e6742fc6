/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Helpers for turning caller supplied arguments into request parameters.
//!
//! Canvas expects nested values to be sent using the Rails bracket convention,
//! e.g. `course[name]=Intro` or `enrollment_type[]=teacher`. [`combine_kwargs`]
//! produces that flat list from any [`Serialize`] value, so callers can pass a
//! `serde_json::json!` literal or their own typed struct.
use crate::v1::canvas_object::CanvasObject;
use crate::v1::errors::CanvasError;
use serde::Serialize;
use serde_json::Value;

/// Flattens keyword arguments into `(key, value)` pairs using bracket notation.
///
/// ```rust
/// use canvas_lms::v1::combine_kwargs;
/// use serde_json::json;
///
/// let params = combine_kwargs(json!({
///     "course": {"name": "Intro", "term_id": 4},
///     "include": ["term", "teachers"],
///     "offer": true,
/// })).unwrap();
/// assert_eq!(params, vec![
///     ("course[name]".to_string(), "Intro".to_string()),
///     ("course[term_id]".to_string(), "4".to_string()),
///     ("include[]".to_string(), "term".to_string()),
///     ("include[]".to_string(), "teachers".to_string()),
///     ("offer".to_string(), "true".to_string()),
/// ]);
/// ```
///
/// `()` or `None` yields no parameters. `null` members are dropped.
pub fn combine_kwargs<S: Serialize>(kwargs: S) -> Result<Vec<(String, String)>, CanvasError> {
    let kwargs = match serde_json::to_value(kwargs)? {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(CanvasError::InvalidParameter(format!(
                "keyword arguments must be an object, got {}",
                other
            )));
        }
    };

    let mut combined = Vec::new();
    for (kw, arg) in kwargs {
        match arg {
            Value::Object(map) => {
                for (k, v) in map {
                    for (key, value) in flatten_kwarg(&k, v) {
                        combined.push((format!("{}{}", kw, key), value));
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    for (key, value) in flatten_kwarg("", item) {
                        combined.push((format!("{}{}", kw, key), value));
                    }
                }
            }
            Value::Null => (),
            scalar => combined.push((kw, scalar_to_string(scalar))),
        }
    }
    Ok(combined)
}

// Objects wrap the key in brackets, arrays append empty brackets
fn flatten_kwarg(key: &str, obj: Value) -> Vec<(String, String)> {
    match obj {
        Value::Object(map) => {
            let mut flattened = Vec::new();
            for (k, v) in map {
                for (sub_key, value) in flatten_kwarg(&k, v) {
                    flattened.push((format!("[{}]{}", key, sub_key), value));
                }
            }
            flattened
        }
        Value::Array(items) => {
            let nested_key = format!("{}][", key);
            items
                .into_iter()
                .flat_map(|item| flatten_kwarg(&nested_key, item))
                .collect()
        }
        Value::Null => Vec::new(),
        scalar => vec![(format!("[{}]", key), scalar_to_string(scalar))],
    }
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// A parameter that identifies a `T`: either a numeric id, a string holding one,
/// or the object itself.
pub trait IdParam<T> {
    fn resolve_id(&self, param_name: &str) -> Result<String, CanvasError>;
}

fn invalid_id<T: CanvasObject>(param_name: &str) -> CanvasError {
    CanvasError::InvalidParameter(format!(
        "Parameter {} must be of type {} or int.",
        param_name,
        T::TYPE_NAME
    ))
}

macro_rules! int_id_param {
    ( $($t:ty),* ) => {
        $(
            impl<T: CanvasObject> IdParam<T> for $t {
                fn resolve_id(&self, _param_name: &str) -> Result<String, CanvasError> {
                    Ok(self.to_string())
                }
            }
        )*
    };
}

int_id_param!(i32, i64, u32, u64, usize);

impl<T: CanvasObject> IdParam<T> for &str {
    fn resolve_id(&self, param_name: &str) -> Result<String, CanvasError> {
        let trimmed = self.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return Ok(id.to_string());
        }
        // Users may be addressed as the authenticated user
        if T::ALLOWS_SELF && trimmed == "self" {
            return Ok("self".to_string());
        }
        Err(invalid_id::<T>(param_name))
    }
}

impl<T: CanvasObject> IdParam<T> for String {
    fn resolve_id(&self, param_name: &str) -> Result<String, CanvasError> {
        <&str as IdParam<T>>::resolve_id(&self.as_str(), param_name)
    }
}

impl<T: CanvasObject> IdParam<T> for &String {
    fn resolve_id(&self, param_name: &str) -> Result<String, CanvasError> {
        <&str as IdParam<T>>::resolve_id(&self.as_str(), param_name)
    }
}

/// Resolves an object-or-id parameter to the id used in endpoint paths
pub fn obj_or_id<T: CanvasObject, P: IdParam<T>>(
    parameter: P,
    param_name: &str,
) -> Result<String, CanvasError> {
    parameter.resolve_id(param_name)
}

/// Accepts `true`, `false`, `"true"`, `"True"`, `"false"` or `"False"`
pub fn normalize_bool(value: &Value, param_name: &str) -> Result<bool, CanvasError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s == "true" || s == "True" => Ok(true),
        Value::String(s) if s == "false" || s == "False" => Ok(false),
        _ => Err(CanvasError::InvalidParameter(format!(
            "Parameter `{}` must be True, \"True\", \"true\", False, \"False\", or \"false\".",
            param_name
        ))),
    }
}
