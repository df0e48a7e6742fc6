/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::CanvasError;
use crate::v1::requester::Requester;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A typed object built from a Canvas JSON response.
///
/// Implementors keep a handle to the [`Requester`] that produced them so follow up
/// calls (listing a course's sections, editing a user, ...) go through the same client.
pub trait CanvasObject: DeserializeOwned + Clone {
    /// Name used in parameter errors
    const TYPE_NAME: &'static str;

    /// Whether the literal `"self"` is accepted in place of an id
    const ALLOWS_SELF: bool = false;

    fn attach(&mut self, requester: Requester);
}

/// Builds `T` from a JSON object and attaches the requester
pub fn from_attributes<T: CanvasObject>(
    requester: &Requester,
    attributes: Value,
) -> Result<T, CanvasError> {
    let mut obj: T = serde_json::from_value(attributes)?;
    obj.attach(requester.clone());
    Ok(obj)
}
