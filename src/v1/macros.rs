/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Issues the request and wraps the JSON object in the requested type
macro_rules! obj_from_request {
    ( $r:expr, $method:expr, $endpoint:expr, $params:expr, $rt:ty) => {{
        let requester = $r;
        let resp = requester.request($method, $endpoint, $params).await?;
        crate::v1::canvas_object::from_attributes::<$rt>(requester, resp.json()?)
    }};
}

// CanvasObject plumbing for a type with a `requester: Option<Requester>` field
macro_rules! impl_canvas_object {
    ( $t:ty, $name:expr ) => {
        impl_canvas_object!($t, $name, false);
    };
    ( $t:ty, $name:expr, $allows_self:expr ) => {
        impl crate::v1::canvas_object::CanvasObject for $t {
            const TYPE_NAME: &'static str = $name;
            const ALLOWS_SELF: bool = $allows_self;

            fn attach(&mut self, requester: crate::v1::requester::Requester) {
                self.requester = Some(requester);
            }
        }

        impl $t {
            #[allow(dead_code)]
            pub(crate) fn requester(
                &self,
            ) -> Result<&crate::v1::requester::Requester, crate::v1::errors::CanvasError> {
                self.requester
                    .as_ref()
                    .ok_or(crate::v1::errors::CanvasError::RequesterNotFound())
            }
        }

        // Lets the object stand in wherever its id is expected
        impl crate::v1::params::IdParam<$t> for &$t {
            fn resolve_id(
                &self,
                _param_name: &str,
            ) -> Result<String, crate::v1::errors::CanvasError> {
                Ok(self.id.to_string())
            }
        }

        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }
        impl Eq for $t {}

        impl std::hash::Hash for $t {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&self.id, state);
            }
        }
    };
}

pub(crate) use {impl_canvas_object, obj_from_request};
