/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

mod macros;
mod parsers;
pub mod account;
pub mod canvas;
pub mod canvas_object;
pub mod course;
pub mod enrollment_term;
pub mod errors;
pub mod paginated_list;
pub mod params;
pub mod properties;
pub mod requester;
pub mod section;
pub mod user;

pub use account::*;
pub use canvas::*;
pub use canvas_object::*;
pub use course::*;
pub use enrollment_term::*;
pub use errors::*;
pub use paginated_list::*;
pub use params::*;
pub use properties::*;
pub use requester::*;
pub use section::*;
pub use user::*;
