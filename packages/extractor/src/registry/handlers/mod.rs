//! Element handlers for submodel elements.

mod leaf;
mod structural;

pub use leaf::*;
pub use structural::*;
