mod fixtures;
mod helpers;

pub use fixtures::*;
pub use helpers::*;
