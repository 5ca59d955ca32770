mod core;
mod model;

pub use self::core::*;
pub use self::model::Action;
