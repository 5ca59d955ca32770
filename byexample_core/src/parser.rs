mod context;
mod interface;
mod middleware;

pub use self::context::ErrorContext;
pub use self::interface::{ConsoleInterface, UserInterface};
pub use self::middleware::CommandLine;

#[cfg(any(test, feature = "unit_test"))]
pub use self::interface::util;
