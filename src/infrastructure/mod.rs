pub mod format;
pub mod hooks;
pub mod logger;
pub mod markings;

pub use format::*;
pub use hooks::*;
pub use logger::*;
pub use markings::*;
