mod error;
mod format;
mod serde;

pub use self::serde::*;
pub use error::*;
pub use format::*;
