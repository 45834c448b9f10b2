// Utils compartidos

pub mod constants;
pub mod storage;
pub mod format;

pub use constants::*;
pub use format::*;
