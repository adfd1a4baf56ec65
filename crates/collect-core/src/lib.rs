pub mod commands;
pub mod completion;
pub mod config;
pub mod constants;
pub mod error;
pub mod map;
pub mod progress;
pub mod proximity;
pub mod storage;
pub mod timer;

pub use commands::*;
pub use completion::*;
pub use config::*;
pub use error::*;
pub use map::*;
pub use progress::*;
pub use proximity::*;
pub use storage::*;
pub use timer::*;
