pub mod config;
pub mod goal;
pub mod records;
pub mod task;

pub use config::*;
pub use goal::*;
pub use records::*;
pub use task::*;
