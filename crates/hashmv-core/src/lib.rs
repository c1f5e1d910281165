pub mod config;
pub mod logging;

pub mod content_name;
pub mod error;
pub mod invocation;
pub mod mover;
pub mod size_gate;

pub use error::HashmvError;
pub use invocation::{Invocation, Outcome};
