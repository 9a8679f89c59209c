//! Hook enumeration and dispatch
//!
//! - `loader`: discovers eligible scripts in a source root
//! - `executor`: runs them for an event in precedence order

pub mod executor;
pub mod loader;

pub use executor::{DispatchOutcome, Dispatcher, DispatcherBuilder};
pub use loader::{HookLoader, HookScript};
