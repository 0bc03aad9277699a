//! Event system for walkerr.
//! Analysis code reports progress through typed events instead of logging
//! inline; handlers decide what to do with them.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::WalkerrEventHandler;
pub use types::*;
