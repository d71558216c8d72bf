//! Core types for Memoh.

pub mod memory;
pub mod message;
pub mod platform;
pub mod schedule;
pub mod stream;

pub use memory::*;
pub use message::*;
pub use platform::*;
pub use schedule::*;
pub use stream::*;
