pub mod assistant;
pub mod client;
pub mod contracts;
pub mod dispatch;

pub use assistant::*;
pub use client::*;
pub use contracts::*;
pub use dispatch::*;
