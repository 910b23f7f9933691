//! rusty-comments/crates/rc-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Comments.

pub mod error;
pub mod models;
pub mod subscription;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use subscription::*;
pub use traits::*;
