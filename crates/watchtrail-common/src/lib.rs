//! Watchtrail-Common: Shared types, identifiers, and errors.
//!
//! This crate provides the vocabulary used across watchtrail:
//!
//! - **Watch segments**: validated `[start, end]` intervals of viewed footage
//! - **Documents**: the unit persisted to the remote history store
//! - **Typed IDs**: opaque document identifiers
//! - **Error Handling**: common error type and result alias
//!
//! # Examples
//!
//! ```
//! use watchtrail_common::{Error, Result, WatchSegment};
//!
//! let segment = WatchSegment::new(0.0, 30.0).unwrap();
//! assert_eq!(segment.duration(), 30.0);
//!
//! fn example() -> Result<WatchSegment> {
//!     WatchSegment::new(10.0, 5.0)
//! }
//! assert!(matches!(example(), Err(Error::InvalidSegment { .. })));
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
