//! Response decoding module.
//!
//! This module provides the [`ResponseFormat`] trait that turns a validated
//! response payload into the operation's output type.

mod format;

pub use format::{EmptyFormat, JsonFormat, RawFormat, ResponseFormat};
