//! Mock reader implementation for testing and development.
//!
//! This module provides a simulated reader pad that can be controlled
//! programmatically without requiring physical hardware.

pub mod reader;

// Re-export commonly used types
pub use reader::{MockOperation, MockReader, MockReaderHandle, MockReaderStats, MockTag};
