//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: logging macros; browser console on wasm, `tracing` elsewhere
//! - **platform**: browser engine detection from the user-agent
//! - **serialization**: lenient deserializers for server-rendered configuration

pub mod console_macros;
pub mod platform;
pub mod serialization;

pub use platform::*;
pub use serialization::*;
