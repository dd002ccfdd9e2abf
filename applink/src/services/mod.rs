//! Infrastructure Services
//!
//! - **config**: platform table and handoff timings, deserialized from JSON
//! - **errors**: the router's error type
//! - **host**: the browser page abstraction the engine runs against
//!
//! The services are written for a single-threaded browser event loop: shared
//! state is `Rc`/`RefCell`, and nothing is required to be `Send`.

pub mod config;
pub mod errors;
pub mod host;
