//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the shell (kernel-facing).
//! - `adapters`: OS specific implementations (IO, file watching, settings files).

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{event_bus, EventBus, ShellEvent, ShellEventReceiver};
