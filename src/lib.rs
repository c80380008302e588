//! Self-contained mini-game engines.
//!
//! Every engine is a plain state value driven by three things a host
//! provides: a periodic tick, discrete [`games::Action`] inputs, and a render
//! pass that reads the engine's `view()`. Engines never draw, never block and
//! never share state; randomness comes from a seed so runs are reproducible.

pub mod config;
pub mod error;
pub mod games;
pub mod scheduler;
pub mod session;

pub use config::Config;
pub use error::ConfigError;
pub use games::{Action, Feedback, Game};
pub use session::{GameKind, Session};
