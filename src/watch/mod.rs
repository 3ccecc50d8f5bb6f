// src/watch/mod.rs

//! File watching and the watch-mode engine.
//!
//! - [`patterns`] compiles the `[watch]` globs and options into a
//!   [`WatchSpec`].
//! - [`watcher`] wires up a cross-platform filesystem watcher (`notify`) and
//!   turns raw events into engine events with root-relative paths.
//! - [`engine`] is the Idle/Debouncing/Running state machine that coalesces
//!   change bursts and drives pipeline runs.
//!
//! The watcher does not know about tasks or aliases; it only reports path
//! changes. All reaction policy lives in the engine.

pub mod engine;
pub mod patterns;
pub mod watcher;

pub use engine::{ChangeKind, EngineEvent, WatchEngine};
pub use patterns::WatchSpec;
pub use watcher::{spawn_watcher, WatcherHandle};
