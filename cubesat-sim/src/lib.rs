//! Headless driver for the CubeSat swarm: settings loading, the tick loop and
//! the frame stream handed to whatever draws the simulation.

pub mod report;
pub mod runner;
pub mod settings;
pub mod sink;

pub use report::frame_report;
pub use runner::{RunSummary, Runner};
pub use settings::{load_settings, to_config, Overrides};
pub use sink::{FrameSink, JsonLinesSink, MemorySink};
