//! nsclean Engine
//!
//! Runs a per-channel noise suppressor across a canonical PCM buffer:
//! - **Geometry:** frame size and frame count from the sample rate
//! - **Lifecycle:** all-or-nothing creation of one suppressor state per channel
//! - **Orchestrator:** deinterleave, analyze, process, and reinterleave each frame
//! - **Backends:** the stationary suppressor and a pass-through
//! - **Pipeline:** decode, process, and write one file
//!
//! Everything except `pipeline` is pure computation over in-memory buffers.

pub mod backend;
pub mod geometry;
pub mod lifecycle;
pub mod orchestrator;
pub mod passthrough;
pub mod pipeline;
pub mod stationary;

pub use backend::{BackendKind, ChannelSuppressor, SuppressorBackend};
pub use geometry::FrameGeometry;
pub use lifecycle::ChannelStates;
pub use orchestrator::{process, ProcessReport};
pub use pipeline::{denoise_file, DenoiseOptions, DenoiseReport};
