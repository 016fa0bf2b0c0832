//! Upload session engine: state machine, backend seam and the async driver
//! that serializes every mutation.

pub mod backend;
pub mod download;
pub mod error;
pub mod session;
pub mod synth;

pub use backend::{Backend, HttpBackend};
pub use error::{Result, SynthError};
pub use session::Session;
pub use download::download_pptx;
pub use synth::{check_health, Synth, SynthSpawnOk};
pub use slidesynth_protocol::{Event, HealthState, Op, ProcessingState, SessionView};
