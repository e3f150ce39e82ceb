pub mod frames;
pub mod overlap_add;
pub mod params;
pub mod phase_vocoder;

pub use frames::{frame, FrameMatrix};
pub use overlap_add::reconstruct;
pub use params::AlgorithmParams;
pub use phase_vocoder::{stretch_frames, PhaseVocoder};
