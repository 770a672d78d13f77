pub mod io;
pub mod pitch;

pub use io::{is_supported_input, AudioDecoder, DecodedAudio, ScratchWav};
pub use pitch::{PitchDetector, SpectralPitchDetector};
