pub mod classify;
pub mod duration;
pub mod group;
pub mod limit;
pub mod pipeline;
pub mod quantize;
pub mod render;

pub use pipeline::TranscriptionPipeline;
pub use render::{CArrayExporter, ExportFormat, JsonExporter, MelodyExporter};
