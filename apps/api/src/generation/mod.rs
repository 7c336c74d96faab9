pub mod gate;
pub mod handlers;
pub mod sink;

pub use gate::{GenerationGate, GenerationPhase};
pub use sink::{DocumentSink, FileSink};
