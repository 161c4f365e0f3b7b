pub mod error;
pub mod machine;
pub mod trace;

pub mod prelude {
    pub use crate::error::MachineError;
    pub use crate::machine::io::{InputSource, OutputBuffer, Pipe, StdinSource};
    pub use crate::machine::snapshot::Snapshot;
    pub use crate::machine::{Halt, Machine};
    pub use crate::trace::{LogTracer, NullTracer, Tracer};
}
