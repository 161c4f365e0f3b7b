use synacor_core::error::MachineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdventureError {
    /// The hosted program exited cleanly while more output was expected
    /// (e.g. a command ended the game). Callers treat this as "that move is
    /// not available", not as a failure.
    #[error("program halted")]
    Halted,

    /// A required block (room header, exits) was missing from the program's
    /// output.
    #[error("couldn't find {what} in {output:?}")]
    Parse { what: &'static str, output: String },

    /// The search frontier emptied without reaching the goal.
    #[error("no path to the goal room")]
    NotFound,

    /// Fatal machine error underneath the adapter.
    #[error(transparent)]
    Machine(#[from] MachineError),
}
