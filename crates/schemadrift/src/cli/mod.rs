//! CLI module for Schemadrift.
//!
//! Three standalone commands drive the engine:
//! - `check`: the full reconciliation (offline or against a store export)
//! - `extract`: declared schema dump only
//! - `sample`: observed store schema dump only

pub mod check;
pub mod error;
pub mod extract;
pub mod output;
pub mod sample;

use std::process::ExitCode;

/// Outcome of a completed command, mapped to the process exit status.
///
/// Drift findings never fail a run; the one non-success outcome is a scan
/// that produced no declarations to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Completed, but there was nothing to compare against
    NoDeclarations,
}

impl CommandStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::NoDeclarations => ExitCode::FAILURE,
        }
    }
}
