//! Install/update reconciliation
//!
//! existence matrix → selection → link-or-copy per (item, target) → summary

pub mod executor;
pub mod existence;
pub mod link;
pub mod selection;

pub use executor::{execute, ExecuteOptions, ExecutionReport, ItemEvent};
pub use existence::{ExistenceMap, ExistenceMatrix};
pub use link::{link_or_copy, LinkOptions, LinkOutcome, Linker, OsSymlinker, Symlinker};
pub use selection::{select_all, selectable, status_label};

use std::fmt;

/// Install leaves existing entries alone; update replaces them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Install,
    Update,
}

impl Mode {
    pub fn verb(&self) -> &'static str {
        match self {
            Mode::Install => "install",
            Mode::Update => "update",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}
