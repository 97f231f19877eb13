// agentkit - AI agent artifact installer
// Discovers skills, rules, commands and agents in a source repository and
// links or copies them into one or more target projects.

pub mod cli;
pub mod install;
pub mod models;
pub mod parser;
pub mod scanner;
pub mod source;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use install::{ExistenceMatrix, Mode};
pub use models::{Artifact, ArtifactKind, Config, InstallSummary, LinkMethod, Target};
pub use source::{ResolvedSource, SourceError};
