pub mod artifact;
pub mod config;
pub mod summary;
pub mod target;

pub use artifact::{Agent, Artifact, ArtifactKind, Command, Metadata, Rule, Skill};
pub use config::{Config, ConfigError, LinkMethod};
pub use summary::InstallSummary;
pub use target::{Target, TargetConfig, DEFAULT_TARGET};
