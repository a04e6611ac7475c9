//! Error type shared by the simulation library

/// Errors surfaced by the simulation library
///
/// Episode outcomes (walls, collisions, timeouts) are not errors; they are
/// reported through [`crate::game::DeathCause`].
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A policy was asked for a move before it was shown any observation.
    #[error("policy `{policy}` asked to decide before any observation was seen")]
    NoObservation {
        /// Name of the policy that was queried.
        policy: String,
    },

    /// The game configuration is unusable.
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    /// `step` was called before `reset`.
    #[error("episode stepped before reset")]
    NotStarted,

    /// An agent/team name did not match any known policy.
    #[error("unknown agent type `{0}`")]
    UnknownAgent(String),

    #[error("failed to read configuration: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SimError>;
