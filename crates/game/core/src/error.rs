//! Error infrastructure for kutulu-core.
//!
//! The core is an always-produce-an-action system, so its error surface is
//! narrow: unreachable searches return a sentinel, unknown entity tags are
//! skipped, and off-grid lookups clamp. What remains here are the conditions
//! the bot genuinely cannot continue from.
//!
//! Every error type implements [`GameError`] so callers can classify it
//! without matching on concrete variants.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: a grid row shorter than the announced width.
    Validation,

    /// The engine cannot proceed.
    ///
    /// Examples: a minion state id outside the known set.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all errors raised by the bot crates.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while building or updating the world model.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The server reported a minion state id outside SPAWNING..=STUNNED.
    #[error("unknown minion state id {0}")]
    UnknownMinionState(i32),

    /// The grid description does not match its announced dimensions.
    #[error("malformed grid: {reason}")]
    MalformedGrid { reason: &'static str },

    /// An entity batch arrived without the controlled agent's record.
    #[error("entity batch is missing the controlled agent")]
    MissingAgent,
}

impl GameError for CoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::UnknownMinionState(_) => ErrorSeverity::Fatal,
            CoreError::MalformedGrid { .. } | CoreError::MissingAgent => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CoreError::UnknownMinionState(_) => "CORE_UNKNOWN_MINION_STATE",
            CoreError::MalformedGrid { .. } => "CORE_MALFORMED_GRID",
            CoreError::MissingAgent => "CORE_MISSING_AGENT",
        }
    }
}
