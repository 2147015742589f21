//! Judge-facing shell around the decision engine.
//!
//! The binary is the composition root: it loads [`ClientConfig`] from the
//! environment, installs logging, and hands stdin/stdout to [`run`], which
//! drives the startup → decide → write → read → apply loop.

pub mod config;
pub mod logging;
pub mod protocol;
mod session;

pub use config::ClientConfig;
pub use protocol::{ProtocolError, ProtocolReader, write_action};
pub use session::run;
