//! Services
//!
//! Business logic: encoding, inference, result recovery and the session
//! lifecycle.

pub mod analysis_client;
pub mod encoder;
pub mod preview;
pub mod recovery;
pub mod session;

pub use analysis_client::AnalysisClient;
pub use preview::{InMemoryPreviewRegistry, PreviewRegistry};
pub use session::{AnalysisTicket, Completion, SessionController, SessionHandle};
