//! # jury-session
//!
//! The jury scoring workflow: one [`ScoringSession`] per authenticated juror,
//! holding the ordered contestant list, the cursor, the voted-set, and the
//! draft being edited.
//!
//! The managed backend is reached only through the [`ports`] traits. Raw rows
//! are parsed into typed entities in [`rows`] before they reach the session.
//!
//! ```text
//! JuryAuthenticator ─┐
//! ContestantSource ──┼─► JuryService::open_session ─► ScoringSession ─► VoteWriter
//! VoteSource ────────┘                                     │
//!                                                          └─► watch::Receiver<SessionSnapshot>
//! ```

pub mod controller;
pub mod error;
pub mod history;
pub mod memory;
pub mod ports;
pub mod rows;
pub mod service;
pub mod state;

pub use controller::{ScoringSession, SessionSnapshot, SubmitReceipt, SubmitTicket};
pub use error::{SessionError, StoreError};
pub use memory::MemoryBackend;
pub use ports::{ContestantSource, VoteSource, VoteWriter};
pub use service::{JuryService, OpenedSession};
pub use state::SessionState;
