//! Core domain types for msm

mod action;
mod event;
mod phase;
mod session;

pub use action::MissedCallAction;
pub use event::CallEvent;
pub use phase::CallPhase;
pub use session::CallSession;
