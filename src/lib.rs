//! msm - Missed-call Smart Messenger
//!
//! msm watches call-state changes and, when an inbound call rings and nobody
//! answers it, opens a WhatsApp conversation with the caller pre-filled with a
//! canned message (or posts a notification offering to).
//!
//! ## Pieces
//!
//! 1. **Tracker** ([`tracker`]): a small state machine fed with
//!    ringing / answered / idle events that yields one [`MissedCallAction`]
//!    per unanswered call.
//!
//! 2. **Sources** ([`source`]): where events come from. A channel for
//!    platform callbacks, or newline-delimited input for scripts and pipes.
//!
//! 3. **Dispatch** ([`dispatch`]): number normalization, messaging app
//!    selection and deep links, delivered through a host [`dispatch::Platform`].

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod service;
pub mod source;
pub mod tracker;

pub use domain::*;
