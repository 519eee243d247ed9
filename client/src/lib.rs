//! Conversation view model for the support chat widget.
//!
//! The crate is UI-agnostic: a front end renders [`state::conversation::Conversation`]
//! and forwards clicks and key presses to it. Network and link-opening side
//! effects go through the [`net::ChatTransport`] and
//! [`state::conversation::LinkOpener`] seams.

pub mod net;
pub mod state;
