//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`canned`, `prompts`, `conversation`) so the
//! keyword table and the gallery can be tested without a transport.

pub mod canned;
pub mod conversation;
pub mod prompts;
