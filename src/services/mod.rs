//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the provider interaction so route handlers can stay
//! focused on HTTP translation.

pub mod completion;
