//! Support chat backend: answers questions about a fixed reference document
//! by forwarding the conversation to a chat-completion provider.

pub mod config;
pub mod document;
pub mod llm;
pub mod routes;
pub mod services;
pub mod state;
