//! API Module
//!
//! This module exposes the validator over JSON-RPC so that the receiving side
//! of a plugin can normalize transfers and messages out of process.

mod server;
pub use server::{AppState, Server, router};

#[cfg(test)]
mod tests;
