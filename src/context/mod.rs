//! Plugin Context Module
//!
//! The validator learns who "we" are from a plugin context: the local account
//! identifier and the ledger metadata (most importantly the ILP prefix).
//! Contexts are consulted on every call so a context that changes at runtime
//! is always observed fresh.

mod plugin;
pub use plugin::{LedgerInfo, PluginContext, SharedContext, StaticContext};
