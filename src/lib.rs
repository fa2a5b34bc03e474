//! Validation and normalization layer for a ledger plugin.
//! Transfers and messages exchanged with a peer are checked against the local
//! plugin's account and ILP prefix before they reach balance tracking or the
//! network, and accepted transfers are rebuilt in a canonical shape.

pub mod types; // Canonical transfer, amount, condition and diagnostic types.
pub mod error; // The InvalidFields error raised for every contract violation.
pub mod context; // Plugin context: local account and ledger metadata.
pub mod validation; // Field assertions, validation and normalization.
pub mod api; // JSON-RPC endpoint exposing the validator.
pub mod util; // Base64url helpers.
pub mod config; // Defines and loads service configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use error::InvalidFieldsError;
pub use config::Config;
pub use context::{LedgerInfo, PluginContext, SharedContext, StaticContext};
pub use validation::Validator;
