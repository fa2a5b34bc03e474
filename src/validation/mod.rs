//! Transfer and Message Validation Module
//!
//! This module rejects malformed or ambiguous transfers, messages and
//! fulfillments before they reach balance tracking or the network, and
//! normalizes accepted transfers into their canonical shape.
//! Every failure is reported as an `InvalidFieldsError`.

mod assertions;
mod validator;


pub use validator::Validator;
