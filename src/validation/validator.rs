use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::assertions::{
    Fields, assert_account, assert_condition, assert_condition_or_preimage, assert_number,
    assert_object, assert_prefix, assert_string, ensure, fields, is_set, optional_object,
    optional_string, show,
};
use crate::context::PluginContext;
use crate::error::InvalidFieldsError;
use crate::types::{Amount, Condition, Diagnostics, Direction, Fulfillment, Normalized, Transfer, Warning};

/// Validates and normalizes transfers and messages for one plugin
///
/// Holds no state of its own; the account and prefix are read from the
/// plugin context on every call.
#[derive(Clone)]
pub struct Validator {
    plugin: Arc<dyn PluginContext>,
}

/// What a successful transfer check learned about the object
struct CheckedTransfer<'a> {
    fields: &'a Fields,
    amount: Amount,
    execution_condition: Option<Condition>,
    direction: Direction<'a>,
    diagnostics: Diagnostics,
}

impl Validator {
    pub fn new(plugin: impl PluginContext + 'static) -> Self {
        Self {
            plugin: Arc::new(plugin),
        }
    }

    /// Validate an outgoing transfer and rebuild it in canonical form
    ///
    /// `from` and `ledger` always come from the plugin context; `to` falls
    /// back to the legacy `account` field.
    pub fn normalize_outgoing_transfer(&self, t: &Value) -> Result<Normalized<Transfer>, InvalidFieldsError> {
        let checked = self.check_outgoing_transfer(t)?;
        let to = match optional_string(checked.fields, "to")? {
            Some(to) => Some(to),
            None => optional_string(checked.fields, "account")?,
        };

        let transfer = Transfer {
            to,
            from: Some(self.plugin.account()),
            ledger: Some(self.plugin.info().prefix),
            note_to_self: optional_object(checked.fields, "noteToSelf")?,
            ..self.common_fields(checked.fields, checked.amount, checked.execution_condition)?
        };

        Ok(Normalized {
            value: transfer,
            warnings: checked.diagnostics,
        })
    }

    /// Validate an incoming transfer and rebuild it in canonical form
    ///
    /// Keeps the sender's `to`, `from` and `ledger`; `ledger` is filled in
    /// from the plugin context only when absent. `noteToSelf` is dropped.
    pub fn normalize_incoming_transfer(&self, t: &Value) -> Result<Normalized<Transfer>, InvalidFieldsError> {
        let checked = self.check_incoming_transfer(t)?;
        let ledger = match optional_string(checked.fields, "ledger")? {
            Some(ledger) => ledger,
            None => self.plugin.info().prefix,
        };

        let transfer = Transfer {
            to: optional_string(checked.fields, "to")?,
            from: optional_string(checked.fields, "from")?,
            ledger: Some(ledger),
            ..self.common_fields(checked.fields, checked.amount, checked.execution_condition)?
        };

        Ok(Normalized {
            value: transfer,
            warnings: checked.diagnostics,
        })
    }

    /// Messages are passed through unchanged once validated
    pub fn normalize_outgoing_message(&self, m: &Value) -> Result<Normalized<Value>, InvalidFieldsError> {
        let warnings = self.validate_outgoing_message(m)?;
        Ok(Normalized {
            value: m.clone(),
            warnings,
        })
    }

    pub fn normalize_incoming_message(&self, m: &Value) -> Result<Normalized<Value>, InvalidFieldsError> {
        let warnings = self.validate_incoming_message(m)?;
        Ok(Normalized {
            value: m.clone(),
            warnings,
        })
    }

    pub fn validate_incoming_transfer(&self, t: &Value) -> Result<Diagnostics, InvalidFieldsError> {
        Ok(self.check_incoming_transfer(t)?.diagnostics)
    }

    pub fn validate_outgoing_transfer(&self, t: &Value) -> Result<Diagnostics, InvalidFieldsError> {
        Ok(self.check_outgoing_transfer(t)?.diagnostics)
    }

    /// Shape checks common to both directions
    pub fn validate_transfer(&self, t: &Value) -> Result<Diagnostics, InvalidFieldsError> {
        Ok(self.check_transfer(t)?.diagnostics)
    }

    pub fn validate_incoming_message(&self, m: &Value) -> Result<Diagnostics, InvalidFieldsError> {
        let (direction, diagnostics) = self.check_message(m)?;
        if let Direction::Directed { to, .. } = direction {
            self.check_incoming(to)?;
        }
        Ok(diagnostics)
    }

    pub fn validate_outgoing_message(&self, m: &Value) -> Result<Diagnostics, InvalidFieldsError> {
        let (direction, diagnostics) = self.check_message(m)?;
        if let Direction::Directed { from, .. } = direction {
            self.check_outgoing(from)?;
        }
        Ok(diagnostics)
    }

    pub fn validate_message(&self, m: &Value) -> Result<Diagnostics, InvalidFieldsError> {
        Ok(self.check_message(m)?.1)
    }

    pub fn validate_fulfillment(&self, f: &Value) -> Result<Fulfillment, InvalidFieldsError> {
        ensure(is_set(Some(f)), || format!("fulfillment must not be \"{}\"", show(Some(f))))?;
        let encoded = assert_condition_or_preimage(Some(f), "fulfillment")?.unwrap_or_default();
        Fulfillment::try_from(encoded)
            .map_err(|e| InvalidFieldsError::new(format!("fulfillment ({}): {e}", show(Some(f)))))
    }

    /// Rejects objects addressed to anyone but the local account
    pub fn assert_incoming(&self, o: &Value) -> Result<(), InvalidFieldsError> {
        self.check_incoming(o.get("to"))
    }

    /// Rejects objects claiming to come from anyone but the local account
    ///
    /// `from` may be left out; outgoing normalization fills it in.
    pub fn assert_outgoing(&self, o: &Value) -> Result<(), InvalidFieldsError> {
        self.check_outgoing(o.get("from"))
    }

    fn check_incoming(&self, to: Option<&Value>) -> Result<(), InvalidFieldsError> {
        assert_account(to, &self.plugin.account(), "to")
    }

    fn check_outgoing(&self, from: Option<&Value>) -> Result<(), InvalidFieldsError> {
        if is_set(from) {
            assert_account(from, &self.plugin.account(), "from")?;
        }
        Ok(())
    }

    fn check_incoming_transfer<'a>(&self, t: &'a Value) -> Result<CheckedTransfer<'a>, InvalidFieldsError> {
        let checked = self.check_transfer(t)?;
        if let Direction::Directed { to, .. } = checked.direction {
            self.check_incoming(to)?;
        }
        Ok(checked)
    }

    fn check_outgoing_transfer<'a>(&self, t: &'a Value) -> Result<CheckedTransfer<'a>, InvalidFieldsError> {
        let checked = self.check_transfer(t)?;
        if let Direction::Directed { from, .. } = checked.direction {
            self.check_outgoing(from)?;
        }
        Ok(checked)
    }

    fn check_transfer<'a>(&self, t: &'a Value) -> Result<CheckedTransfer<'a>, InvalidFieldsError> {
        let obj = fields(t, "transfer")?;
        debug!("Validating transfer {}", show(obj.get("id")));

        ensure(is_set(obj.get("id")), || "must have an id".to_string())?;
        ensure(is_set(obj.get("amount")), || "must have an amount".to_string())?;

        assert_string(obj.get("id"), "id")?;
        let amount = assert_number(obj.get("amount"), "amount")?;
        assert_object(obj.get("data"), "data")?;
        assert_object(obj.get("noteToSelf"), "noteToSelf")?;
        assert_object(obj.get("custom"), "custom")?;
        let execution_condition = assert_condition(obj.get("executionCondition"), "executionCondition")?;
        assert_string(obj.get("expiresAt"), "expiresAt")?;

        if is_set(obj.get("ledger")) {
            assert_prefix(obj.get("ledger"), &self.plugin.info().prefix, "ledger")?;
        }

        let has_condition = is_set(obj.get("executionCondition"));
        let has_expiry = is_set(obj.get("expiresAt"));
        ensure(has_condition == has_expiry, || {
            format!(
                "executionCondition ({}) and expiresAt ({}) must both be set if either is set",
                show(obj.get("executionCondition")),
                show(obj.get("expiresAt"))
            )
        })?;

        let mut diagnostics = Diagnostics::new();
        let direction = resolve_direction(obj, &mut diagnostics)?;

        Ok(CheckedTransfer {
            fields: obj,
            amount,
            execution_condition,
            direction,
            diagnostics,
        })
    }

    fn check_message<'a>(&self, m: &'a Value) -> Result<(Direction<'a>, Diagnostics), InvalidFieldsError> {
        let obj = fields(m, "message")?;
        debug!("Validating message to {}", show(obj.get("to").or(obj.get("account"))));

        if is_set(obj.get("ilp")) {
            assert_string(obj.get("ilp"), "ilp")?;
        }

        if is_set(obj.get("ledger")) {
            assert_prefix(obj.get("ledger"), &self.plugin.info().prefix, "ledger")?;
        }

        let mut diagnostics = Diagnostics::new();
        let direction = resolve_direction(obj, &mut diagnostics)?;
        Ok((direction, diagnostics))
    }

    /// Fields shared by both normalized transfer shapes
    fn common_fields(
        &self,
        obj: &Fields,
        amount: Amount,
        execution_condition: Option<Condition>,
    ) -> Result<Transfer, InvalidFieldsError> {
        let id = optional_string(obj, "id")?.unwrap_or_default();
        Ok(Transfer {
            id,
            amount,
            to: None,
            from: None,
            ledger: None,
            ilp: optional_string(obj, "ilp")?,
            execution_condition,
            expires_at: optional_string(obj, "expiresAt")?,
            custom: optional_object(obj, "custom")?,
            note_to_self: None,
        })
    }
}

/// Decide between the legacy `account` form and `to`/`from`
///
/// The legacy form records a deprecation warning on every use. The directed
/// form requires a destination.
fn resolve_direction<'a>(
    obj: &'a Fields,
    diagnostics: &mut Diagnostics,
) -> Result<Direction<'a>, InvalidFieldsError> {
    let account = obj.get("account");
    if is_set(account) {
        let warning = Warning::DeprecatedAccountField;
        warn!("{}", warning);
        diagnostics.push(warning);

        assert_string(account, "account")?;
        let account = account.and_then(Value::as_str).unwrap_or_default();
        return Ok(Direction::LegacyAccount { account });
    }

    ensure(is_set(obj.get("to")), || "must have a destination (.to)".to_string())?;
    Ok(Direction::Directed {
        to: obj.get("to"),
        from: obj.get("from"),
    })
}
