use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Read-only view of the plugin the validator works on behalf of
pub trait PluginContext: Send + Sync {
    /// Local account identifier
    fn account(&self) -> String;

    /// Ledger metadata for the local plugin
    fn info(&self) -> LedgerInfo;
}

impl<C: PluginContext + ?Sized> PluginContext for Arc<C> {
    fn account(&self) -> String {
        (**self).account()
    }

    fn info(&self) -> LedgerInfo {
        (**self).info()
    }
}

/// Ledger metadata
///
/// Only `prefix` takes part in validation; the currency fields are carried
/// for callers that report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerInfo {
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_scale: Option<u32>,
}

impl LedgerInfo {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            currency_code: None,
            currency_scale: None,
        }
    }
}

/// Context fixed at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContext {
    account: String,
    info: LedgerInfo,
}

impl StaticContext {
    pub fn new(account: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::with_info(account, LedgerInfo::new(prefix))
    }

    pub fn with_info(account: impl Into<String>, info: LedgerInfo) -> Self {
        Self {
            account: account.into(),
            info,
        }
    }
}

impl PluginContext for StaticContext {
    fn account(&self) -> String {
        self.account.clone()
    }

    fn info(&self) -> LedgerInfo {
        self.info.clone()
    }
}

/// Context whose account and ledger info can be replaced at runtime
///
/// Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct SharedContext {
    inner: Arc<RwLock<StaticContext>>,
}

impl SharedContext {
    pub fn new(initial: StaticContext) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn set_account(&self, account: impl Into<String>) {
        let account = account.into();
        info!("Plugin account changed to {}", account);
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .account = account;
    }

    pub fn set_info(&self, ledger_info: LedgerInfo) {
        info!("Plugin prefix changed to {}", ledger_info.prefix);
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .info = ledger_info;
    }
}

impl PluginContext for SharedContext {
    fn account(&self) -> String {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .account()
    }

    fn info(&self) -> LedgerInfo {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .info()
    }
}
