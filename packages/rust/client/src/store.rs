//! Session configuration with merge-on-write semantics.
//!
//! A [`ConfigStore`] never replaces its [`ClientConfig`] wholesale: each
//! [`ConfigUpdate`] overwrites only the keys it carries.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use awesauce_shared::{CmsConfig, DEFAULT_API, DEFAULT_HOST};

use crate::transport::Transport;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Effective configuration for one client session.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the content API.
    pub api: String,
    pub host: Option<String>,
    pub brand: Option<String>,
    /// Learned from the site response, or set explicitly.
    pub tenant: Option<String>,
    /// `None` until one is supplied; requests fail with `MissingTransport`.
    pub transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: DEFAULT_API.into(),
            host: Some(DEFAULT_HOST.into()),
            brand: None,
            tenant: None,
            transport: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api", &self.api)
            .field("host", &self.host)
            .field("brand", &self.brand)
            .field("tenant", &self.tenant)
            .field("transport", &self.transport.as_ref().map(|_| "<transport>"))
            .finish()
    }
}

impl ClientConfig {
    /// Overwrite every key present in `update`, keep the rest.
    pub fn merge(&mut self, update: ConfigUpdate) {
        let ConfigUpdate {
            api,
            host,
            brand,
            tenant,
            transport,
        } = update;

        if let Some(api) = api {
            self.api = api;
        }
        if host.is_some() {
            self.host = host;
        }
        if let Some(brand) = brand {
            self.brand = brand;
        }
        if let Some(tenant) = tenant {
            self.tenant = tenant;
        }
        if transport.is_some() {
            self.transport = transport;
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigUpdate
// ---------------------------------------------------------------------------

/// A partial configuration. Absent keys leave the current value untouched.
///
/// `brand` and `tenant` are optional in the session itself, so their outer
/// `Option` marks presence in the update and `Some(None)` clears the key.
#[derive(Clone, Default)]
pub struct ConfigUpdate {
    pub api: Option<String>,
    pub host: Option<String>,
    pub brand: Option<Option<String>>,
    pub tenant: Option<Option<String>>,
    pub transport: Option<Arc<dyn Transport>>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api(mut self, api: impl Into<String>) -> Self {
        self.api = Some(api.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(Some(brand.into()));
        self
    }

    /// Drop the session brand so sites are selected by host again.
    pub fn clear_brand(mut self) -> Self {
        self.brand = Some(None);
        self
    }

    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(Some(tenant.into()));
        self
    }

    /// Drop the session tenant; the next site fetch may learn a new one.
    pub fn clear_tenant(mut self) -> Self {
        self.tenant = Some(None);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// `true` if the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.api.is_none()
            && self.host.is_none()
            && self.brand.is_none()
            && self.tenant.is_none()
            && self.transport.is_none()
    }
}

impl fmt::Debug for ConfigUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigUpdate")
            .field("api", &self.api)
            .field("host", &self.host)
            .field("brand", &self.brand)
            .field("tenant", &self.tenant)
            .field("transport", &self.transport.as_ref().map(|_| "<transport>"))
            .finish()
    }
}

impl From<&CmsConfig> for ConfigUpdate {
    fn from(config: &CmsConfig) -> Self {
        Self {
            api: Some(config.api.clone()),
            host: Some(config.host.clone()),
            brand: config.brand.clone().map(Some),
            tenant: config.tenant.clone().map(Some),
            transport: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigStore
// ---------------------------------------------------------------------------

/// Interior-mutable holder of a [`ClientConfig`].
///
/// Operations never fail. The lock is only held for the merge or copy
/// itself, never across a request, so concurrent callers see last-write-wins
/// on overlapping keys.
#[derive(Debug, Default)]
pub struct ConfigStore {
    inner: RwLock<ClientConfig>,
}

impl ConfigStore {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }

    /// Merge `update` into the stored config.
    pub fn merge(&self, update: ConfigUpdate) {
        if update.is_empty() {
            return;
        }
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .merge(update);
    }

    /// Merge `update`, then return a copy of the resulting config.
    pub fn merge_and_snapshot(&self, update: ConfigUpdate) -> ClientConfig {
        let mut config = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        config.merge(update);
        config.clone()
    }

    /// A copy of the current config.
    pub fn snapshot(&self) -> ClientConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_tenant(&self, tenant: impl Into<String>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .tenant = Some(tenant.into());
    }
}
