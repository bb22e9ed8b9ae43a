//! Root API client.
//!
//! Holds the shared transport and registers the API's top-level
//! collections. Everything else - nested sub-collections, typed entities -
//! hangs off these through naming-convention inference.

use crate::api::http::{HttpTransport, DEFAULT_TIMEOUT};
use crate::error::Error;
use crate::resource::collection::{Collection, Incidents, MaintenanceWindows, Services};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builder for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    subdomain: String,
    token: String,
    timeout: Duration,
    api_base: Option<Url>,
}

impl ClientBuilder {
    /// Start a builder for the account at `<subdomain>.pagerduty.com`.
    pub fn new(subdomain: &str, token: &str) -> Self {
        Self {
            subdomain: subdomain.to_string(),
            token: token.to_string(),
            timeout: DEFAULT_TIMEOUT,
            api_base: None,
        }
    }

    /// Override the per-request timeout (default 10 seconds). The value is
    /// forwarded opaquely to the HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the API base URL. Intended for tests pointing the client at
    /// a local mock server; the default derives from the subdomain.
    pub fn api_base(mut self, api_base: Url) -> Self {
        self.api_base = Some(api_base);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client, Error> {
        let api_base = match self.api_base {
            Some(base) => base,
            None => Url::parse(&format!("https://{}.pagerduty.com/api/v1/", self.subdomain))?,
        };
        let transport = Arc::new(HttpTransport::new(api_base, self.token, self.timeout)?);
        Ok(Client::from_transport(transport))
    }
}

/// Client for one account's REST API.
///
/// Cloning is cheap; clones share the underlying HTTP transport.
#[derive(Debug, Clone)]
pub struct Client {
    pub incidents: Incidents,
    pub alerts: Collection,
    pub schedules: Collection,
    pub users: Collection,
    pub services: Services,
    pub maintenance_windows: MaintenanceWindows,
}

impl Client {
    /// Create a client for `<subdomain>.pagerduty.com` with default
    /// settings.
    pub fn new(subdomain: &str, token: &str) -> Result<Self, Error> {
        ClientBuilder::new(subdomain, token).build()
    }

    /// Start a [`ClientBuilder`] for custom settings.
    pub fn builder(subdomain: &str, token: &str) -> ClientBuilder {
        ClientBuilder::new(subdomain, token)
    }

    fn from_transport(transport: Arc<HttpTransport>) -> Self {
        Self {
            incidents: Incidents::new(transport.clone()),
            alerts: Collection::new(transport.clone(), "alerts", None),
            schedules: Collection::new(transport.clone(), "schedules", None),
            users: Collection::new(transport.clone(), "users", None),
            services: Services::new(transport.clone()),
            maintenance_windows: MaintenanceWindows::new(transport),
        }
    }
}
