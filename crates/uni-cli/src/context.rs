use anyhow::Context;
use uni_api::events::InvalidationBus;
use uni_api::{ApiClient, HttpTransport, Transport};
use uni_auth::guard::{self, Access};
use uni_auth::{AuthError, SessionContext, SessionStore};
use uni_config::DashConfig;

/// Shared application resources initialized once at startup.
pub struct AppContext<T: Transport = HttpTransport> {
    pub config: DashConfig,
    pub client: ApiClient<T>,
    pub bus: InvalidationBus,
}

impl AppContext<HttpTransport> {
    /// Restore the stored session and build the HTTP client.
    pub fn init(config: DashConfig) -> anyhow::Result<Self> {
        let store = SessionStore::from_config(&config.session)
            .context("failed to locate session storage")?;
        let session = SessionContext::hydrate(store);
        let client = ApiClient::from_config(&config.api, session)
            .context("failed to build HTTP client")?;
        Ok(Self::new(config, client))
    }
}

impl<T: Transport> AppContext<T> {
    pub fn new(config: DashConfig, client: ApiClient<T>) -> Self {
        Self {
            config,
            client,
            bus: InvalidationBus::new(),
        }
    }

    pub const fn session(&self) -> &SessionContext {
        self.client.session()
    }

    /// Enforce the route guard. A bare env token is resolved to a user first.
    pub async fn require(&self, access: Access) -> anyhow::Result<()> {
        if self.session().token().is_some() && !self.session().is_authenticated() {
            self.client
                .restore_user()
                .await
                .context("failed to resolve the signed-in user")?;
        }
        guard::check(self.session(), access).map_err(|denial| {
            tracing::debug!(?denial, redirect = ?denial.redirect(), "access denied");
            anyhow::Error::from(AuthError::from(denial))
        })
    }
}
