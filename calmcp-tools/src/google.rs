//! Google Calendar v3 backend for [`CalendarClient`].

use async_trait::async_trait;
use calmcp_core::ProviderError;
use google_calendar3::{api::Event, hyper_rustls, hyper_util, CalendarHub};
use tracing::debug;

use crate::{
    client::{CalendarClient, CredentialProvider, EventQuery, ProviderResult, PRIMARY_CALENDAR},
    oauth::{GoogleConfig, OAuthClient},
};

pub type Connector = hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;

/// Re-derives an access token from the refresh token on every `acquire`.
#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    oauth: OAuthClient,
}

impl GoogleCredentials {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            oauth: OAuthClient::new(config),
        }
    }
}

#[async_trait]
impl CredentialProvider for GoogleCredentials {
    async fn acquire(&self) -> ProviderResult<Box<dyn CalendarClient>> {
        let access_token = self.oauth.refresh_access_token().await?;
        debug!("acquired fresh access token");
        Ok(Box::new(GoogleCalendar::connect(access_token)?))
    }
}

pub struct GoogleCalendar {
    hub: CalendarHub<Connector>,
}

impl GoogleCalendar {
    pub fn connect(access_token: String) -> ProviderResult<Self> {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| ProviderError::Api(format!("loading TLS roots: {e}")))?
            .https_only()
            .enable_http1()
            .build();
        let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
            .build(connector);

        Ok(Self::with_hub(CalendarHub::new(client, access_token)))
    }

    /// Wrap an already configured hub, e.g. one pointed at another base URL.
    pub fn with_hub(hub: CalendarHub<Connector>) -> Self {
        Self { hub }
    }
}

fn api_error(err: google_calendar3::Error) -> ProviderError {
    ProviderError::Api(err.to_string())
}

#[async_trait]
impl CalendarClient for GoogleCalendar {
    async fn insert_event(&self, event: Event) -> ProviderResult<Event> {
        let (_, created) = self
            .hub
            .events()
            .insert(event, PRIMARY_CALENDAR)
            .doit()
            .await
            .map_err(api_error)?;
        Ok(created)
    }

    async fn list_events(&self, query: &EventQuery) -> ProviderResult<Vec<Event>> {
        let max_results = i32::try_from(query.max_results).unwrap_or(i32::MAX);
        let (_, events) = self
            .hub
            .events()
            .list(PRIMARY_CALENDAR)
            .time_min(query.time_min)
            .time_max(query.time_max)
            .single_events(true)
            .order_by("startTime")
            .max_results(max_results)
            .doit()
            .await
            .map_err(api_error)?;
        Ok(events.items.unwrap_or_default())
    }

    async fn get_event(&self, event_id: &str) -> ProviderResult<Event> {
        let (_, event) = self
            .hub
            .events()
            .get(PRIMARY_CALENDAR, event_id)
            .doit()
            .await
            .map_err(api_error)?;
        Ok(event)
    }

    async fn update_event(&self, event_id: &str, event: Event) -> ProviderResult<Event> {
        let (_, updated) = self
            .hub
            .events()
            .update(event, PRIMARY_CALENDAR, event_id)
            .doit()
            .await
            .map_err(api_error)?;
        Ok(updated)
    }

    async fn delete_event(&self, event_id: &str) -> ProviderResult<()> {
        self.hub
            .events()
            .delete(PRIMARY_CALENDAR, event_id)
            .doit()
            .await
            .map_err(api_error)?;
        Ok(())
    }
}
