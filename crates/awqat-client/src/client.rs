//! Resource accessors for places, daily content, and prayer times
//!
//! Each accessor performs one authenticated GET and unwraps the
//! `{data, success, message}` envelope. Errors name the resource and
//! identifier they were fetching.

use awqat_auth::{TokenSettings, TokenSource};
use common::{Config, Envelope};
use provider::Provider;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{City, CityDetail, Country, DailyContent, PrayerTime, State};
use crate::transport::{AuthenticatedClient, SendError};

const DAILY_CONTENT_PATH: &str = "api/DailyContent";
const COUNTRIES_PATH: &str = "api/Place/Countries";
const STATES_PATH: &str = "api/Place/States";
const CITIES_PATH: &str = "api/Place/Cities";
const CITY_DETAIL_PATH: &str = "api/Place/CityDetail";
const PRAYER_TIME_PATH: &str = "api/PrayerTime";

/// Range of days a prayer-time request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrayerPeriod {
    Daily,
    Weekly,
    Monthly,
    /// The days of the current Ramadan.
    Ramadan,
}

impl PrayerPeriod {
    fn segment(&self) -> &'static str {
        match self {
            PrayerPeriod::Daily => "Daily",
            PrayerPeriod::Weekly => "Weekly",
            PrayerPeriod::Monthly => "Monthly",
            PrayerPeriod::Ramadan => "Ramadan",
        }
    }
}

impl fmt::Display for PrayerPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrayerPeriod::Daily => "daily",
            PrayerPeriod::Weekly => "weekly",
            PrayerPeriod::Monthly => "monthly",
            PrayerPeriod::Ramadan => "Ramadan",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    transport: AuthenticatedClient,
    base_url: String,
}

impl Client {
    /// Build a client that logs in with the configured credentials.
    pub fn new(config: &Config) -> Result<Self> {
        config.api.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(Error::Build)?;
        let source = TokenSource::new(
            config.credentials.clone(),
            TokenSettings::from(&config.api),
            http.clone(),
        );

        info!(base_url = %config.api.base_url, "awqat client configured");
        Ok(Self::with_provider(
            config.api.base_url.clone(),
            http,
            Arc::new(source),
        ))
    }

    /// Build a client around any request provider.
    pub fn with_provider(
        base_url: impl Into<String>,
        http: reqwest::Client,
        provider: Arc<dyn Provider>,
    ) -> Self {
        Self {
            transport: AuthenticatedClient::new(http, provider),
            base_url: base_url.into(),
        }
    }

    pub async fn daily_content(&self) -> Result<DailyContent> {
        self.fetch(DAILY_CONTENT_PATH, "daily content".into()).await
    }

    pub async fn countries(&self) -> Result<Vec<Country>> {
        self.fetch(COUNTRIES_PATH, "countries".into()).await
    }

    pub async fn states(&self) -> Result<Vec<State>> {
        self.fetch(STATES_PATH, "states".into()).await
    }

    pub async fn states_by_country(&self, country_id: i64) -> Result<Vec<State>> {
        self.fetch(
            &format!("{STATES_PATH}/{country_id}"),
            format!("states for country ID {country_id}"),
        )
        .await
    }

    pub async fn cities(&self) -> Result<Vec<City>> {
        self.fetch(CITIES_PATH, "cities".into()).await
    }

    pub async fn cities_by_state(&self, state_id: i64) -> Result<Vec<City>> {
        self.fetch(
            &format!("{CITIES_PATH}/{state_id}"),
            format!("cities for state ID {state_id}"),
        )
        .await
    }

    pub async fn city_detail(&self, city_id: i64) -> Result<CityDetail> {
        self.fetch(
            &format!("{CITY_DETAIL_PATH}/{city_id}"),
            format!("city detail for city ID {city_id}"),
        )
        .await
    }

    /// Prayer times for a city over the given period, one entry per day.
    pub async fn prayer_times(&self, city_id: i64, period: PrayerPeriod) -> Result<Vec<PrayerTime>> {
        self.fetch(
            &format!("{PRAYER_TIME_PATH}/{}/{city_id}", period.segment()),
            format!("{period} prayer times for city ID {city_id}"),
        )
        .await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, context: String) -> Result<T> {
        let url = awqat_auth::token::endpoint(&self.base_url, path);
        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(SendError::Auth(source)) => return Err(Error::Auth { context, source }),
            Err(SendError::Http(source)) => return Err(Error::Transport { context, source }),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(Error::Transport { context, source }),
        };
        debug!(%status, resource = %context, "received response");

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
                && !envelope.success
            {
                return Err(Error::Api {
                    context,
                    message: envelope.message().to_string(),
                });
            }
            return Err(Error::Status { context, status });
        }

        let envelope: Envelope<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(source) => return Err(Error::Decode { context, source }),
        };
        envelope
            .into_result()
            .map_err(|message| Error::Api { context, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Credentials;
    use provider::StaticBearerProvider;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LONG_LIVED: &str = "a.eyJleHAiOjk5OTk5OTk5OTl9.b";

    fn static_client(server: &MockServer) -> Client {
        Client::with_provider(
            server.uri(),
            reqwest::Client::new(),
            Arc::new(StaticBearerProvider::new("tok")),
        )
    }

    fn ok(data: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": data,
            "success": true,
            "message": ""
        }))
    }

    #[tokio::test]
    async fn countries_decodes_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Place/Countries"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ok(serde_json::json!([
                {"id": 2, "code": "TR", "name": "TURKIYE"},
                {"id": 13, "code": "DE", "name": "ALMANYA"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let countries = static_client(&server).countries().await.unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].code, "TR");
        assert_eq!(countries[1].id, 13);
    }

    #[tokio::test]
    async fn id_accessors_hit_expected_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Place/States/2"))
            .respond_with(ok(serde_json::json!([{"id": 539, "code": "IST", "name": "ISTANBUL"}])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/Place/Cities/539"))
            .respond_with(ok(serde_json::json!([{"id": 9541, "code": "", "name": "ISTANBUL"}])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/Place/CityDetail/9541"))
            .respond_with(ok(serde_json::json!({"id": "9541", "name": "ISTANBUL", "qiblaAngle": "151"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = static_client(&server);
        let states = client.states_by_country(2).await.unwrap();
        assert_eq!(states[0].id, 539);
        let cities = client.cities_by_state(539).await.unwrap();
        assert_eq!(cities[0].id, 9541);
        let detail = client.city_detail(9541).await.unwrap();
        assert_eq!(detail.qibla_angle, "151");
    }

    #[tokio::test]
    async fn unfiltered_lists_and_daily_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Place/States"))
            .respond_with(ok(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/Place/Cities"))
            .respond_with(ok(serde_json::json!([{"id": 1, "code": "A", "name": "B"}])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/DailyContent"))
            .respond_with(ok(serde_json::json!({"id": 1, "dayOfYear": 42, "verse": "v"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = static_client(&server);
        assert!(client.states().await.unwrap().is_empty());
        assert_eq!(client.cities().await.unwrap().len(), 1);
        assert_eq!(client.daily_content().await.unwrap().day_of_year, 42);
    }

    #[tokio::test]
    async fn prayer_times_use_period_segment() {
        let server = MockServer::start().await;
        for segment in ["Daily", "Weekly", "Monthly", "Ramadan"] {
            Mock::given(method("GET"))
                .and(path(format!("/api/PrayerTime/{segment}/9541")))
                .respond_with(ok(serde_json::json!([{"fajr": segment}])))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = static_client(&server);
        for (period, segment) in [
            (PrayerPeriod::Daily, "Daily"),
            (PrayerPeriod::Weekly, "Weekly"),
            (PrayerPeriod::Monthly, "Monthly"),
            (PrayerPeriod::Ramadan, "Ramadan"),
        ] {
            let times = client.prayer_times(9541, period).await.unwrap();
            assert_eq!(times[0].fajr, segment);
        }
    }

    #[tokio::test]
    async fn failure_envelope_becomes_api_error_with_context() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Place/States/99"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"data":null,"success":false,"message":"country not found"}"#),
            )
            .mount(&server)
            .await;

        let err = static_client(&server).states_by_country(99).await.unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
        let msg = err.to_string();
        assert!(msg.contains("states for country ID 99"), "got: {msg}");
        assert!(msg.contains("country not found"), "got: {msg}");
    }

    #[tokio::test]
    async fn success_false_on_2xx_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/DailyContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"data":null,"success":false,"message":"quota exceeded"}"#),
            )
            .mount(&server)
            .await;

        let err = static_client(&server).daily_content().await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn plain_error_body_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Place/Countries"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = static_client(&server).countries().await.unwrap_err();
        assert!(matches!(err, Error::Status { .. }));
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Place/Countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[oops"))
            .mount(&server)
            .await;

        let err = static_client(&server).countries().await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn client_from_config_logs_in_once_for_many_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Auth/Login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"accessToken": LONG_LIVED, "refreshToken": "r1"},
                "success": true,
                "message": ""
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/Place/Countries"))
            .and(header("authorization", format!("Bearer {LONG_LIVED}").as_str()))
            .respond_with(ok(serde_json::json!([{"id": 2, "code": "TR", "name": "TURKIYE"}])))
            .expect(3)
            .mount(&server)
            .await;

        let mut config = Config::new(Credentials::new("user@example.com", "hunter2"));
        config.api.base_url = server.uri();
        let client = Client::new(&config).unwrap();

        for _ in 0..3 {
            assert_eq!(client.countries().await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn login_failure_surfaces_as_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Auth/Login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"success":false,"message":"invalid credentials"}"#),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/DailyContent"))
            .respond_with(ok(serde_json::json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = Config::new(Credentials::new("user@example.com", "wrong"));
        config.api.base_url = server.uri();
        let err = Client::new(&config).unwrap().daily_content().await.unwrap_err();
        assert!(matches!(err, Error::Auth { .. }));
        assert!(err.to_string().contains("invalid credentials"), "got: {err}");
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = Config::new(Credentials::new("user@example.com", "pw"));
        config.api.timeout_secs = 0;
        assert!(matches!(Client::new(&config), Err(Error::Config(_))));
    }
}
