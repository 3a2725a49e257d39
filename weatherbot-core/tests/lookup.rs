use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use weatherbot_core::{
    MsgType, OpenWeatherProvider, ServiceConfig, WeatherError, WeatherService,
};

const PORTLAND: &str = r#"{
    "coord": {"lon": -122.68, "lat": 45.52},
    "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
    "base": "stations",
    "main": {"temp": 283.15, "feels_like": 282.0, "temp_min": 281.15, "temp_max": 285.15,
             "pressure": 1012, "humidity": 87},
    "visibility": 9000,
    "wind": {"speed": 5.0, "deg": 180},
    "dt": 1700000000,
    "sys": {"country": "US"},
    "timezone": -28800,
    "id": 5746545,
    "name": "Portland",
    "cod": 200
}"#;

#[derive(Clone)]
struct MockApi {
    status: StatusCode,
    body: &'static str,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn current_weather(
    State(api): State<MockApi>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    api.queries.lock().expect("lock").push(params);
    (api.status, api.body)
}

/// Serve canned responses on a random local port; returns the base URL and recorded queries.
async fn spawn_api(
    status: StatusCode,
    body: &'static str,
) -> (String, Arc<Mutex<Vec<HashMap<String, String>>>>) {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let state = MockApi {
        status,
        body,
        queries: queries.clone(),
    };

    let app = Router::new()
        .route("/data/2.5/weather", get(current_weather))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock api");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock api server");
    });

    (format!("http://{addr}/data/2.5/weather"), queries)
}

fn service_for(base_url: &str, config: &ServiceConfig) -> WeatherService {
    // Talk to the mock directly even if the environment sets an HTTP proxy.
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test client");
    let provider = OpenWeatherProvider::with_client(config.api_key.clone(), base_url, http)
        .expect("mock url is valid");
    WeatherService::with_provider(Arc::new(provider), config)
}

#[tokio::test]
async fn successful_lookup_formats_report() {
    let (url, queries) = spawn_api(StatusCode::OK, PORTLAND).await;
    let service = service_for(&url, &ServiceConfig::new("TEST_KEY"));

    let msg = service.lookup(&["Portland"]).await.expect("lookup succeeds");

    assert_eq!(msg.msgtype, MsgType::Text);
    assert!(msg.body.starts_with("Portland || Updated: "));
    assert!(msg.body.contains("Conditions: Rain (light rain)"));
    assert!(msg.body.contains("Temperature: 50.00°F (10.00°C)"));
    assert!(msg.body.contains("High/Low: 53.60°F / 46.40°F (12.00°C / 8.00°C)"));
    assert!(msg.body.contains("Humidity: 87%"));
    assert!(msg.body.ends_with("S at 11.2 MPH (18.0 km/h)"));

    let queries = queries.lock().expect("lock");
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["q"], "Portland,us");
    assert_eq!(queries[0]["appid"], "TEST_KEY");
}

#[tokio::test]
async fn configured_default_country_is_appended_once() {
    let (url, queries) = spawn_api(StatusCode::OK, PORTLAND).await;
    let config = ServiceConfig {
        default_country: Some("gb".into()),
        ..ServiceConfig::new("TEST_KEY")
    };
    let service = service_for(&url, &config);

    service.lookup(&["St", "Albans"]).await.expect("lookup succeeds");
    service.lookup(&["Paris,fr"]).await.expect("lookup succeeds");

    let queries = queries.lock().expect("lock");
    assert_eq!(queries[0]["q"], "St Albans,gb");
    assert_eq!(queries[1]["q"], "Paris,fr");
}

#[tokio::test]
async fn zero_conditions_yield_empty_summary() {
    const NO_CONDITIONS: &str =
        r#"{"name": "Nowhere", "dt": 1700000000, "weather": [], "main": {"temp": 273.15}}"#;
    let (url, _) = spawn_api(StatusCode::OK, NO_CONDITIONS).await;
    let service = service_for(&url, &ServiceConfig::new("TEST_KEY"));

    let msg = service.lookup(&["Nowhere"]).await.expect("lookup succeeds");

    assert!(msg.body.contains("Conditions:  ()"));
    assert!(msg.body.contains("Temperature: 32.00°F (0.00°C)"));
}

#[tokio::test]
async fn non_success_status_carries_body() {
    const NOT_FOUND: &str = r#"{"cod":"404","message":"city not found"}"#;
    let (url, _) = spawn_api(StatusCode::NOT_FOUND, NOT_FOUND).await;
    let service = service_for(&url, &ServiceConfig::new("TEST_KEY"));

    let err = service.lookup(&["Atlantis"]).await.unwrap_err();

    match &err {
        WeatherError::InvalidResponse { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, NOT_FOUND);
        }
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
    assert!(err.to_string().contains("city not found"));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let (url, _) = spawn_api(StatusCode::OK, "{\"name\": ").await;
    let service = service_for(&url, &ServiceConfig::new("TEST_KEY"));

    let err = service.lookup(&["Portland"]).await.unwrap_err();

    assert!(matches!(err, WeatherError::Decode(_)));
    assert!(err.to_string().starts_with("invalid weather response"));
}

#[tokio::test]
async fn no_location_never_hits_the_api() {
    let (url, queries) = spawn_api(StatusCode::OK, PORTLAND).await;
    let service = service_for(&url, &ServiceConfig::new("TEST_KEY"));

    let args: [&str; 0] = [];
    let msg = service.lookup(&args).await.expect("usage");

    assert_eq!(msg.msgtype, MsgType::Notice);
    assert_eq!(
        msg.body,
        "Usage: !weather (city[,country])|(postal code[,country])"
    );
    assert!(queries.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn unreachable_api_is_a_request_error() {
    // Bind then drop, so nothing listens on the port.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let service = service_for(
        &format!("http://{addr}/data/2.5/weather"),
        &ServiceConfig::new("TEST_KEY"),
    );

    let err = service.lookup(&["Portland"]).await.unwrap_err();
    assert!(matches!(err, WeatherError::Request(_)));

    let shown = format!("{err} {err:?}");
    assert!(!shown.contains("TEST_KEY"), "api key leaked: {shown}");
    assert!(!shown.contains("appid"), "request url leaked: {shown}");
}
