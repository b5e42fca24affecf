use std::time::Duration;

use atlas_config::Config;
use atlas_geo::Nominatim;
use atlas_test::{
    fixture,
    mock::{GET, MockServer, catch_all},
};
use atlas_weather::OpenMeteo;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::{ToolResult, Tools};

fn tools_with(server: &MockServer, config: &Config) -> Tools {
    let client = config.http_client().unwrap();
    let geocoder = Nominatim::new(client.clone(), server.base_url());
    let forecast = OpenMeteo::new(client, server.base_url());

    Tools::new().with(GetWeather::new(Arc::new(geocoder), Arc::new(forecast)))
}

fn tools(server: &MockServer) -> Tools {
    tools_with(server, &Config::default())
}

#[tokio::test]
async fn city_is_geocoded_and_named_in_the_payload() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/search").query_param("q", "Amsterdam");
            then.status(200).json_body(fixture::nominatim_hit(
                "52.37",
                "4.89",
                "Amsterdam, Netherlands",
            ));
        })
        .await;
    let forecast = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/forecast")
                .query_param("latitude", "52.37")
                .query_param("longitude", "4.89")
                .query_param("current", "temperature_2m")
                .query_param("hourly", "temperature_2m")
                .query_param("daily", "sunrise,sunset")
                .query_param("timezone", "auto");
            then.status(200)
                .json_body(json!({ "current": { "temperature_2m": 10 } }));
        })
        .await;

    let result = tools(&server)
        .execute("getWeather", json!({ "city": "Amsterdam" }))
        .await;

    assert_eq!(
        result,
        ToolResult::Ok(json!({
            "current": { "temperature_2m": 10 },
            "cityName": "Amsterdam, Netherlands",
        }))
    );
    search.assert_async().await;
    forecast.assert_async().await;
}

#[tokio::test]
async fn coordinates_skip_geocoding_and_add_no_name() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(500);
        })
        .await;
    let forecast = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/forecast")
                .query_param("latitude", "35.7")
                .query_param("longitude", "51.4");
            then.status(200).json_body(fixture::open_meteo_forecast(18.5));
        })
        .await;

    let result = tools(&server)
        .execute("getWeather", json!({ "latitude": 35.7, "longitude": 51.4 }))
        .await;

    assert_eq!(result, ToolResult::Ok(fixture::open_meteo_forecast(18.5)));
    search.assert_calls_async(0).await;
    forecast.assert_async().await;
}

#[tokio::test]
async fn city_is_used_as_name_without_display_name() {
    for hit in [
        json!({ "lat": "35.6892523", "lon": "51.3896004" }),
        json!({ "lat": "35.6892523", "lon": "51.3896004", "display_name": "" }),
    ] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!([hit]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/forecast");
                then.status(200).json_body(json!({ "current": {} }));
            })
            .await;

        let result = tools(&server)
            .execute("getWeather", json!({ "city": "تهران" }))
            .await;

        assert_eq!(
            result.into_value(),
            json!({ "current": {}, "cityName": "تهران" }),
            "{hit}"
        );
    }
}

#[test_log::test(tokio::test)]
async fn unknown_city_is_echoed_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(json!([]));
        })
        .await;
    let forecast = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(200).json_body(json!({}));
        })
        .await;

    let result = tools(&server)
        .execute("getWeather", json!({ "city": "Atlantis" }))
        .await;

    assert_eq!(
        result.into_value(),
        json!({
            "error": "Could not find coordinates for \"Atlantis\". Please verify the location \
                      name or try using coordinates."
        })
    );
    forecast.assert_calls_async(0).await;
}

#[tokio::test]
async fn nothing_supplied_is_missing_input() {
    let server = MockServer::start_async().await;
    let guard = catch_all(&server).await;

    let result = tools(&server)
        .execute("getWeather", json!({ "longitude": 4.89 }))
        .await;

    assert_eq!(
        result.into_value(),
        json!({
            "error": "Please provide either a city name or both latitude and longitude \
                      coordinates."
        })
    );
    guard.assert_calls_async(0).await;
}

#[test_log::test(tokio::test)]
async fn upstream_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let error = tools(&server)
        .call("getWeather", json!({ "latitude": 52.37, "longitude": 4.89 }))
        .await
        .unwrap_err();

    assert_eq!(error, ToolError::UpstreamService {
        service: "Weather",
        status: Some(503),
    });
    assert_eq!(
        error.to_string(),
        "Weather API error: 503. Please try again later."
    );
}

#[test_log::test(tokio::test)]
async fn timeout_is_an_upstream_error_without_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(json!({}));
        })
        .await;

    let mut config = Config::default();
    config.http.timeout_secs = 1;

    let result = tools_with(&server, &config)
        .execute("getWeather", json!({ "latitude": 52.37, "longitude": 4.89 }))
        .await;

    assert_eq!(
        result.into_value(),
        json!({ "error": "Weather API error. Please try again later." })
    );
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected() {
    let server = MockServer::start_async().await;
    let guard = catch_all(&server).await;

    let error = tools(&server)
        .call("getWeather", json!({ "latitude": -90.1, "longitude": 4.89 }))
        .await
        .unwrap_err();

    assert!(matches!(error, ToolError::InvalidInput { .. }), "{error:?}");
    guard.assert_calls_async(0).await;
}
