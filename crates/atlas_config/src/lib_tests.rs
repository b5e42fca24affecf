use std::path::PathBuf;

use assert_matches::assert_matches;
use atlas_geo::Coordinate;
use indoc::indoc;
use pretty_assertions::assert_eq;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn defaults() {
    let config = Config::default();

    assert_eq!(config.http.timeout_secs, 15);
    assert!(config.http.user_agent.starts_with("atlas/"));
    assert_eq!(config.nominatim.base_url, "https://nominatim.openstreetmap.org");
    assert_eq!(config.neshan.base_url, "https://api.neshan.org");
    assert_eq!(config.neshan.api_key_env, "NESHAN_API_KEY");
    assert_eq!(config.neshan.extent(), Some(BoundingBox::TEHRAN));
    assert_eq!(config.neshan.api_key(), None);
    assert_eq!(config.weather.base_url, "https://api.open-meteo.com");
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn empty_file_is_default() {
    assert_eq!(Config::from_toml("").unwrap(), Config::default());
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let config = Config::from_toml(indoc! {r#"
        [http]
        timeout_secs = 5

        [nominatim]
        base_url = "http://localhost:8080"
    "#})
    .unwrap();

    assert_eq!(config.http.timeout_secs, 5);
    assert_eq!(config.http.user_agent, HttpConfig::default().user_agent);
    assert_eq!(config.nominatim.base_url, "http://localhost:8080");
    assert_eq!(config.neshan, NeshanConfig::default());
}

#[test]
fn custom_extent_and_disabled_bias() {
    let config = Config::from_toml(indoc! {"
        [neshan]
        bias_results = false

        [neshan.extent]
        south_west = { latitude = 36.2, longitude = 59.4 }
        north_east = { latitude = 36.4, longitude = 59.7 }
    "})
    .unwrap();

    assert_eq!(config.neshan.extent(), None);
    assert_eq!(
        config.neshan.extent.south_west,
        Coordinate::new(36.2, 59.4).unwrap()
    );
}

#[test]
fn out_of_range_extent_is_rejected() {
    let error = Config::from_toml(indoc! {"
        [neshan.extent]
        south_west = { latitude = 136.2, longitude = 59.4 }
        north_east = { latitude = 36.4, longitude = 59.7 }
    "})
    .unwrap_err();

    assert_matches!(error, Error::Toml(_));
}

#[test]
fn unknown_keys_are_rejected() {
    let error = Config::from_toml(indoc! {r#"
        [neshan]
        api_key = "inline-keys-are-not-supported"
    "#})
    .unwrap_err();

    assert_matches!(error, Error::Toml(_));
}

#[test]
fn environment_overrides_file() {
    let mut config = Config::from_toml(indoc! {r#"
        [weather]
        base_url = "http://file.example"
    "#})
    .unwrap();

    config
        .apply_env(vars(&[
            ("ATLAS_HTTP_TIMEOUT_SECS", "3"),
            ("ATLAS_HTTP_USER_AGENT", "atlas-test"),
            ("ATLAS_NOMINATIM_BASE_URL", "http://nominatim.example"),
            ("ATLAS_NESHAN_BASE_URL", "http://neshan.example"),
            ("ATLAS_WEATHER_BASE_URL", "http://weather.example"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

    assert_eq!(config.http.timeout_secs, 3);
    assert_eq!(config.timeout(), Duration::from_secs(3));
    assert_eq!(config.http.user_agent, "atlas-test");
    assert_eq!(config.nominatim.base_url, "http://nominatim.example");
    assert_eq!(config.neshan.base_url, "http://neshan.example");
    assert_eq!(config.weather.base_url, "http://weather.example");
}

#[test]
fn api_key_is_read_from_named_variable() {
    let mut config = Config::default();
    config
        .apply_env(vars(&[("NESHAN_API_KEY", "service.abc")]))
        .unwrap();
    assert_eq!(config.neshan.api_key(), Some("service.abc"));
    assert_eq!(config.neshan_api_key().as_deref(), Some("service.abc"));

    let mut config = Config::from_toml(indoc! {r#"
        [neshan]
        api_key_env = "MY_NESHAN_KEY"
    "#})
    .unwrap();
    config
        .apply_env(vars(&[
            ("NESHAN_API_KEY", "wrong"),
            ("MY_NESHAN_KEY", "right"),
        ]))
        .unwrap();
    assert_eq!(config.neshan.api_key(), Some("right"));
}

#[test]
fn blank_api_key_is_absent() {
    for value in ["", "   "] {
        let mut config = Config::default();
        config.apply_env(vars(&[("NESHAN_API_KEY", value)])).unwrap();

        assert_eq!(config.neshan.api_key(), None, "{value:?}");
    }

    assert_eq!(NeshanConfig::default().with_api_key("").api_key(), None);
}

#[test]
fn invalid_timeout_override() {
    let mut config = Config::default();
    let error = config
        .apply_env(vars(&[("ATLAS_HTTP_TIMEOUT_SECS", "soon")]))
        .unwrap_err();

    assert_eq!(error, Error::InvalidValue {
        key: "ATLAS_HTTP_TIMEOUT_SECS".to_owned(),
        value: "soon".to_owned(),
    });
}

#[test]
fn validate_rejects_bad_urls() {
    let mut config = Config::default();
    config.weather.base_url = "not a url".to_owned();

    assert_matches!(config.validate(), Err(Error::Url {
        key: "weather.base_url",
        ..
    }));
}

#[test]
fn validate_rejects_zero_timeout() {
    let mut config = Config::default();
    config.http.timeout_secs = 0;

    assert_matches!(config.validate(), Err(Error::InvalidValue { .. }));
}

#[test]
fn debug_output_redacts_api_key() {
    let neshan = NeshanConfig::default().with_api_key("very-secret");

    let debug = format!("{neshan:?}");
    assert!(!debug.contains("very-secret"), "{debug}");
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn load_missing_file() {
    let path = PathBuf::from("/nonexistent/atlas/config.toml");

    assert_matches!(Config::load(Some(&path)), Err(Error::Io(_)));
}

#[test]
fn builds_http_client() {
    assert!(Config::default().http_client().is_ok());
}
