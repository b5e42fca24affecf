//! Canned provider payloads, shaped like the real services answer.

use serde_json::{Value, json};

/// A Nominatim `/search` response with a single hit.
#[must_use]
pub fn nominatim_hit(lat: &str, lon: &str, display_name: &str) -> Value {
    json!([{
        "place_id": 1,
        "licence": "Data © OpenStreetMap contributors, ODbL 1.0.",
        "osm_type": "relation",
        "lat": lat,
        "lon": lon,
        "class": "boundary",
        "type": "administrative",
        "display_name": display_name,
    }])
}

/// A Nominatim `/reverse` response.
#[must_use]
pub fn nominatim_reverse(lat: &str, lon: &str, display_name: &str) -> Value {
    json!({
        "place_id": 1,
        "lat": lat,
        "lon": lon,
        "display_name": display_name,
        "address": { "country": "Netherlands" },
    })
}

/// A Neshan geocoding response. Note the axes: `x` is longitude, `y` is
/// latitude.
#[must_use]
pub fn neshan_hit(x: f64, y: f64, formatted_address: Option<&str>) -> Value {
    let mut body = json!({
        "status": "OK",
        "location": { "x": x, "y": y },
        "neighbourhood": "Valiasr",
        "city": "Tehran",
        "state": "Tehran Province",
    });

    if let Some(address) = formatted_address {
        body["formatted_address"] = json!(address);
    }

    body
}

/// An Open-Meteo forecast body.
#[must_use]
pub fn open_meteo_forecast(temperature: f64) -> Value {
    json!({
        "latitude": 52.37,
        "longitude": 4.89,
        "timezone": "Europe/Amsterdam",
        "current": { "time": "2024-01-01T12:00", "temperature_2m": temperature },
        "hourly": { "time": ["2024-01-01T12:00"], "temperature_2m": [temperature] },
        "daily": {
            "time": ["2024-01-01"],
            "sunrise": ["2024-01-01T08:48"],
            "sunset": ["2024-01-01T16:36"],
        },
    })
}
