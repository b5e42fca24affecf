use atlas_geo::CoordinateError;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn range_checks_accept_bounds_and_absence() {
    assert_eq!(check_coordinates(Some(-90.0), Some(180.0)), Ok(()));
    assert_eq!(check_coordinates(Some(90.0), Some(-180.0)), Ok(()));
    assert_eq!(check_coordinates(None, None), Ok(()));
}

#[test]
fn range_checks_name_the_field() {
    assert_eq!(
        check_coordinates(Some(90.5), None),
        Err("latitude must be between -90 and 90, got 90.5".to_owned())
    );
    assert_eq!(
        check_coordinates(None, Some(-181.0)),
        Err("longitude must be between -180 and 180, got -181".to_owned())
    );
    assert!(check_coordinates(Some(f64::NAN), None).is_err());
}

#[test]
fn resolver_failures() {
    let not_found = |query: &str| format!("no {query}");

    assert_eq!(
        resolve_failure("getMap", "location name", ResolveError::MissingInput, not_found),
        ToolError::MissingInput {
            subject: "location name"
        }
    );

    assert_eq!(
        resolve_failure(
            "getMap",
            "location name",
            ResolveError::GeocodingFailed {
                query: "Atlantis".to_owned()
            },
            not_found
        ),
        ToolError::GeocodingFailed {
            query: "Atlantis".to_owned(),
            message: "no Atlantis".to_owned(),
        }
    );

    assert_eq!(
        resolve_failure(
            "getMap",
            "location name",
            ResolveError::InvalidCoordinate(CoordinateError::Latitude(91.0)),
            not_found
        ),
        ToolError::InvalidInput {
            tool: "getMap".to_owned(),
            reason: "latitude 91 is outside [-90, 90]".to_owned(),
        }
    );
}

#[test]
fn point_from_coordinate() {
    let point = Point::from(Coordinate::new(35.7, 51.4).unwrap());

    assert_eq!(point, Point {
        latitude: 35.7,
        longitude: 51.4
    });
}
