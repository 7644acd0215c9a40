use jiff::SpanRelativeTo;
use wayfarer_core::geo_point::GeoPoint;

pub fn parse_duration(input: &str) -> Result<std::time::Duration, String> {
    let duration = if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        duration
    } else if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        duration
    } else if let Ok(seconds) = input.parse::<u64>() {
        jiff::SignedDuration::from_secs(seconds as i64)
    } else {
        return Err(String::from("Invalid duration"));
    };

    let duration = std::time::Duration::try_from(duration).map_err(|err| err.to_string())?;
    if duration.is_zero() {
        return Err(String::from("Duration must be positive"));
    }
    Ok(duration)
}

/// Parses `"lat,lng"` or `"lat lng"`.
pub fn parse_point(input: &str) -> Result<GeoPoint, String> {
    let mut parts = input
        .split([',', ' '])
        .map(str::trim)
        .filter(|part| !part.is_empty());

    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("Expected \"lat,lng\", got {input:?}"));
    };

    let lat = lat
        .parse::<f64>()
        .map_err(|_| format!("Invalid latitude {lat:?}"))?;
    let lng = lng
        .parse::<f64>()
        .map_err(|_| format!("Invalid longitude {lng:?}"))?;

    GeoPoint::new(lat, lng).map_err(|err| err.to_string())
}
