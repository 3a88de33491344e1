// geo.rs - Geographic coordinates and surface distances

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// WGS-84 semi-major axis (meters)
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Mean Earth radius (km), used by the spherical formula
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0088;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// A "latitude,longitude" pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Result<Self, String> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(format!("Latitude {} out of range [-90, 90]", lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(format!("Longitude {} out of range [-180, 180]", lon));
        }
        Ok(Self { lat, lon })
    }

    /// Parse "lat,lon", whitespace allowed around the comma
    pub fn parse(raw: &str) -> Result<Self, String> {
        let parts: Vec<&str> = raw.split(',').map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err(format!("Malformed coordinate pair '{}' (expected \"lat,lon\")", raw.trim()));
        }
        let lat = parts[0]
            .parse::<f64>()
            .map_err(|_| format!("Invalid latitude '{}' in '{}'", parts[0], raw.trim()))?;
        let lon = parts[1]
            .parse::<f64>()
            .map_err(|_| format!("Invalid longitude '{}' in '{}'", parts[1], raw.trim()))?;
        Self::new(lat, lon)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Surface distance formula for geo-coordinate columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoMethod {
    /// Ellipsoidal (WGS-84) geodesic, haversine fallback when it does not converge
    #[default]
    Vincenty,
    /// Spherical great-circle distance
    Haversine,
}

impl GeoMethod {
    pub fn description(&self) -> &'static str {
        match self {
            GeoMethod::Vincenty => "Vincenty geodesic on WGS-84",
            GeoMethod::Haversine => "Haversine great-circle",
        }
    }
}

impl FromStr for GeoMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vincenty" => Ok(GeoMethod::Vincenty),
            "haversine" | "great-circle" => Ok(GeoMethod::Haversine),
            _ => Err(format!(
                "Invalid geo method '{}'. Use: vincenty, haversine",
                s
            )),
        }
    }
}

impl fmt::Display for GeoMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoMethod::Vincenty => write!(f, "vincenty"),
            GeoMethod::Haversine => write!(f, "haversine"),
        }
    }
}

/// Distance in kilometers between two points
pub fn distance_km(a: &LatLon, b: &LatLon, method: GeoMethod) -> f64 {
    match method {
        GeoMethod::Haversine => haversine_km(a, b),
        GeoMethod::Vincenty => vincenty_km(a, b).unwrap_or_else(|| {
            log::debug!("Vincenty did not converge for {} / {}, using haversine", a, b);
            haversine_km(a, b)
        }),
    }
}

/// Great-circle distance on a sphere of mean Earth radius
pub fn haversine_km(a: &LatLon, b: &LatLon) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Vincenty inverse solution on the WGS-84 ellipsoid.
///
/// Returns `None` when the iteration fails to converge (nearly antipodal points).
pub fn vincenty_km(a: &LatLon, b: &LatLon) -> Option<f64> {
    let semi_minor = (1.0 - WGS84_F) * WGS84_A;

    let l = (b.lon - a.lon).to_radians();
    let u1 = ((1.0 - WGS84_F) * a.lat.to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * b.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut converged = false;
    let (mut sin_sigma, mut cos_sigma, mut sigma) = (0.0, 0.0, 0.0);
    let (mut cos_sq_alpha, mut cos_2sigma_m) = (0.0, 0.0);

    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();

        // Coincident points
        if sin_sigma == 0.0 {
            return Some(0.0);
        }

        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial line: cos_sq_alpha = 0
        cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < VINCENTY_TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return None;
    }

    let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - semi_minor.powi(2)) / semi_minor.powi(2);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    let meters = semi_minor * big_a * (sigma - delta_sigma);
    Some(meters / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> LatLon {
        LatLon::new(lat, lon).unwrap()
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(LatLon::parse("22.75 , -158.0").unwrap(), point(22.75, -158.0));
        assert!(LatLon::parse("22.75").is_err());
        assert!(LatLon::parse("22.75,-158,3").is_err());
        assert!(LatLon::parse("north,west").is_err());
        assert!(LatLon::parse("95,0").is_err());
        assert!(LatLon::parse("0,181").is_err());
    }

    #[test]
    fn test_equator_degree() {
        let a = point(0.0, 0.0);
        let b = point(0.0, 1.0);

        // One degree of longitude on the WGS-84 equator
        let vincenty = vincenty_km(&a, &b).unwrap();
        assert!((vincenty - 111.319_491).abs() < 1e-3, "got {}", vincenty);

        let haversine = haversine_km(&a, &b);
        assert!((haversine - 111.195).abs() < 1e-2, "got {}", haversine);
    }

    #[test]
    fn test_distance_symmetric_and_zero() {
        let tucson = point(32.2226, -110.9747);
        let aloha = point(22.75, -158.0);

        for method in [GeoMethod::Vincenty, GeoMethod::Haversine] {
            assert_eq!(distance_km(&tucson, &tucson, method), 0.0);
            let ab = distance_km(&tucson, &aloha, method);
            let ba = distance_km(&aloha, &tucson, method);
            assert!((ab - ba).abs() < 1e-6);
            assert!(ab > 4000.0 && ab < 5000.0, "{} gave {}", method, ab);
        }
    }

    #[test]
    fn test_antipodal_falls_back() {
        let a = point(0.0, 0.0);
        let b = point(0.5, 179.7);
        let d = distance_km(&a, &b, GeoMethod::Vincenty);
        assert!(d > 19_000.0 && d < 20_100.0, "got {}", d);
    }

    #[test]
    fn test_geo_method_from_str() {
        assert_eq!("Vincenty".parse::<GeoMethod>().unwrap(), GeoMethod::Vincenty);
        assert_eq!("haversine".parse::<GeoMethod>().unwrap(), GeoMethod::Haversine);
        assert!("manhattan".parse::<GeoMethod>().is_err());
    }
}
