use poem::middleware::Cors;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";

/// CORS middleware for the relay server's HTTP surface
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: Comma-separated list of allowed origins
///   (default: "http://localhost:3000,http://localhost:8080")
///
/// Only read-only methods are exposed.
pub fn init_cors() -> Cors {
    let raw = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    Cors::new()
        .allow_origins(allowed_origins(&raw))
        .allow_methods(vec!["GET", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization"])
}

fn allowed_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        return allowed_origins(DEFAULT_ALLOWED_ORIGINS);
    }
    origins
}
