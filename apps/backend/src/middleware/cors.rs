use actix_cors::Cors;
use actix_web::http::header;

const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Keep only well-formed http(s) origins; `null` and blanks are dropped.
fn effective_origins(configured: &[String]) -> Vec<String> {
    let allowed: Vec<String> = configured
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    // Fallback to localhost-only if nothing valid was configured
    if allowed.is_empty() {
        LOCAL_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        allowed
    }
}

/// CORS for the web frontend: explicit origins, only the methods the API serves.
pub fn cors_middleware(configured_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    for origin in effective_origins(configured_origins) {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
