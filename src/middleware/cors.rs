//! Middleware de CORS
//! 
//! La API solo registra rutas GET/POST/PATCH/DELETE, así que la lista
//! de métodos permitidos se deriva de esos verbos (más el preflight).

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Verbos que las rutas de esta API registran realmente.
/// No hay rutas PUT: las actualizaciones parciales van por PATCH.
pub fn api_methods() -> [Method; 5] {
    [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

/// CORS de desarrollo: cualquier origen
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS de producción: orígenes explícitos de `CORS_ORIGINS`
pub fn cors_middleware_with_origins(origins: Vec<String>) -> CorsLayer {
    let mut cors = CorsLayer::new();

    for origin in origins {
        if let Ok(header_value) = HeaderValue::from_str(&origin) {
            cors = cors.allow_origin(header_value);
        }
    }

    cors.allow_methods(api_methods())
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_methods_match_registered_routes() {
        let methods = api_methods();
        assert!(methods.contains(&Method::PATCH));
        assert!(methods.contains(&Method::OPTIONS));
        assert!(!methods.contains(&Method::PUT));
    }
}
