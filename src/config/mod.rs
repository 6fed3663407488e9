use std::env;
use std::path::PathBuf;

pub mod cors;
pub mod headers;

pub use cors::create_cors_layer;
pub use headers::apply_security_headers;

pub struct Config {
    pub data_dir: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);
        Self {
            data_dir: PathBuf::from(data_dir),
            port,
        }
    }
}
