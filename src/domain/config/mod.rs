//! Configuration domain module

mod app_config;
mod client_config;
mod conflict;

pub use app_config::{AppConfig, DEFAULT_API_URL};
pub use client_config::{validate_api_url, validate_folder, ClientConfig};
pub use conflict::ConflictPolicy;
