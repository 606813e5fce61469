// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod frame_hub;
pub mod http_source;
pub mod payload;
pub mod sim_source;
