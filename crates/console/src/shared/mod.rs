pub mod aggregation;
pub mod api_client;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod gateway;
pub mod logger;
pub mod query;
pub mod request_seq;
