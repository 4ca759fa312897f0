//! Client Module
//!
//! Data service client with a short-lived response cache.

mod data_client;

pub use data_client::DataClient;
