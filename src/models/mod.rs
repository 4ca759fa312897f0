//! Wire models shared by the data client and the data service
//!
//! Every endpoint answers with the same JSON envelope.

pub mod envelope;

pub use envelope::ApiResponse;
