//! Clients for the remote recommendation and attribute transfer services

pub mod attributes;
pub mod recommender;

pub use attributes::{AttributesClient, SessionAttributes};
pub use recommender::RecommenderClient;
