pub mod catalog;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod recommender;
pub mod state;
