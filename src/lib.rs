//! Membership tracking backend that derives attendance metrics and scores
//! churn risk with a pre-trained classifier.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

pub use errors::{GymError, GymResult};
