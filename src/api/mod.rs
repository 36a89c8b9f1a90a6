// API routes and handlers

pub mod health;
pub mod routes;
pub mod members;
pub mod checkins;
pub mod churn;
