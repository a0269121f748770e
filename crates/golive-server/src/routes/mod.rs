pub mod config;
pub mod engagements;
pub mod predictions;
