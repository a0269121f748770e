//! Engagement model and go-live deadline forecasting.
//!
//! The forecaster is a pure function of an engagement snapshot and a clock:
//! [`portfolio::forecast`] pulls a [`store::Snapshot`] from any
//! [`store::EngagementSource`] and returns a risk-ranked
//! [`portfolio::PortfolioReport`].

pub mod blockers;
pub mod clock;
pub mod config;
pub mod engagement;
pub mod error;
pub mod io;
pub mod paths;
pub mod pipeline;
pub mod portfolio;
pub mod projection;
pub mod risk;
pub mod store;
pub mod types;
pub mod velocity;

pub use error::{GoliveError, Result};
