pub use client::PortalClient;
pub use error::{PortalError, Result};
pub use model::*;
pub use ranking::compute_ranking_view;

mod api;
pub mod client;
pub mod error;
pub mod model;
pub mod ranking;
pub mod report;
pub mod review;
