//! HTTP request handlers for the kona API.
//!
//! This module contains all the endpoint handlers for the web server.

pub mod home;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use home::home_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{temp_range_handler, temp_start_handler};
pub use tobs::tobs_handler;
