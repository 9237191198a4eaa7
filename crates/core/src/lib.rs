#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod scoring;
pub mod time;

pub use error::Error;
pub use time::Clock;
