pub mod aggregate;
pub mod error;
pub mod grade;
pub mod loader;
pub mod model;
pub mod output;
pub mod sample;
pub mod stats;
