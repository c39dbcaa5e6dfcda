#![forbid(unsafe_code)]

pub mod flow;
pub mod model;
pub mod time;
pub mod tips;

pub use time::Clock;
