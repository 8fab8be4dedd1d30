//! Concurrency helpers shared by the HTTP adapters.

mod fan_out;

pub use fan_out::FanOut;
