#![cfg_attr(not(test), no_std)]
//! Async driver for the Bosch BME280 temperature, pressure and humidity
//! sensor, using forced mode and floating point compensation.
//!
//! ```ignore
//! let mut bme280 = BME280::with_embassy_delay(twim_dev, Config::default()).await?;
//! loop {
//!     let m = bme280.read_measurement().await?;
//!     defmt::info!("{} °C, {} hPa, {} %", m.temperature, m.pressure, m.humidity);
//!     Timer::after(Duration::from_millis(2000)).await;
//! }
//! ```

// must come first, the other modules use its macros
mod fmt;

pub mod bme280;
pub mod config;
pub mod driver;
pub mod error;
pub mod register;

pub use crate::bme280::{CalibrationData, Measurement};
pub use crate::config::{Config, Oversampling};
pub use crate::driver::bme280::BME280;
pub use crate::error::Error;
pub use crate::register::{DEFAULT_ADDRESS, SECONDARY_ADDRESS};
