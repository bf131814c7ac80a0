//! This is a platform-agnostic Rust driver for the Sensirion SHT20 and SHT21 humidity and
//! temperature digital sensors using the [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal
//!
//! This driver allows you to:
//! - Trigger and read temperature and relative humidity measurements.
//! - Convert raw measurements to °C, °F and %RH.
//! - Verify the checksum sent with every measurement.
//! - Trigger a software reset.
//! - Read the device serial number.
//!
//! This driver does not support the following device features:
//! - Measurement resolution (user register read/write).
//! - On-chip heater.
//! - Async API.
//!
//! ## Features
//!
//! - `crc`: Checks received CRC against computed CRC.  A mismatch resets the device.
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//!
//! ## Supported devices: SHT20, SHT21
//!
//! Both parts share bus address 0x40 and the same command set, so one driver type serves both;
//! the [`Model`] passed to [`Sht2x::new`] only records which one is fitted.
//!
//! Measurements are triggered in no-hold-master mode: the command is written, the driver sleeps
//! for the worst-case conversion time (85 ms temperature, 30 ms humidity), and then reads the
//! result.  While the device is still converting it does not acknowledge the read, in which case
//! the driver polls every 10 ms, giving up after 10 retries.
//!
//! Datasheet:
//!   [SHT21](https://sensirion.com/media/documents/120BBE4C/63500094/Sensirion_Datasheet_Humidity_Sensor_SHT21.pdf)
//!
//! To use this driver, import this crate and an `embedded_hal` implementation, then instantiate
//! the device.
//!
//! ## Example:
//!
//! ```
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
//! # let expectations = [
//! #     Transaction::write(0x40, vec![0xF3]),
//! #     Transaction::read(0x40, vec![0x63, 0x4C, 0x38]),
//! #     Transaction::write(0x40, vec![0xF5]),
//! #     Transaction::read(0x40, vec![0x7C, 0x80, 0xF5]),
//! # ];
//! # let i2c = I2cMock::new(&expectations);
//! # let delay = NoopDelay::new();
//! use sht2x::{Model, Sht2x};
//!
//! // Platform-specific: `i2c` is an embedded_hal::i2c::I2c, `delay` an embedded_hal::delay::DelayNs
//! let mut sht2x = Sht2x::new(i2c, delay, Model::Sht21);
//!
//! let centigrade = sht2x.temperature().unwrap();
//! let humidity = sht2x.humidity().unwrap();
//! println!("{:0.1} °C, {:0.1} %RH", centigrade, humidity);
//! # assert!((centigrade - 21.31).abs() < 0.01);
//! # assert!((humidity - 54.79).abs() < 0.01);
//! # let (mut i2c, _) = sht2x.release();
//! # i2c.done();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

mod device_impl;
mod hw_def;
mod types;

pub use crate::{hw_def::*, types::*};
