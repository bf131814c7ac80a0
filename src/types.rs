use crate::hw_def::*;

use core::fmt;

#[cfg(feature="defmt")]
use defmt::Format;

/// SHT20/SHT21 device driver
#[derive(Debug)]
pub struct Sht2x<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
    pub(crate) model: Model,
}

/// All possible errors in this crate
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// I²C communication error
    I2c(E),
    /// Invalid input data provided
    InvalidInputData,
    /// The device did not acknowledge the result read within the polling bound
    Timeout,
    /// Failure of a checksum from the device was detected.  The device has been reset.
    #[cfg(feature = "crc")]
    CrcMismatch,
}
impl<E> Error<E> {
    /// Raw value that older drivers for this part returned in place of this error: 0 for a
    /// timeout, 1 for a checksum failure.  Those values are also valid measurements.
    pub fn sentinel(&self) -> Option<u16> {
        match self {
            Error::Timeout => Some(0),
            #[cfg(feature = "crc")]
            Error::CrcMismatch => Some(1),
            _ => None,
        }
    }
}
impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {e:?}"),
            Error::InvalidInputData => write!(f, "invalid input data"),
            Error::Timeout => write!(f, "measurement not ready after polling"),
            #[cfg(feature = "crc")]
            Error::CrcMismatch => write!(f, "checksum mismatch"),
        }
    }
}
impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// Sensor model.  Both models speak the same protocol; the tag only records what is fitted.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Model {
    /// SHT20
    Sht20,
    /// SHT21
    #[default]
    Sht21,
}
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Sht20 => write!(f, "SHT20"),
            Model::Sht21 => write!(f, "SHT21"),
        }
    }
}

/// Quantity measured by a single trigger
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MeasurementKind {
    /// temperature
    Temp,
    /// relative humidity
    RelHumid,
}
impl MeasurementKind {
    /// Trigger used by the driver for this kind of measurement
    pub fn command(self) -> Command {
        match self {
            MeasurementKind::Temp => Command::TriggerTempNoHoldMaster,
            MeasurementKind::RelHumid => Command::TriggerRelHumidNoHoldMaster,
        }
    }
}

/// Raw (still in u16 format) measurement from the device
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawMeasurement {
    /// what was measured
    pub kind: MeasurementKind,
    /// unprocessed code, status bits included
    pub raw: u16,
}
impl RawMeasurement {
    /// The two status bits.  Bit 1 is set by the device on humidity measurements.
    pub fn status_bits(&self) -> u8 {
        (self.raw & RAW_STATUS_MASK) as u8
    }
    /// Get temperature in Centigrade
    pub fn centigrade(&self) -> Option<f32> {
        match self.kind {
            MeasurementKind::Temp => Some(raw_temp_to_centigrade(self.raw)),
            MeasurementKind::RelHumid => None,
        }
    }
    /// Get temperature in Fahrenheit
    pub fn fahrenheit(&self) -> Option<f32> {
        match self.kind {
            MeasurementKind::Temp => Some(raw_temp_to_fahrenheit(self.raw)),
            MeasurementKind::RelHumid => None,
        }
    }
    /// Get relative humidity in percent
    pub fn humidity_percent(&self) -> Option<f32> {
        match self.kind {
            MeasurementKind::Temp => None,
            MeasurementKind::RelHumid => Some(raw_rel_humid_to_percent(self.raw)),
        }
    }
}

/// Electronic identification code of the device.  Index 7 is the most significant byte (SNA_1),
/// index 0 the least significant (SNC_0).
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SerialNumber(pub [u8; 8]);
impl SerialNumber {
    /// Byte at `location` (0..=7)
    pub fn byte(&self, location: usize) -> Option<u8> {
        self.0.get(location).copied()
    }
}
impl From<SerialNumber> for u64 {
    fn from(sn: SerialNumber) -> u64 {
        u64::from_le_bytes(sn.0)
    }
}
impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
