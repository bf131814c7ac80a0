use crate::hw_def::*;
use crate::types::*;

use embedded_hal::{
    delay::DelayNs,
    i2c::{ErrorKind, I2c},
};

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        use defmt::{trace, warn};
    } else if #[cfg(feature = "log")] {
        use log::{trace, warn};
    } else {
        macro_rules! trace {
            ($($arg:tt)*) => {};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {};
        }
    }
}

impl<I2C, Delay, E> Sht2x<I2C, Delay>
where
    I2C: I2c<Error = E>,
    E: embedded_hal::i2c::Error,
    Delay: DelayNs,
{
    /// Create a new SHT2x driver instance.  The bus must already be initialized.
    pub fn new(i2c: I2C, delay: Delay, model: Model) -> Self {
        Self { i2c, delay, model }
    }

    /// Destroy the driver and hand back the bus and delay
    pub fn release(self) -> (I2C, Delay) {
        (self.i2c, self.delay)
    }

    /// Model this driver was created for
    pub fn model(&self) -> Model {
        self.model
    }

    /// Trigger a measurement with `command` and return the raw code, status bits included.
    ///
    /// Waits the worst-case conversion time, then reads data and checksum.  A read the device
    /// does not acknowledge is retried every [`POLL_INTERVAL_MS`], at most [`MAX_POLL_RETRIES`]
    /// times.  On a checksum failure the device is reset before [`Error::CrcMismatch`] is
    /// returned; a failed reset does not change the error.
    pub fn read_raw(&mut self, command: Command) -> Result<u16, Error<E>> {
        let Some(conversion_ms) = command.conversion_time_ms() else {
            warn!("sht2x::read_raw(): {:?} is not a measurement trigger", command);
            return Err(Error::InvalidInputData);
        };
        trace!("sht2x::read_raw(): command={:?}, conversion_ms={}", command, conversion_ms);

        self.i2c.write(I2C_ADDR, &[command.as_u8()]).map_err(Error::I2c)?;
        self.delay.delay_ms(conversion_ms);

        let mut read_buf = [0u8; 3];
        let mut retries = 0;
        loop {
            match self.i2c.read(I2C_ADDR, &mut read_buf) {
                Ok(()) => break,
                Err(i2c_err) if matches!(i2c_err.kind(), ErrorKind::NoAcknowledge(_)) => {
                    if retries == MAX_POLL_RETRIES {
                        warn!("sht2x::read_raw(): no data after {} retries", retries);
                        return Err(Error::Timeout);
                    }
                    retries += 1;
                    trace!("sht2x::read_raw(): not ready, retry {}", retries);
                    self.delay.delay_ms(POLL_INTERVAL_MS);
                }
                Err(i2c_err) => return Err(Error::I2c(i2c_err)),
            }
        }

        let raw = u16::from_be_bytes([read_buf[0], read_buf[1]]);
        trace!("sht2x::read_raw(): read_buf={:?}, raw={}", read_buf, raw);

        #[cfg(feature = "crc")]
        {
            if crc_mismatch(&read_buf[..2], read_buf[2]) {
                warn!("sht2x::read_raw(): crc mismatch: read_buf={:?}, crc_expect={}", read_buf, crc8(&read_buf[..2]));
                // the checksum outcome is reported even when the reset itself fails
                if self.software_reset().is_err() {
                    warn!("sht2x::read_raw(): reset after crc mismatch failed");
                }
                return Err(Error::CrcMismatch);
            }
        }

        Ok(raw)
    }

    /// Trigger a measurement of `kind` and return it unconverted
    pub fn measure(&mut self, kind: MeasurementKind) -> Result<RawMeasurement, Error<E>> {
        let raw = self.read_raw(kind.command())?;
        Ok(RawMeasurement { kind, raw })
    }

    /// Measure temperature in degrees centigrade
    pub fn temperature(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_raw(MeasurementKind::Temp.command())?;
        Ok(raw_temp_to_centigrade(raw))
    }

    /// Measure temperature in degrees Fahrenheit
    pub fn temperature_fahrenheit(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_raw(MeasurementKind::Temp.command())?;
        Ok(raw_temp_to_fahrenheit(raw))
    }

    /// Measure relative humidity in percent
    pub fn humidity(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_raw(MeasurementKind::RelHumid.command())?;
        Ok(raw_rel_humid_to_percent(raw))
    }

    /// software reset; blocks until the device is ready again
    pub fn software_reset(&mut self) -> Result<(), Error<E>> {
        trace!("sht2x::software_reset()");
        self.i2c.write(I2C_ADDR, &[Command::SoftReset.as_u8()]).map_err(Error::I2c)?;
        self.delay.delay_ms(RESET_TIME_MS);
        Ok(())
    }

    /// Read the electronic identification code.  The checksums interleaved with the code are
    /// not verified.
    pub fn read_serial_number(&mut self) -> Result<SerialNumber, Error<E>> {
        let mut bytes = [0u8; 8];

        let mut loc1 = [0u8; 8];
        self.i2c.write(I2C_ADDR, &SERIAL_NUMBER_LOC1).map_err(Error::I2c)?;
        self.i2c.read(I2C_ADDR, &mut loc1).map_err(Error::I2c)?;
        // SNB_3, crc, SNB_2, crc, SNB_1, crc, SNB_0, crc
        bytes[5] = loc1[0];
        bytes[4] = loc1[2];
        bytes[3] = loc1[4];
        bytes[2] = loc1[6];

        let mut loc2 = [0u8; 6];
        self.i2c.write(I2C_ADDR, &SERIAL_NUMBER_LOC2).map_err(Error::I2c)?;
        self.i2c.read(I2C_ADDR, &mut loc2).map_err(Error::I2c)?;
        // SNC_1, SNC_0, crc, SNA_1, SNA_0, crc
        bytes[1] = loc2[0];
        bytes[0] = loc2[1];
        bytes[7] = loc2[3];
        bytes[6] = loc2[4];

        trace!("sht2x::read_serial_number(): loc1={:?}, loc2={:?}", loc1, loc2);
        Ok(SerialNumber(bytes))
    }

    /// Read the serial number and return the byte at `location` (0..=7)
    pub fn serial_number_byte(&mut self, location: u8) -> Result<u8, Error<E>> {
        if location > 7 {
            return Err(Error::InvalidInputData);
        }
        let serial_number = self.read_serial_number()?;
        Ok(serial_number.0[location as usize])
    }
}
