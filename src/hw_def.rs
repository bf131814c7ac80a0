//! Hardware definitions from the SHT2x datasheet: bus address, command opcodes, timing and the
//! raw-code conversion formulas.

#[cfg(feature="defmt")]
use defmt::Format;

/// 7-bit I²C address of every SHT20/SHT21
pub const I2C_ADDR: u8 = 0x40;

/// CRC generator polynomial, x^8 + x^5 + x^4 + 1
pub const POLYNOMIAL: u16 = 0x131;

/// Time the device needs to come back after a soft reset
pub const RESET_TIME_MS: u32 = 15;

/// Worst-case relative humidity conversion time (12-bit)
pub const REL_HUMID_CONVERSION_TIME_MS: u32 = 30;

/// Worst-case temperature conversion time (14-bit)
pub const TEMP_CONVERSION_TIME_MS: u32 = 85;

/// Wait between two reads while the device is still converting
pub const POLL_INTERVAL_MS: u32 = 10;

/// Reads retried after the first one before a measurement is given up
pub const MAX_POLL_RETRIES: u8 = 10;

/// Mask of the two status bits at the bottom of every raw measurement
pub const RAW_STATUS_MASK: u16 = 0x0003;

/// Address sequence of the first serial number memory location (SNB_3..SNB_0)
pub(crate) const SERIAL_NUMBER_LOC1: [u8; 2] = [0xFA, 0x0F];
/// Address sequence of the second serial number memory location (SNC_1, SNC_0, SNA_1, SNA_0)
pub(crate) const SERIAL_NUMBER_LOC2: [u8; 2] = [0xFC, 0xC9];

/// Commands understood by the device
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Command {
    /// trigger temperature measurement, SCL held during conversion
    TriggerTempHoldMaster = 0xE3,
    /// trigger relative humidity measurement, SCL held during conversion
    TriggerRelHumidHoldMaster = 0xE5,
    /// trigger temperature measurement, bus released during conversion
    TriggerTempNoHoldMaster = 0xF3,
    /// trigger relative humidity measurement, bus released during conversion
    TriggerRelHumidNoHoldMaster = 0xF5,
    /// write the user register
    WriteUserRegister = 0xE6,
    /// read the user register
    ReadUserRegister = 0xE7,
    /// soft reset
    SoftReset = 0xFE,
}
impl Command {
    /// Opcode put on the wire
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Worst-case conversion time of a measurement trigger, `None` for every other command
    pub fn conversion_time_ms(self) -> Option<u32> {
        match self {
            Command::TriggerRelHumidHoldMaster | Command::TriggerRelHumidNoHoldMaster => Some(REL_HUMID_CONVERSION_TIME_MS),
            Command::TriggerTempHoldMaster | Command::TriggerTempNoHoldMaster => Some(TEMP_CONVERSION_TIME_MS),
            Command::WriteUserRegister | Command::ReadUserRegister | Command::SoftReset => None,
        }
    }
}
impl TryFrom<u8> for Command {
    type Error = u8;
    fn try_from(raw: u8) -> Result<Self, u8> {
        match raw {
            0xE3 => Ok(Command::TriggerTempHoldMaster),
            0xE5 => Ok(Command::TriggerRelHumidHoldMaster),
            0xF3 => Ok(Command::TriggerTempNoHoldMaster),
            0xF5 => Ok(Command::TriggerRelHumidNoHoldMaster),
            0xE6 => Ok(Command::WriteUserRegister),
            0xE7 => Ok(Command::ReadUserRegister),
            0xFE => Ok(Command::SoftReset),
            other => Err(other),
        }
    }
}

/// CRC-8 as computed by the SHT2x: polynomial 0x131, no reflection, zero init and xor-out
#[cfg(feature = "crc")]
pub const CRC_8_SHT2X: crc::Algorithm<u8> = crc::Algorithm {
    width: 8,
    poly: (POLYNOMIAL & 0xFF) as u8,
    init: 0x00,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xA2,
    residue: 0x00,
};

#[cfg(feature = "crc")]
const CRC: crc::Crc<u8> = crc::Crc::<u8>::new(&CRC_8_SHT2X);

/// Checksum the device appends to `data`
#[cfg(feature = "crc")]
pub fn crc8(data: &[u8]) -> u8 {
    CRC.checksum(data)
}

/// `true` when `expected` is not the checksum of `data`
#[cfg(feature = "crc")]
pub fn crc_mismatch(data: &[u8], expected: u8) -> bool {
    crc8(data) != expected
}

/// Convert a raw temperature code to degrees centigrade
pub fn raw_temp_to_centigrade(raw: u16) -> f32 {
    let s_t = (raw & !RAW_STATUS_MASK) as f32;
    -46.85 + 175.72 * s_t / 65536.0
}

/// Convert a raw temperature code to degrees Fahrenheit
pub fn raw_temp_to_fahrenheit(raw: u16) -> f32 {
    raw_temp_to_centigrade(raw) * 9.0 / 5.0 + 32.0
}

/// Convert a raw relative humidity code to percent
pub fn raw_rel_humid_to_percent(raw: u16) -> f32 {
    let s_rh = (raw & !RAW_STATUS_MASK) as f32;
    -6.0 + 125.0 * s_rh / 65536.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn conversion_endpoints() {
        assert!(approx_eq!(f32, raw_temp_to_centigrade(0x0000), -46.85, epsilon = 0.0001));
        assert!(approx_eq!(f32, raw_temp_to_centigrade(0xFFFF), -46.85 + 175.72 * 65532.0 / 65536.0, epsilon = 0.001));
        assert!(approx_eq!(f32, raw_temp_to_centigrade(0xFFFF), 128.859, epsilon = 0.001));
        assert!(approx_eq!(f32, raw_rel_humid_to_percent(0x0000), -6.0, epsilon = 0.0001));
    }

    /// Examples from section 6 of the SHT21 datasheet
    #[test]
    fn datasheet_examples() {
        assert!(approx_eq!(f32, raw_temp_to_centigrade(0x634C), 21.308, epsilon = 0.001));
        assert!(approx_eq!(f32, raw_rel_humid_to_percent(0x7C80), 54.791, epsilon = 0.001));
        assert!(approx_eq!(f32, raw_temp_to_fahrenheit(0x0000), -52.33, epsilon = 0.001));
    }

    #[test]
    fn status_bits_are_ignored() {
        for high in [0x0000u16, 0x4E84, 0x683C, 0xFFFC] {
            for status in 0..=3 {
                assert_eq!(raw_rel_humid_to_percent(high | status), raw_rel_humid_to_percent(high));
                assert_eq!(raw_temp_to_centigrade(high | status), raw_temp_to_centigrade(high));
            }
        }
    }

    #[test]
    fn conversion_time_is_total() {
        assert_eq!(Command::TriggerRelHumidHoldMaster.conversion_time_ms(), Some(30));
        assert_eq!(Command::TriggerRelHumidNoHoldMaster.conversion_time_ms(), Some(30));
        assert_eq!(Command::TriggerTempHoldMaster.conversion_time_ms(), Some(85));
        assert_eq!(Command::TriggerTempNoHoldMaster.conversion_time_ms(), Some(85));
        assert_eq!(Command::WriteUserRegister.conversion_time_ms(), None);
        assert_eq!(Command::ReadUserRegister.conversion_time_ms(), None);
        assert_eq!(Command::SoftReset.conversion_time_ms(), None);
    }

    /// Bit-serial division by the generator, one data bit at a time
    #[cfg(feature = "crc")]
    fn bitwise_crc(data: &[u8]) -> u8 {
        let mut crc: u16 = 0;
        for byte in data {
            crc ^= *byte as u16;
            for _ in 0..8 {
                crc = if crc & 0x80 != 0 { (crc << 1) ^ POLYNOMIAL } else { crc << 1 };
            }
        }
        crc as u8
    }

    #[cfg(feature = "crc")]
    #[test]
    fn crc_datasheet_vectors() {
        assert_eq!(crc8(b"123456789"), CRC_8_SHT2X.check);
        assert_eq!(crc8(&[0x68, 0x3A]), 0x7C);
        assert_eq!(crc8(&[0x4E, 0x85]), 0x6B);
        assert_eq!(crc8(&[0x7C, 0x80]), 0xF5);
        assert_eq!(crc8(&[0x00, 0xDC]), 0x79);
        assert_eq!(crc8(&[0x00, 0x00]), 0x00);
    }

    #[cfg(feature = "crc")]
    #[test]
    fn crc_matches_bitwise_division() {
        let mut seed: u32 = 0x1234_5678;
        for len in 0..16 {
            let mut data = [0u8; 16];
            for byte in data.iter_mut().take(len) {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                *byte = (seed >> 16) as u8;
            }
            let first = crc8(&data[..len]);
            assert_eq!(first, crc8(&data[..len]));
            assert_eq!(first, bitwise_crc(&data[..len]));
        }
    }

    #[cfg(feature = "crc")]
    #[test]
    fn crc_detects_single_bit_errors() {
        let data = [0x68u8, 0x3A];
        let checksum = crc8(&data);
        assert!(!crc_mismatch(&data, checksum));
        for bit in 0..16 {
            let mut corrupted = data;
            corrupted[bit / 8] ^= 1 << (bit % 8);
            assert!(crc_mismatch(&corrupted, checksum), "data bit {bit} flip undetected");
        }
        for bit in 0..8 {
            assert!(crc_mismatch(&data, checksum ^ (1 << bit)), "checksum bit {bit} flip undetected");
        }
    }

    #[test]
    fn opcodes() {
        assert_eq!(Command::try_from(0xF3), Ok(Command::TriggerTempNoHoldMaster));
        assert_eq!(Command::try_from(0xE5).map(Command::as_u8), Ok(0xE5));
        assert_eq!(Command::try_from(0x00), Err(0x00));
        assert_eq!(Command::SoftReset.as_u8(), 0xFE);
    }
}
