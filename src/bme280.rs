//! Calibration parsing and floating point compensation for the BME280.
//!
//! Everything in here is pure: the driver feeds it the bytes it read from
//! the sensor. Formulas follow the double precision variant of the Bosch
//! reference, operand order included.

use crate::error::Error;
use crate::register::{CALIB_HUMIDITY_LEN, CALIB_TEMP_PRESS_LEN, DATA_LEN};

/// Factory trimming coefficients burned into the sensor's NVM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
    pub dig_h1: u8,
    pub dig_h2: i16,
    pub dig_h3: u8,
    /// 12 bit signed
    pub dig_h4: i16,
    /// 12 bit signed
    pub dig_h5: i16,
    pub dig_h6: i8,
}

impl CalibrationData {
    /// Parse the two calibration blocks (0x88..=0xA1 and 0xE1..=0xE7).
    ///
    /// Only fails if a block has the wrong length.
    pub fn parse<E>(temp_press: &[u8], humidity: &[u8]) -> Result<Self, Error<E>> {
        let temp_press: &[u8; CALIB_TEMP_PRESS_LEN] =
            temp_press
                .try_into()
                .map_err(|_| Error::MalformedCalibration {
                    expected: CALIB_TEMP_PRESS_LEN,
                    actual: temp_press.len(),
                })?;
        let humidity: &[u8; CALIB_HUMIDITY_LEN] =
            humidity
                .try_into()
                .map_err(|_| Error::MalformedCalibration {
                    expected: CALIB_HUMIDITY_LEN,
                    actual: humidity.len(),
                })?;
        Ok(Self::from_blocks(temp_press, humidity))
    }

    pub fn from_blocks(
        temp_press: &[u8; CALIB_TEMP_PRESS_LEN],
        humidity: &[u8; CALIB_HUMIDITY_LEN],
    ) -> CalibrationData {
        let c = temp_press;
        let h = humidity;
        CalibrationData {
            dig_t1: u16::from_le_bytes([c[0], c[1]]),
            dig_t2: i16::from_le_bytes([c[2], c[3]]),
            dig_t3: i16::from_le_bytes([c[4], c[5]]),
            dig_p1: u16::from_le_bytes([c[6], c[7]]),
            dig_p2: i16::from_le_bytes([c[8], c[9]]),
            dig_p3: i16::from_le_bytes([c[10], c[11]]),
            dig_p4: i16::from_le_bytes([c[12], c[13]]),
            dig_p5: i16::from_le_bytes([c[14], c[15]]),
            dig_p6: i16::from_le_bytes([c[16], c[17]]),
            dig_p7: i16::from_le_bytes([c[18], c[19]]),
            dig_p8: i16::from_le_bytes([c[20], c[21]]),
            dig_p9: i16::from_le_bytes([c[22], c[23]]),
            // c[24] (0xA0) is reserved
            dig_h1: c[25],
            dig_h2: i16::from_le_bytes([h[0], h[1]]),
            dig_h3: h[2],
            // 0xE5 is shared: low nibble belongs to H4, high nibble to H5
            dig_h4: ((h[3] as i8 as i16) << 4) | (h[4] & 0x0F) as i16,
            dig_h5: ((h[5] as i8 as i16) << 4) | (h[4] >> 4) as i16,
            dig_h6: h[6] as i8,
        }
    }

    /// Typical values, taken from the datasheet's compensation example.
    #[cfg(test)]
    pub(crate) fn example() -> CalibrationData {
        CalibrationData {
            dig_t1: 27504,
            dig_t2: 26435,
            dig_t3: -1000,
            dig_p1: 36477,
            dig_p2: -10685,
            dig_p3: 3024,
            dig_p4: 2855,
            dig_p5: 140,
            dig_p6: -7,
            dig_p7: 15500,
            dig_p8: -14600,
            dig_p9: 6000,
            dig_h1: 75,
            dig_h2: 362,
            dig_h3: 0,
            dig_h4: 313,
            dig_h5: 50,
            dig_h6: 30,
        }
    }
}

/// Uncompensated ADC codes from one burst read of the data registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct RawSample {
    pub temperature: u32,
    pub pressure: u32,
    pub humidity: u32,
}

impl RawSample {
    pub fn from_bytes(buf: &[u8; DATA_LEN]) -> RawSample {
        // 20 bit values are left aligned in msb/lsb/xlsb, hence the shift
        let pressure =
            (((buf[0] as u32) << 16) | ((buf[1] as u32) << 8) | (buf[2] as u32)) >> 4;
        let temperature =
            (((buf[3] as u32) << 16) | ((buf[4] as u32) << 8) | (buf[5] as u32)) >> 4;
        let humidity = ((buf[6] as u32) << 8) | (buf[7] as u32);
        RawSample {
            temperature,
            pressure,
            humidity,
        }
    }
}

/// Compensated values in physical units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// °C
    pub temperature: f64,
    /// hPa
    pub pressure: f64,
    /// %RH, not clamped to 0..=100
    pub humidity: f64,
}

impl Measurement {
    pub(crate) fn compensate(raw: &RawSample, calib: &CalibrationData) -> Measurement {
        let (temperature, t_fine) = compensate_temperature(raw.temperature, calib);
        let pressure = compensate_pressure(raw.pressure, t_fine, calib);
        let humidity = compensate_humidity(raw.humidity, t_fine, calib);
        Measurement {
            temperature,
            pressure,
            humidity,
        }
    }
}

/// Returns the temperature in °C and `t_fine`, which the pressure and
/// humidity formulas need.
pub(crate) fn compensate_temperature(raw: u32, calib: &CalibrationData) -> (f64, f64) {
    let raw = raw as f64;
    let t1 = calib.dig_t1 as f64;
    let var1 = (raw / 16384.0 - t1 / 1024.0) * calib.dig_t2 as f64;
    let var2 = raw / 131072.0 - t1 / 8192.0;
    let var2 = (var2 * var2) * calib.dig_t3 as f64;
    let t_fine = var1 + var2;
    ((var1 + var2) / 5120.0, t_fine)
}

/// Pressure in hPa.
pub(crate) fn compensate_pressure(raw: u32, t_fine: f64, calib: &CalibrationData) -> f64 {
    let var1 = t_fine / 2.0 - 64000.0;
    let var2 = var1 * var1 * calib.dig_p6 as f64 / 32768.0;
    let var2 = var2 + var1 * calib.dig_p5 as f64 * 2.0;
    let var2 = (var2 / 4.0) + (calib.dig_p4 as f64 * 65536.0);
    let var3 = calib.dig_p3 as f64 * var1 * var1 / 524288.0;
    let var1 = (var3 + calib.dig_p2 as f64 * var1) / 524288.0;
    let var1 = (1.0 + var1 / 32768.0) * calib.dig_p1 as f64;
    if var1 <= 0.0 {
        // avoid division by zero
        warn!("pressure compensation skipped, var1 = {}", var1);
        return 0.0;
    }
    let p = 1048576.0 - raw as f64;
    let p = (p - (var2 / 4096.0)) * 6250.0 / var1;
    let var1 = calib.dig_p9 as f64 * p * p / 2147483648.0;
    let var2 = p * calib.dig_p8 as f64 / 32768.0;
    let p = p + (var1 + var2 + calib.dig_p7 as f64) / 16.0;
    p / 100.0
}

/// Relative humidity in %.
pub(crate) fn compensate_humidity(raw: u32, t_fine: f64, calib: &CalibrationData) -> f64 {
    let var1 = t_fine - 76800.0;
    let var2 = calib.dig_h4 as f64 * 64.0 + (calib.dig_h5 as f64 / 16384.0) * var1;
    let var3 = raw as f64 - var2;
    let var4 = calib.dig_h2 as f64 / 65536.0;
    let var5 = 1.0 + (calib.dig_h3 as f64 / 67108864.0) * var1;
    let var6 = 1.0 + (calib.dig_h6 as f64 / 67108864.0) * var1 * var5;
    let var6 = var3 * var4 * (var5 * var6);
    var6 * (1.0 - calib.dig_h1 as f64 * var6 / 524288.0)
}
