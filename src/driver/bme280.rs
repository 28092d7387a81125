use embassy_time::Delay;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::bme280::{CalibrationData, Measurement, RawSample};
use crate::config::{Config, Oversampling};
use crate::error::Error;
use crate::register::{Mode, Register, CALIB_HUMIDITY_LEN, CALIB_TEMP_PRESS_LEN, DATA_LEN};

/// Settling time after writing `CtrlHum`, and conversion time after
/// triggering forced mode.
const SETTLE_MS: u32 = 50;

/// BME280 driven in forced mode: every [`read_measurement`](Self::read_measurement)
/// triggers exactly one conversion.
pub struct BME280<I2C, D> {
    driver: I2C,
    delay: D,
    address: u8,
    oversampling: Oversampling,
    calibration: CalibrationData,
}

impl<I2C: I2c> BME280<I2C, Delay> {
    /// Same as [`new`](Self::new), sleeping on the embassy timer.
    pub async fn with_embassy_delay(
        driver: I2C,
        config: Config,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::new(driver, Delay, config).await
    }
}

impl<I2C: I2c, D: DelayNs> BME280<I2C, D> {
    /// Put the sensor to sleep and read its calibration data.
    ///
    /// The oversampling setting is checked before the bus is touched.
    pub async fn new(driver: I2C, delay: D, config: Config) -> Result<Self, Error<I2C::Error>> {
        let oversampling = Oversampling::from_bits(config.oversampling)?;
        let mut bme280 = Self {
            driver,
            delay,
            address: config.address,
            oversampling,
            calibration: CalibrationData::from_blocks(
                &[0; CALIB_TEMP_PRESS_LEN],
                &[0; CALIB_HUMIDITY_LEN],
            ),
        };

        bme280
            .write_register(Register::CtrlMeas, oversampling.ctrl_meas(Mode::Sleep))
            .await?;
        bme280.calibration = bme280.read_calibration().await?;
        debug!(
            "BME280 at {=u8:#x} calibrated, oversampling {}",
            bme280.address,
            oversampling.bits()
        );

        Ok(bme280)
    }

    pub async fn read_measurement(&mut self) -> Result<Measurement, Error<I2C::Error>> {
        let raw = self.read_raw().await?;
        Ok(Measurement::compensate(&raw, &self.calibration))
    }

    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration
    }

    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus and the delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.driver, self.delay)
    }

    async fn read_calibration(&mut self) -> Result<CalibrationData, Error<I2C::Error>> {
        let mut temp_press = [0u8; CALIB_TEMP_PRESS_LEN];
        self.read_register(Register::CalibTempPress, &mut temp_press)
            .await?;
        let mut humidity = [0u8; CALIB_HUMIDITY_LEN];
        self.read_register(Register::CalibHumidity, &mut humidity)
            .await?;
        CalibrationData::parse(&temp_press, &humidity)
    }

    /// Run one forced conversion and fetch the uncompensated result.
    pub(crate) async fn read_raw(&mut self) -> Result<RawSample, Error<I2C::Error>> {
        // ctrl_hum only takes effect after the following ctrl_meas write
        self.write_register(Register::CtrlHum, self.oversampling.ctrl_hum())
            .await?;
        self.delay.delay_ms(SETTLE_MS).await;

        self.write_register(Register::CtrlMeas, self.oversampling.ctrl_meas(Mode::Forced))
            .await?;
        // wait till measurement is finished
        self.delay.delay_ms(SETTLE_MS).await;

        let mut buf = [0u8; DATA_LEN];
        self.read_register(Register::Data, &mut buf).await?;
        let raw = RawSample::from_bytes(&buf);
        trace!("BME280 raw {}", raw);
        Ok(raw)
    }

    async fn write_register(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.driver
            .write(self.address, &[register.addr(), value])
            .await
            .map_err(Error::Bus)
    }

    async fn read_register(
        &mut self,
        register: Register,
        buf: &mut [u8],
    ) -> Result<(), Error<I2C::Error>> {
        self.driver
            .write_read(self.address, &[register.addr()], buf)
            .await
            .map_err(Error::Bus)
    }
}
