/// Errors returned by the BME280 driver.
///
/// `E` is the error type of the underlying I²C bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Oversampling setting outside 1..=5.
    InvalidOversampling(u8),
    /// A read or write on the bus failed (device absent, NACK, ...).
    Bus(E),
    /// A calibration block did not have the expected length.
    MalformedCalibration { expected: usize, actual: usize },
}

impl<E> Error<E> {
    pub fn is_bus(&self) -> bool {
        matches!(self, Error::Bus(_))
    }
}
