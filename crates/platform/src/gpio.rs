//! GPIO descriptors
//!
//! A [`GpioDesc`] is what a driver keeps after asking the device model for a
//! named GPIO. The lookup may legitimately find nothing, in which case the
//! descriptor stays unrequested and writes to it fail softly instead of
//! touching hardware.

use embedded_hal::digital::{OutputPin, PinState};
use thiserror_no_std::Error;

/// GPIO write failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Descriptor was never bound to a line
    #[error("GPIO not requested")]
    NotRequested,
    /// The line driver reported an error
    #[error("GPIO line error")]
    Line,
}

/// Output GPIO that may or may not be bound to a line.
pub struct GpioDesc<P> {
    pin: Option<P>,
}

impl<P: OutputPin> GpioDesc<P> {
    /// Descriptor bound to `pin`.
    pub fn new(pin: P) -> Self {
        Self { pin: Some(pin) }
    }

    /// Descriptor with no line behind it.
    pub fn unrequested() -> Self {
        Self { pin: None }
    }

    /// `true` once bound to a line.
    pub fn is_valid(&self) -> bool {
        self.pin.is_some()
    }

    /// Drive the line to `value` (`true` = high).
    pub fn set_value(&mut self, value: bool) -> Result<(), GpioError> {
        let pin = self.pin.as_mut().ok_or(GpioError::NotRequested)?;
        pin.set_state(PinState::from(value))
            .map_err(|_| GpioError::Line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as MockState, Transaction as PinTransaction,
    };

    #[test]
    fn test_unrequested_desc_rejects_writes() {
        let mut desc: GpioDesc<PinMock> = GpioDesc::unrequested();
        assert!(!desc.is_valid());
        assert_eq!(desc.set_value(true), Err(GpioError::NotRequested));
        assert_eq!(desc.set_value(false), Err(GpioError::NotRequested));
    }

    #[test]
    fn test_bound_desc_drives_line() {
        let expectations = [
            PinTransaction::set(MockState::Low),
            PinTransaction::set(MockState::High),
        ];
        let mut pin = PinMock::new(&expectations);
        let mut desc = GpioDesc::new(pin.clone());
        assert!(desc.is_valid());
        desc.set_value(false).unwrap();
        desc.set_value(true).unwrap();
        pin.done();
    }
}
