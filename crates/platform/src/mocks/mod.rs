//! Mock implementations for testing
//!
//! Every mock writes into a shared [`Journal`], so a test can assert the
//! exact interleaving of regulator, GPIO, delay and DSI traffic produced by a
//! driver. Failures are injected per step on [`MockDsi`], [`MockRegulator`]
//! and [`MockBacklight`].

#![cfg(any(test, feature = "std"))]

extern crate std;

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::device::{DeviceNode, GpioFlags, LookupError};
use crate::display::{Backlight, Brightness};
use crate::dsi::{DsiTransport, LinkConfig};
use crate::power::Regulator;

/// One observable side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Regulator output switched
    Regulator(bool),
    /// Reset line driven (`true` = high)
    Reset(bool),
    /// Blocking delay in milliseconds
    DelayMs(u32),
    /// Blocking delay in nanoseconds
    DelayNs(u32),
    /// DSI attach with the link parameters read from platform data
    Attach(LinkConfig),
    /// Raw DCS buffer
    Write(Vec<u8>),
    /// Dedicated exit-sleep primitive
    ExitSleep,
    /// Dedicated display-on primitive
    DisplayOn,
    /// Backlight level set
    Brightness(u8),
}

/// Shared, ordered record of mock activity
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Only the DCS payloads written through `dcs_write_buffer`
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write(buf) => Some(buf.clone()),
                _ => None,
            })
            .collect()
    }

    /// Only the DSI events (attach, writes, exit-sleep, display-on)
    pub fn dsi_events(&self) -> Vec<Event> {
        self.0
            .borrow()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Event::Attach(_) | Event::Write(_) | Event::ExitSleep | Event::DisplayOn
                )
            })
            .cloned()
            .collect()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Error returned by every mock when a failure was injected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl embedded_hal::digital::Error for MockError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// DSI step that a [`MockDsi`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsiStep {
    /// `attach`
    Attach,
    /// The n-th (0-based) `dcs_write_buffer` call
    Write(usize),
    /// `dcs_exit_sleep_mode`
    ExitSleep,
    /// `dcs_set_display_on`
    DisplayOn,
}

/// Mock DSI transport
pub struct MockDsi {
    journal: Journal,
    fail_at: Option<DsiStep>,
    writes: usize,
}

impl MockDsi {
    /// Transport that accepts everything
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail_at: None,
            writes: 0,
        }
    }

    /// Fail at `step` (the failing call is not journaled)
    #[must_use]
    pub fn failing_at(mut self, step: DsiStep) -> Self {
        self.fail_at = Some(step);
        self
    }
}

impl DsiTransport for MockDsi {
    type Error = MockError;

    fn attach(&mut self, link: &LinkConfig) -> Result<(), MockError> {
        if self.fail_at == Some(DsiStep::Attach) {
            return Err(MockError);
        }
        self.journal.push(Event::Attach(*link));
        Ok(())
    }

    fn dcs_write_buffer(&mut self, data: &[u8]) -> Result<(), MockError> {
        let index = self.writes;
        self.writes = self.writes.saturating_add(1);
        if self.fail_at == Some(DsiStep::Write(index)) {
            return Err(MockError);
        }
        self.journal.push(Event::Write(data.to_vec()));
        Ok(())
    }

    fn dcs_exit_sleep_mode(&mut self) -> Result<(), MockError> {
        if self.fail_at == Some(DsiStep::ExitSleep) {
            return Err(MockError);
        }
        self.journal.push(Event::ExitSleep);
        Ok(())
    }

    fn dcs_set_display_on(&mut self) -> Result<(), MockError> {
        if self.fail_at == Some(DsiStep::DisplayOn) {
            return Err(MockError);
        }
        self.journal.push(Event::DisplayOn);
        Ok(())
    }
}

/// Mock reset/output pin
pub struct MockPin {
    journal: Journal,
    fail: bool,
}

impl MockPin {
    /// Pin journaling into `journal`
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: false,
        }
    }

    /// Pin whose every level change fails; nothing is journaled
    pub fn failing(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: true,
        }
    }
}

impl ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.journal.push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.journal.push(Event::Reset(true));
        Ok(())
    }
}

/// Mock delay; records instead of sleeping
pub struct MockDelay {
    journal: Journal,
}

impl MockDelay {
    /// Delay journaling into `journal`
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.journal.push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.journal.push(Event::DelayMs(ms));
    }
}

/// Mock regulator
pub struct MockRegulator {
    journal: Journal,
    fail: bool,
}

impl MockRegulator {
    /// Regulator journaling into `journal`
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: false,
        }
    }

    /// Regulator whose `set_enable` always fails
    pub fn failing(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: true,
        }
    }
}

impl Regulator for MockRegulator {
    type Error = MockError;

    fn set_enable(&mut self, enable: bool) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.journal.push(Event::Regulator(enable));
        Ok(())
    }
}

/// Mock backlight
pub struct MockBacklight {
    journal: Journal,
    fail: bool,
}

impl MockBacklight {
    /// Backlight journaling into `journal`
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: false,
        }
    }

    /// Backlight whose operations always fail
    pub fn failing(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: true,
        }
    }
}

impl Backlight for MockBacklight {
    type Error = MockError;

    fn set_brightness(&mut self, level: Brightness) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.journal.push(Event::Brightness(level.get()));
        Ok(())
    }
}

/// Mock hardware description.
///
/// Every resource is present by default; use the `with_*` builders to make
/// a lookup fail.
pub struct MockNode {
    journal: Journal,
    compatible: &'static str,
    supply: Result<(), LookupError>,
    regulator_fails: bool,
    reset: Result<(), LookupError>,
    reset_line_fails: bool,
    backlight: Result<(), LookupError>,
    backlight_fails: bool,
    requested_gpio_flags: Option<GpioFlags>,
}

impl MockNode {
    /// Node with every resource present
    pub fn new(journal: &Journal, compatible: &'static str) -> Self {
        Self {
            journal: journal.clone(),
            compatible,
            supply: Ok(()),
            regulator_fails: false,
            reset: Ok(()),
            reset_line_fails: false,
            backlight: Ok(()),
            backlight_fails: false,
            requested_gpio_flags: None,
        }
    }

    /// Make the `power-supply` lookup fail with `err`
    #[must_use]
    pub fn with_supply_error(mut self, err: LookupError) -> Self {
        self.supply = Err(err);
        self
    }

    /// Resolve a regulator whose enable call fails
    #[must_use]
    pub fn with_failing_regulator(mut self) -> Self {
        self.regulator_fails = true;
        self
    }

    /// Make the `reset-gpios` lookup fail with `err`
    #[must_use]
    pub fn with_reset_error(mut self, err: LookupError) -> Self {
        self.reset = Err(err);
        self
    }

    /// Resolve a reset line whose level changes fail
    #[must_use]
    pub fn with_failing_reset_line(mut self) -> Self {
        self.reset_line_fails = true;
        self
    }

    /// Make the `backlight` lookup fail with `err`
    #[must_use]
    pub fn with_backlight_error(mut self, err: LookupError) -> Self {
        self.backlight = Err(err);
        self
    }

    /// Resolve a backlight whose operations fail
    #[must_use]
    pub fn with_failing_backlight(mut self) -> Self {
        self.backlight_fails = true;
        self
    }

    /// Flags passed to the last `gpio_by_name` call
    pub fn requested_gpio_flags(&self) -> Option<GpioFlags> {
        self.requested_gpio_flags
    }
}

impl DeviceNode for MockNode {
    type Regulator = MockRegulator;
    type ResetPin = MockPin;
    type Backlight = MockBacklight;

    fn compatible(&self) -> &str {
        self.compatible
    }

    fn supply_regulator(&mut self, _prop: &str) -> Result<MockRegulator, LookupError> {
        self.supply?;
        if self.regulator_fails {
            Ok(MockRegulator::failing(&self.journal))
        } else {
            Ok(MockRegulator::new(&self.journal))
        }
    }

    fn gpio_by_name(
        &mut self,
        _prop: &str,
        _index: usize,
        flags: GpioFlags,
    ) -> Result<MockPin, LookupError> {
        self.requested_gpio_flags = Some(flags);
        self.reset?;
        if self.reset_line_fails {
            Ok(MockPin::failing(&self.journal))
        } else {
            Ok(MockPin::new(&self.journal))
        }
    }

    fn backlight_by_phandle(&mut self, _prop: &str) -> Result<MockBacklight, LookupError> {
        self.backlight?;
        if self.backlight_fails {
            Ok(MockBacklight::failing(&self.journal))
        } else {
            Ok(MockBacklight::new(&self.journal))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_orders_events_across_mocks() {
        let journal = Journal::new();
        let mut pin = MockPin::new(&journal);
        let mut delay = MockDelay::new(&journal);
        let mut dsi = MockDsi::new(&journal);

        pin.set_low().unwrap();
        delay.delay_ms(5);
        dsi.dcs_write_buffer(&[0x01, 0x02]).unwrap();

        assert_eq!(
            journal.events(),
            vec![Event::Reset(false), Event::DelayMs(5), Event::Write(vec![0x01, 0x02])]
        );
        assert_eq!(journal.writes(), vec![vec![0x01, 0x02]]);
    }

    #[test]
    fn test_failing_pin_reports_errors_without_journaling() {
        let journal = Journal::new();
        let mut pin = MockPin::failing(&journal);
        assert_eq!(pin.set_low(), Err(MockError));
        assert_eq!(pin.set_high(), Err(MockError));
        assert!(journal.events().is_empty());
    }

    #[test]
    fn test_dsi_fails_only_at_injected_write() {
        let journal = Journal::new();
        let mut dsi = MockDsi::new(&journal).failing_at(DsiStep::Write(1));
        assert!(dsi.dcs_write_buffer(&[0xA0]).is_ok());
        assert!(dsi.dcs_write_buffer(&[0xA1]).is_err());
        assert!(dsi.dcs_write_buffer(&[0xA2]).is_ok());
        assert_eq!(journal.writes(), vec![vec![0xA0], vec![0xA2]]);
    }

    #[test]
    fn test_node_lookup_errors() {
        let journal = Journal::new();
        let mut node = MockNode::new(&journal, "acme,panel")
            .with_supply_error(LookupError::NotFound)
            .with_backlight_error(LookupError::Busy);
        assert_eq!(node.compatible(), "acme,panel");
        assert!(matches!(node.supply_regulator("power-supply"), Err(LookupError::NotFound)));
        assert!(node.gpio_by_name("reset-gpios", 0, GpioFlags::IS_OUT).is_ok());
        assert_eq!(node.requested_gpio_flags(), Some(GpioFlags::IS_OUT));
        assert!(matches!(node.backlight_by_phandle("backlight"), Err(LookupError::Busy)));
    }
}
