//! Reset line tests: verify the exact pin transitions produced by probe
//! using `embedded-hal-mock` expectations on a real `OutputPin` mock.
//!
//! Run with: cargo test -p ili9881c --test reset_sequence

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use ili9881c::{Ili9881cPanel, PanelState};
use platform::mocks::{Journal, MockBacklight, MockDsi, MockRegulator};
use platform::{DeviceNode, DsiPanelPlat, GpioFlags, LookupError};

/// Node whose reset GPIO is an `embedded-hal-mock` pin.
struct PinMockNode {
    journal: Journal,
    reset: Option<PinMock>,
}

impl DeviceNode for PinMockNode {
    type Regulator = MockRegulator;
    type ResetPin = PinMock;
    type Backlight = MockBacklight;

    fn compatible(&self) -> &str {
        "powertip,ph720128t003-zbc02"
    }

    fn supply_regulator(&mut self, _prop: &str) -> Result<MockRegulator, LookupError> {
        Err(LookupError::NotFound)
    }

    fn gpio_by_name(
        &mut self,
        prop: &str,
        index: usize,
        flags: GpioFlags,
    ) -> Result<PinMock, LookupError> {
        assert_eq!(prop, "reset-gpios");
        assert_eq!(index, 0);
        assert!(flags.contains(GpioFlags::IS_OUT));
        self.reset.take().ok_or(LookupError::NotFound)
    }

    fn backlight_by_phandle(&mut self, _prop: &str) -> Result<MockBacklight, LookupError> {
        Ok(MockBacklight::new(&self.journal))
    }
}

fn pulse_expectations(pulses: usize) -> Vec<PinTransaction> {
    (0..pulses)
        .flat_map(|_| {
            [
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ]
        })
        .collect()
}

/// Exactly three low→high pulses, nothing else on the line.
#[test]
fn test_probe_pulses_reset_three_times() {
    let journal = Journal::new();
    let mut pin = PinMock::new(&pulse_expectations(3));
    let mut node = PinMockNode {
        journal: journal.clone(),
        reset: Some(pin.clone()),
    };

    let mut panel = Ili9881cPanel::ofdata_to_platdata(
        &mut node,
        DsiPanelPlat::new(MockDsi::new(&journal)),
        NoopDelay,
    )
    .expect("parse must succeed");
    panel.probe().expect("probe must succeed");

    assert_eq!(panel.state(), PanelState::ResetPulsed);
    pin.done();
}

/// Probing twice repeats the full pulse train; no pulse is skipped because
/// the line is already high.
#[test]
fn test_reprobe_repeats_pulse_train() {
    let journal = Journal::new();
    let mut pin = PinMock::new(&pulse_expectations(6));
    let mut node = PinMockNode {
        journal: journal.clone(),
        reset: Some(pin.clone()),
    };

    let mut panel = Ili9881cPanel::ofdata_to_platdata(
        &mut node,
        DsiPanelPlat::new(MockDsi::new(&journal)),
        NoopDelay,
    )
    .expect("parse must succeed");
    panel.probe().expect("first probe");
    panel.probe().expect("second probe");

    pin.done();
}
