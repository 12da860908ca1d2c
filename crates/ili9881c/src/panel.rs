//! ILI9881C panel lifecycle
//!
//! The host drives a panel instance through three calls, in order:
//!
//! 1. [`Ili9881cPanel::ofdata_to_platdata`]: resolve regulator, reset GPIO
//!    and backlight from the hardware description.
//! 2. [`Ili9881cPanel::probe`]: power on, pulse reset, fill in the DSI
//!    link parameters.
//! 3. [`PanelOps::enable_backlight`]: attach, run the init table, exit
//!    sleep, display on.
//!
//! ```text
//! Unpowered ─probe→ ResetPulsed ─attach→ Attached ─table→ Sequenced
//!                                 ─exit sleep→ Awake ─display on→ DisplayOn
//! ```
//!
//! A failed step leaves the state at the last step that succeeded. There is
//! no way back other than dropping the instance and probing again.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use platform::{
    Backlight, Brightness, DeviceNode, DisplayTiming, DsiPanelPlat, DsiTransport, GpioDesc,
    GpioError, GpioFlags, PanelOps, Regulator,
};

use crate::config::{
    BACKLIGHT_PROP, DCS_SETTLE_MS, DEFAULT_TIMING, LINK_CONFIG, RESET_PROP, RESET_TIMING,
    SUPPLY_PROP,
};
use crate::init::{run_init_sequence, PH720128T003_INIT};
use crate::PanelError;

/// Bring-up progress of one panel instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Resources resolved, nothing driven yet
    Unpowered,
    /// Supply on, reset pulse train done, link parameters set
    ResetPulsed,
    /// DSI host accepted the attach
    Attached,
    /// Init table applied
    Sequenced,
    /// Out of sleep mode
    Awake,
    /// Scanning out
    DisplayOn,
}

/// PowerTip PH720128T003-ZBC02 (ILI9881C) MIPI-DSI panel.
///
/// Generic over:
/// - `DSI`: the [`DsiTransport`] for the panel's virtual channel.
/// - `REG`: the optional supply [`Regulator`].
/// - `RST`: the reset line, an [`embedded_hal::digital::OutputPin`].
/// - `BL`: the [`Backlight`] device.
/// - `D`: an [`embedded_hal::delay::DelayNs`] for the fixed waits.
pub struct Ili9881cPanel<DSI, REG, RST, BL, D> {
    plat: DsiPanelPlat<DSI>,
    reg: Option<REG>,
    reset: GpioDesc<RST>,
    backlight: BL,
    delay: D,
    state: PanelState,
}

impl<DSI, REG, RST, BL, D> Ili9881cPanel<DSI, REG, RST, BL, D>
where
    DSI: DsiTransport,
    REG: Regulator,
    RST: OutputPin,
    BL: Backlight,
    D: DelayNs,
{
    /// Resolve the panel's resources from `node`.
    ///
    /// A missing regulator or reset GPIO is tolerated; any other lookup
    /// failure on those, and any failure to resolve the backlight, aborts.
    pub fn ofdata_to_platdata<N>(
        node: &mut N,
        plat: DsiPanelPlat<DSI>,
        delay: D,
    ) -> Result<Self, PanelError>
    where
        N: DeviceNode<Regulator = REG, ResetPin = RST, Backlight = BL>,
    {
        let reg = match node.supply_regulator(SUPPLY_PROP) {
            Ok(reg) => Some(reg),
            Err(e) if e.is_not_found() => {
                debug!("ili9881c: no power supply");
                None
            }
            Err(e) => {
                error!("ili9881c: cannot get power supply: {}", e);
                return Err(PanelError::Supply(e));
            }
        };

        let reset = match node.gpio_by_name(RESET_PROP, 0, GpioFlags::IS_OUT) {
            Ok(pin) => GpioDesc::new(pin),
            Err(e) => {
                warn!("ili9881c: cannot get reset GPIO: {}", e);
                if !e.is_not_found() {
                    return Err(PanelError::ResetGpio(e));
                }
                GpioDesc::unrequested()
            }
        };

        let backlight = node.backlight_by_phandle(BACKLIGHT_PROP).map_err(|e| {
            error!("ili9881c: cannot get backlight: {}", e);
            PanelError::BacklightLookup(e)
        })?;

        Ok(Self {
            plat,
            reg,
            reset,
            backlight,
            delay,
            state: PanelState::Unpowered,
        })
    }

    /// Power the panel, pulse reset and set the DSI link parameters.
    ///
    /// Reset line errors are logged and ignored; only a regulator failure
    /// is reported.
    pub fn probe(&mut self) -> Result<(), PanelError> {
        if let Some(reg) = self.reg.as_mut() {
            reg.set_enable(true).map_err(|_| PanelError::Regulator)?;
        }

        if !self.reset.is_valid() {
            debug!("ili9881c: reset GPIO not requested, timing reset only");
        }
        for _ in 0..RESET_TIMING.pulses {
            trace!("ili9881c: reset asserted");
            self.drive_reset(false);
            self.delay.delay_ms(RESET_TIMING.low_ms);
            trace!("ili9881c: reset released");
            self.drive_reset(true);
            self.delay.delay_ms(RESET_TIMING.high_ms);
        }
        self.delay.delay_ms(RESET_TIMING.settle_ms);

        self.plat.set_link(LINK_CONFIG);
        self.state = PanelState::ResetPulsed;
        info!("ili9881c: probed, {} lanes", LINK_CONFIG.lanes);
        Ok(())
    }

    fn drive_reset(&mut self, level: bool) {
        match self.reset.set_value(level) {
            Ok(()) | Err(GpioError::NotRequested) => {}
            Err(e) => warn!("ili9881c: reset line: {}", e),
        }
    }

    /// Current bring-up state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// DSI platform data (link parameters are valid after `probe`)
    pub fn plat(&self) -> &DsiPanelPlat<DSI> {
        &self.plat
    }

    /// `true` if a supply regulator was resolved
    pub fn has_regulator(&self) -> bool {
        self.reg.is_some()
    }

    /// `true` if a reset GPIO was resolved
    pub fn has_reset_gpio(&self) -> bool {
        self.reset.is_valid()
    }
}

impl<DSI, REG, RST, BL, D> PanelOps for Ili9881cPanel<DSI, REG, RST, BL, D>
where
    DSI: DsiTransport,
    REG: Regulator,
    RST: OutputPin,
    BL: Backlight,
    D: DelayNs,
{
    type Error = PanelError;

    fn enable_backlight(&mut self) -> Result<(), PanelError> {
        let link = self.plat.link();
        self.plat
            .device
            .attach(&link)
            .map_err(|_| PanelError::Attach)?;
        self.state = PanelState::Attached;

        run_init_sequence(&mut self.plat.device, &mut self.delay, PH720128T003_INIT)?;
        self.state = PanelState::Sequenced;

        self.plat
            .device
            .dcs_exit_sleep_mode()
            .map_err(|_| PanelError::ExitSleep)?;
        self.delay.delay_ms(DCS_SETTLE_MS);
        self.state = PanelState::Awake;

        self.plat
            .device
            .dcs_set_display_on()
            .map_err(|_| PanelError::DisplayOn)?;
        self.delay.delay_ms(DCS_SETTLE_MS);
        self.state = PanelState::DisplayOn;

        info!(
            "ili9881c: display on, {}x{}@{}Hz",
            DEFAULT_TIMING.hactive.typ,
            DEFAULT_TIMING.vactive.typ,
            DEFAULT_TIMING.frame_rate_hz()
        );
        Ok(())
    }

    fn set_backlight(&mut self, level: Brightness) -> Result<(), PanelError> {
        self.backlight
            .set_brightness(level)
            .map_err(|_| PanelError::Backlight)
    }

    fn get_display_timing(&self, timing: &mut DisplayTiming) -> Result<(), PanelError> {
        *timing = DEFAULT_TIMING;
        Ok(())
    }
}
