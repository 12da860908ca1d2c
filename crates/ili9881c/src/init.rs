//! ILI9881C register init sequence
//!
//! The controller banks its vendor registers into pages. A table entry whose
//! command byte is [`PAGE_SWITCH`] selects a page instead of writing a
//! register: its data byte is the page index, sent behind the three-byte
//! `FF 98 81` magic. Every other entry is a plain `(cmd, data)` DCS write.
//!
//! ```text
//! table:   (FF, 01) (B2, 10) ...
//! wire:    FF 98 81 01 | B2 10 | ... | FF 98 81 00 | 11 00 | <120 ms> | 29 00
//! ```

use embedded_hal::delay::DelayNs;
use platform::{DcsCommand, DsiTransport};

use crate::config::SEQUENCE_EXIT_SLEEP_MS;
use crate::PanelError;

/// Command byte reserved for page selection
pub const PAGE_SWITCH: u8 = 0xFF;

/// Prefix of every page-select payload
pub const PAGE_MAGIC: [u8; 3] = [0xFF, 0x98, 0x81];

/// One init-table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    /// Register, or [`PAGE_SWITCH`]
    pub cmd: u8,
    /// Register value, or page index
    pub data: u8,
}

/// Table entry constructor
pub const fn cmd(cmd: u8, data: u8) -> Instr {
    Instr { cmd, data }
}

/// Table entry selecting register page `page`
pub const fn page(page: u8) -> Instr {
    Instr {
        cmd: PAGE_SWITCH,
        data: page,
    }
}

/// Wire payload for one table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// `FF 98 81 <page>`
    Page([u8; 4]),
    /// `<cmd> <data>`
    Command([u8; 2]),
}

impl Payload {
    /// Bytes handed to the transport
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Page(buf) => buf.as_slice(),
            Self::Command(buf) => buf.as_slice(),
        }
    }
}

impl Instr {
    /// `true` if this entry selects a register page
    pub const fn is_page_switch(&self) -> bool {
        self.cmd == PAGE_SWITCH
    }

    /// Encode for the wire
    pub const fn payload(&self) -> Payload {
        if self.is_page_switch() {
            let [a, b, c] = PAGE_MAGIC;
            Payload::Page([a, b, c, self.data])
        } else {
            Payload::Command([self.cmd, self.data])
        }
    }
}

/// Vendor init table for the PH720128T003-ZBC02 module.
pub const PH720128T003_INIT: &[Instr] = &[cmd(0xB2, 0x10)];

/// Select register page `page`.
pub fn switch_page<DSI: DsiTransport>(dsi: &mut DSI, page: u8) -> Result<(), PanelError> {
    dsi.dcs_write_buffer(self::page(page).payload().as_bytes())
        .map_err(|_| PanelError::Write { cmd: PAGE_SWITCH })
}

/// Write `data` to register `cmd` on the current page.
pub fn send_cmd_data<DSI: DsiTransport>(dsi: &mut DSI, cmd: u8, data: u8) -> Result<(), PanelError> {
    debug!("ili9881c: send cmd {:#x} data {:#x}", cmd, data);
    dsi.dcs_write_buffer(&[cmd, data])
        .map_err(|_| PanelError::Write { cmd })
}

/// Apply `table` in order, return to page 0, then exit sleep and turn the
/// display on with plain DCS writes.
///
/// Stops at the first failed write and returns it; nothing after the failing
/// entry is sent.
pub fn run_init_sequence<DSI, D>(
    dsi: &mut DSI,
    delay: &mut D,
    table: &[Instr],
) -> Result<(), PanelError>
where
    DSI: DsiTransport,
    D: DelayNs,
{
    info!("ili9881c: applying {} init entries", table.len());

    for instr in table {
        let result = if instr.is_page_switch() {
            switch_page(dsi, instr.data)
        } else {
            send_cmd_data(dsi, instr.cmd, instr.data)
        };
        if let Err(e) = result {
            error!("ili9881c: setup failed with cmd {:#x}", instr.cmd);
            return Err(e);
        }
    }

    switch_page(dsi, 0)?;

    let exit_sleep = DcsCommand::ExitSleepMode as u8;
    dsi.dcs_write_buffer(&[exit_sleep, 0x00])
        .map_err(|_| PanelError::Write { cmd: exit_sleep })?;
    delay.delay_ms(SEQUENCE_EXIT_SLEEP_MS);

    let display_on = DcsCommand::SetDisplayOn as u8;
    dsi.dcs_write_buffer(&[display_on, 0x00])
        .map_err(|_| PanelError::Write { cmd: display_on })
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::mocks::{DsiStep, Event, Journal, MockDelay, MockDsi};

    #[test]
    fn test_page_entry_payload() {
        assert_eq!(page(3).payload().as_bytes(), &[0xFF, 0x98, 0x81, 0x03]);
        assert!(page(0).is_page_switch());
    }

    #[test]
    fn test_command_entry_payload() {
        assert_eq!(cmd(0xB2, 0x10).payload(), Payload::Command([0xB2, 0x10]));
        assert!(!cmd(0xFE, 0x00).is_page_switch());
    }

    #[test]
    fn test_shipped_table_wire_sequence() {
        let journal = Journal::new();
        let mut dsi = MockDsi::new(&journal);
        let mut delay = MockDelay::new(&journal);

        run_init_sequence(&mut dsi, &mut delay, PH720128T003_INIT).unwrap();

        assert_eq!(
            journal.events(),
            vec![
                Event::Write(vec![0xB2, 0x10]),
                Event::Write(vec![0xFF, 0x98, 0x81, 0x00]),
                Event::Write(vec![0x11, 0x00]),
                Event::DelayMs(120),
                Event::Write(vec![0x29, 0x00]),
            ]
        );
    }

    #[test]
    fn test_mixed_table_keeps_order() {
        let journal = Journal::new();
        let mut dsi = MockDsi::new(&journal);
        let mut delay = MockDelay::new(&journal);
        let table = [page(1), cmd(0x01, 0x00), cmd(0x02, 0x03), page(4), cmd(0x6C, 0x15)];

        run_init_sequence(&mut dsi, &mut delay, &table).unwrap();

        let writes = journal.writes();
        assert_eq!(
            writes[..5],
            [
                vec![0xFF, 0x98, 0x81, 0x01],
                vec![0x01, 0x00],
                vec![0x02, 0x03],
                vec![0xFF, 0x98, 0x81, 0x04],
                vec![0x6C, 0x15],
            ]
        );
        assert_eq!(writes.len(), 8);
    }

    #[test]
    fn test_failed_entry_aborts_remaining_table() {
        let journal = Journal::new();
        let mut dsi = MockDsi::new(&journal).failing_at(DsiStep::Write(1));
        let mut delay = MockDelay::new(&journal);
        let table = [cmd(0xA0, 0x01), cmd(0xA1, 0x02), cmd(0xA2, 0x03)];

        let result = run_init_sequence(&mut dsi, &mut delay, &table);

        assert_eq!(result, Err(PanelError::Write { cmd: 0xA1 }));
        assert_eq!(journal.events(), vec![Event::Write(vec![0xA0, 0x01])]);
    }

    #[test]
    fn test_failed_page_switch_reports_page_command() {
        let journal = Journal::new();
        let mut dsi = MockDsi::new(&journal).failing_at(DsiStep::Write(0));
        let mut delay = MockDelay::new(&journal);

        let result = run_init_sequence(&mut dsi, &mut delay, &[page(1)]);

        assert_eq!(result, Err(PanelError::Write { cmd: PAGE_SWITCH }));
        assert!(journal.events().is_empty());
    }

    #[test]
    fn test_failed_trailing_exit_sleep_skips_delay() {
        let journal = Journal::new();
        // shipped table: write 0 = B2, 1 = page 0, 2 = exit sleep
        let mut dsi = MockDsi::new(&journal).failing_at(DsiStep::Write(2));
        let mut delay = MockDelay::new(&journal);

        let result = run_init_sequence(&mut dsi, &mut delay, PH720128T003_INIT);

        assert_eq!(result, Err(PanelError::Write { cmd: 0x11 }));
        assert!(!journal.events().contains(&Event::DelayMs(120)));
    }

    #[test]
    fn test_empty_table_still_wakes_panel() {
        let journal = Journal::new();
        let mut dsi = MockDsi::new(&journal);
        let mut delay = MockDelay::new(&journal);

        run_init_sequence(&mut dsi, &mut delay, &[]).unwrap();

        assert_eq!(
            journal.writes(),
            vec![vec![0xFF, 0x98, 0x81, 0x00], vec![0x11, 0x00], vec![0x29, 0x00]]
        );
    }
}
