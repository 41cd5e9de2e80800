//! Line-command panel
//!
//! Ties the serial line receiver to a character display. Each call to
//! [`Panel::poll`] is one cooperative pass: take whatever input has
//! arrived, then act on a completed line if there is one.

use liftpanel_hal::UartRx;
use liftpanel_protocol::{LineCommand, LineReceiver, Row};

use crate::backend::{CharDisplay, DisplayError};
use crate::config::PanelConfig;

/// Longest row any supported display has in RAM
const MAX_ROW_LEN: usize = 40;

/// Source of blanking spaces
const BLANK_ROW: [u8; MAX_ROW_LEN] = [b' '; MAX_ROW_LEN];

/// Outcome of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// No complete line yet
    Idle,
    /// A row was rewritten
    Applied(Row),
    /// A complete line had no recognized prefix
    Ignored,
}

/// Errors from one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError<E> {
    /// Reading the serial input failed
    Serial(E),
    /// Writing to the display failed; the line was still consumed
    Display(DisplayError),
}

/// Receiver/dispatcher context for one display
pub struct Panel<D> {
    display: D,
    receiver: LineReceiver,
    config: PanelConfig,
}

impl<D: CharDisplay> Panel<D> {
    /// Create a panel around a display
    pub fn new(display: D, config: PanelConfig) -> Self {
        Self {
            display,
            receiver: LineReceiver::with_default_capacity(),
            config,
        }
    }

    /// Initialize the display and show the greeting
    pub fn start(&mut self) -> Result<(), DisplayError> {
        self.display.init()?;
        self.display.set_backlight(true)?;
        self.display.clear()?;

        for (row, text) in Row::ALL.iter().zip(self.config.greeting) {
            self.display.set_cursor(0, row.index())?;
            self.display.write_str(text)?;
        }
        Ok(())
    }

    /// Run one pass: drain available input, then dispatch if a line is ready
    pub fn poll<R: UartRx>(&mut self, rx: &mut R) -> Result<Dispatch, PanelError<R::Error>> {
        self.receiver.drain(rx).map_err(PanelError::Serial)?;
        self.dispatch().map_err(PanelError::Display)
    }

    /// Apply the pending line, if any, and reset the receiver
    ///
    /// The receiver is cleared even when the display write fails.
    pub fn dispatch(&mut self) -> Result<Dispatch, DisplayError> {
        let Some(line) = self.receiver.line() else {
            return Ok(Dispatch::Idle);
        };

        let result = match LineCommand::parse(line) {
            LineCommand::SetLine { row, text } => {
                replace_row(&mut self.display, row, text).map(|()| Dispatch::Applied(row))
            }
            LineCommand::Ignored => Ok(Dispatch::Ignored),
        };

        self.receiver.clear();
        result
    }

    /// Feed bytes directly, as if they had arrived on the serial line
    ///
    /// Consumes input up to the end of the first complete line and returns
    /// the number of bytes taken. Pass the remainder again after
    /// [`dispatch`](Self::dispatch).
    pub fn receive(&mut self, bytes: &[u8]) -> usize {
        self.receiver.feed_slice(bytes)
    }

    /// Get the line receiver
    pub fn receiver(&self) -> &LineReceiver {
        &self.receiver
    }

    /// Get the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get the display mutably
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Release the display
    pub fn into_display(self) -> D {
        self.display
    }
}

/// Blank `row`, then write `text` from column 0
///
/// Text is not truncated; what happens past the last column is up to the
/// display.
fn replace_row<D: CharDisplay>(display: &mut D, row: Row, text: &[u8]) -> Result<(), DisplayError> {
    let (cols, _) = display.dimensions();
    let cols = (cols as usize).min(MAX_ROW_LEN);

    display.set_cursor(0, row.index())?;
    display.write_bytes(&BLANK_ROW[..cols])?;
    display.set_cursor(0, row.index())?;
    display.write_bytes(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use liftpanel_hal::SerialError;
    use proptest::prelude::*;
    use std::string::String;
    use std::vec::Vec;

    /// Serial source fed by the test, one chunk per "arrival"
    #[derive(Default)]
    struct TestRx {
        bytes: Vec<u8>,
        error: Option<SerialError>,
    }

    impl TestRx {
        fn push(&mut self, bytes: &[u8]) {
            self.bytes.extend_from_slice(bytes);
        }
    }

    impl UartRx for TestRx {
        type Error = SerialError;

        fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            if let Some(e) = self.error.take() {
                return Err(e);
            }
            if self.bytes.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.bytes.remove(0)))
            }
        }

        fn has_pending(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.bytes.is_empty())
        }
    }

    /// Display whose bus has gone away after startup
    struct DeadDisplay;

    impl CharDisplay for DeadDisplay {
        fn init(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
        fn set_backlight(&mut self, _on: bool) -> Result<(), DisplayError> {
            Ok(())
        }
        fn set_cursor(&mut self, _col: u8, _row: u8) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }
        fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }
        fn dimensions(&self) -> (u8, u8) {
            (16, 2)
        }
    }

    fn started() -> Panel<Surface> {
        let mut panel = Panel::new(Surface::new(), PanelConfig::default());
        panel.start().unwrap();
        panel
    }

    fn rows(panel: &Panel<Surface>) -> (String, String) {
        let surface = panel.display();
        (
            String::from(surface.row_str(0).unwrap()),
            String::from(surface.row_str(1).unwrap()),
        )
    }

    fn send(panel: &mut Panel<Surface>, bytes: &[u8]) -> Dispatch {
        let mut rx = TestRx::default();
        rx.push(bytes);
        panel.poll(&mut rx).unwrap()
    }

    fn padded(text: &str) -> String {
        std::format!("{:<16}", text)
    }

    #[test]
    fn test_startup_greeting() {
        let panel = started();
        assert_eq!(rows(&panel), (padded("Elevator System"), padded("Ready...")));
        assert!(panel.display().backlight());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut panel = started();

        assert_eq!(send(&mut panel, b"L1:Floor 3\n"), Dispatch::Applied(Row::Top));
        assert_eq!(rows(&panel), (padded("Floor 3"), padded("Ready...")));
        assert_eq!(rows(&panel).0, "Floor 3         ");

        assert_eq!(send(&mut panel, b"L2:Moving Up\n"), Dispatch::Applied(Row::Bottom));
        assert_eq!(rows(&panel), (padded("Floor 3"), padded("Moving Up")));
    }

    #[test]
    fn test_unknown_prefix_leaves_display() {
        let mut panel = started();
        let before = panel.display().clone();

        assert_eq!(send(&mut panel, b"PING\n"), Dispatch::Ignored);
        assert_eq!(send(&mut panel, b"\n"), Dispatch::Ignored);
        assert_eq!(send(&mut panel, b"L3:x\n"), Dispatch::Ignored);

        assert_eq!(panel.display(), &before);
        assert!(!panel.receiver().is_ready());
    }

    #[test]
    fn test_shorter_text_leaves_no_residue() {
        let mut panel = started();
        send(&mut panel, b"L1:Going down\n");
        send(&mut panel, b"L1:B\n");
        assert_eq!(rows(&panel).0, padded("B"));
    }

    #[test]
    fn test_empty_remainder_blanks_row() {
        let mut panel = started();
        assert_eq!(send(&mut panel, b"L1:\n"), Dispatch::Applied(Row::Top));
        assert_eq!(rows(&panel), (padded(""), padded("Ready...")));
    }

    #[test]
    fn test_carriage_return_is_displayed() {
        let mut panel = started();
        send(&mut panel, b"L2:Up\r\n");
        assert_eq!(panel.display().row(1).unwrap()[..3], *b"Up\r");
    }

    #[test]
    fn test_overlong_text_fills_row() {
        let mut panel = started();
        send(&mut panel, b"L2:0123456789abcdefOVERFLOW\n");
        assert_eq!(rows(&panel), (padded("Elevator System"), padded("0123456789abcdef")));
    }

    #[test]
    fn test_line_split_across_polls() {
        let mut panel = started();
        let mut rx = TestRx::default();

        rx.push(b"L1:Flo");
        assert_eq!(panel.poll(&mut rx), Ok(Dispatch::Idle));
        assert_eq!(rows(&panel).0, padded("Elevator System"));

        rx.push(b"or 7\n");
        assert_eq!(panel.poll(&mut rx), Ok(Dispatch::Applied(Row::Top)));
        assert_eq!(rows(&panel).0, padded("Floor 7"));
    }

    #[test]
    fn test_burst_is_applied_in_order() {
        let mut panel = started();
        let mut rx = TestRx::default();
        rx.push(b"L1:A\nL2:B\nL1:C\n");

        assert_eq!(panel.poll(&mut rx), Ok(Dispatch::Applied(Row::Top)));
        assert_eq!(panel.poll(&mut rx), Ok(Dispatch::Applied(Row::Bottom)));
        assert_eq!(panel.poll(&mut rx), Ok(Dispatch::Applied(Row::Top)));
        assert_eq!(panel.poll(&mut rx), Ok(Dispatch::Idle));
        assert_eq!(rows(&panel), (padded("C"), padded("B")));
    }

    #[test]
    fn test_serial_error_is_reported() {
        let mut panel = started();
        let mut rx = TestRx {
            error: Some(SerialError::Framing),
            ..TestRx::default()
        };
        rx.push(b"L1:ok\n");

        assert_eq!(panel.poll(&mut rx), Err(PanelError::Serial(SerialError::Framing)));
        assert_eq!(panel.poll(&mut rx), Ok(Dispatch::Applied(Row::Top)));
        assert_eq!(rows(&panel).0, padded("ok"));
    }

    #[test]
    fn test_display_failure_still_consumes_line() {
        let mut panel = Panel::new(DeadDisplay, PanelConfig::default());
        panel.receive(b"L1:lost\n");

        assert_eq!(panel.dispatch(), Err(DisplayError::Communication));
        assert!(!panel.receiver().is_ready());
        assert!(panel.receiver().pending().is_empty());
    }

    #[test]
    fn test_receive_burst_keeps_later_lines() {
        let mut panel = started();
        let mut burst: &[u8] = b"L1:A\nL2:B\n";
        let mut applied = Vec::new();

        while !burst.is_empty() {
            let used = panel.receive(burst);
            burst = &burst[used..];
            applied.push(panel.dispatch().unwrap());
        }

        assert_eq!(applied, [Dispatch::Applied(Row::Top), Dispatch::Applied(Row::Bottom)]);
        assert_eq!(panel.display().row_str(0), Some("A               "));
        assert_eq!(panel.display().row_str(1), Some("B               "));
    }

    #[test]
    fn test_dispatch_without_line_is_idle() {
        let mut panel = started();
        assert_eq!(panel.receive(b"L1:partial"), 10);
        assert_eq!(panel.dispatch(), Ok(Dispatch::Idle));
        assert_eq!(panel.receiver().pending(), b"L1:partial");
    }

    proptest! {
        #[test]
        fn prop_set_line_touches_only_its_row(
            text in "[ -~]{0,16}",
            bottom in any::<bool>(),
        ) {
            let mut panel = started();
            let (prefix, row) = if bottom { ("L2:", Row::Bottom) } else { ("L1:", Row::Top) };
            let before = rows(&panel);

            let line = std::format!("{}{}\n", prefix, text);
            prop_assert_eq!(send(&mut panel, line.as_bytes()), Dispatch::Applied(row));

            let after = rows(&panel);
            if bottom {
                prop_assert_eq!(&after.0, &before.0);
                prop_assert_eq!(&after.1, &padded(&text));
            } else {
                prop_assert_eq!(&after.0, &padded(&text));
                prop_assert_eq!(&after.1, &before.1);
            }
        }

        #[test]
        fn prop_repeating_a_command_is_idempotent(text in "[ -~]{0,16}") {
            let line = std::format!("L1:{}\n", text);

            let mut once = started();
            send(&mut once, line.as_bytes());

            let mut twice = started();
            send(&mut twice, line.as_bytes());
            send(&mut twice, line.as_bytes());

            prop_assert_eq!(once.display(), twice.display());
        }

        #[test]
        fn prop_unprefixed_lines_change_nothing(
            line in "[ -~]{0,24}".prop_filter("not a row command", |s| !s.starts_with("L1:") && !s.starts_with("L2:"))
        ) {
            let mut panel = started();
            let before = panel.display().clone();
            let framed = std::format!("{}\n", line);

            prop_assert_eq!(send(&mut panel, framed.as_bytes()), Dispatch::Ignored);
            prop_assert_eq!(panel.display(), &before);
        }
    }
}
