use {
    crate::live::LiveState,
    crossterm::{
        QueueableCommand, cursor,
        style::{self, Stylize},
        terminal,
        tty::IsTty,
    },
    std::{
        fs::{File, OpenOptions},
        io::{self, Write},
        thread,
        time::Duration,
    },
};

/// a small always-visible panel mirroring the latest sample.
///
/// the panel draws straight to the controlling terminal rather than
/// stdout, so piped output stays clean. it redraws on its own timer and
/// only ever reads [`LiveState`]; a slow or wedged terminal cannot stall
/// the polling loop.
pub struct Window {
    tty: File,
}

// === impl Window ===

impl Window {
    const TITLE: &str = "Surveillance Batterie";
    const REFRESH: Duration = Duration::from_secs(1);
    /// panel geometry, borders included.
    const WIDTH: u16 = 38;
    const HEIGHT: u16 = 6;

    /// opens the display capability, if there is one.
    ///
    /// returns `None` when the process has no writable controlling
    /// terminal (a headless session, a pipe); the caller runs without a
    /// panel in that case. the check happens once, here.
    pub fn open() -> Option<Self> {
        let tty = OpenOptions::new().write(true).open("/dev/tty").ok()?;

        if !tty.is_tty() {
            return None;
        }

        Some(Self { tty })
    }

    /// spawns the redraw loop on its own thread.
    ///
    /// the thread is detached and lives until the process exits.
    pub fn watch(mut self, live: LiveState) {
        thread::spawn(move || {
            loop {
                let record = live.read_current();
                // a draw failure only costs this frame.
                let _ = self.draw(&record.panel_lines());
                thread::sleep(Self::REFRESH);
            }
        });
    }

    /// paints the panel into the top-right corner of the terminal.
    fn draw(&mut self, lines: &[String; 3]) -> io::Result<()> {
        let Self { tty } = self;

        let (cols, _) = terminal::size().unwrap_or((80, 24));
        let left = cols.saturating_sub(Self::WIDTH);
        let inner = usize::from(Self::WIDTH) - 4;

        let framed = |text: &str| -> String {
            let clipped = text.chars().take(inner).collect::<String>();
            format!("█ {clipped:<inner$} █")
        };

        tty.queue(cursor::SavePosition)?;

        for y in 0..Self::HEIGHT {
            tty.queue(cursor::MoveTo(left, y))?;

            let row = if y == 0 || y == Self::HEIGHT - 1 {
                "█".repeat(usize::from(Self::WIDTH)).grey()
            } else if y == 1 {
                framed(Self::TITLE).bold()
            } else {
                framed(&lines[usize::from(y) - 2]).stylize()
            };

            tty.queue(style::PrintStyledContent(row))?;
        }

        tty.queue(cursor::RestorePosition)?;
        tty.flush()
    }
}
