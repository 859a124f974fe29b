//! a compact battery monitor.
//!
//! one polling cycle per second reads the power supply and fans the sample
//! out to three independent consumers: a colored console line, an
//! append-only csv journal, and a live terminal panel. the loop runs until
//! the machine reports no battery at all.

use {
    self::{
        format::Record,
        journal::{Journal, JournalError},
        live::LiveState,
        sentinel::Sentinel,
        source::{Clock, PowerSource, ProbeError, SystemClock, SystemPower},
        window::Window,
    },
    crossterm::style::Stylize,
    std::{path::PathBuf, thread, time::Duration},
    thiserror::Error,
};

/// rendering samples into display-ready records.
pub mod format;
/// the durable csv journal.
pub mod journal;
/// the shared most-recent-record cell.
pub mod live;
/// power-supply readings and their tiers.
pub mod power;
/// the power-supply observer.
pub mod sentinel;
/// capability seams: clocks and power sources.
pub mod source;
/// the optional live terminal panel.
pub mod window;

/// the polling application: one authoritative cycle per interval.
pub struct App<C = SystemClock, S = SystemPower> {
    sentinel: Sentinel<C, S>,
    journal: Journal,
    live: LiveState,
    window: Option<Window>,
    interval: Duration,
}

/// a fatal monitor failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error(transparent)]
    Journal(#[from] JournalError),
}

// === impl App ===

impl App {
    const INTERVAL: Duration = Duration::from_secs(1);

    /// initializes a new application: probes the power supply, prepares the
    /// journal, and checks once for a display.
    pub fn new(journal: PathBuf) -> Result<Self, Error> {
        let source = SystemPower::probe()?;

        log::info!("journaling samples to {}", journal.display());
        let journal = Journal::create(journal)?;

        let window = Window::open();
        if window.is_none() {
            log::warn!("no controlling terminal, running without the live panel");
        }

        Ok(Self {
            sentinel: Sentinel::new(SystemClock, source),
            journal,
            live: LiveState::new(),
            window,
            interval: Self::INTERVAL,
        })
    }
}

impl<C, S> App<C, S>
where
    C: Clock,
    S: PowerSource,
{
    /// runs the polling cycle until the power source reports that no
    /// battery is present, then exits cleanly with a terminal notice.
    ///
    /// each iteration is deliberately synchronous: observe, render,
    /// journal, publish, print, sleep. a slow journal write delays the
    /// next tick rather than overlapping with it, so rows never interleave
    /// and the live record is never torn.
    pub fn run(self) -> Result<(), Error> {
        let Self {
            sentinel,
            journal,
            live,
            window,
            interval,
        } = self;

        if let Some(window) = window {
            window.watch(live.clone());
        }

        println!("{}", "\n--- MONITEUR BATTERIE ---\n".cyan());

        loop {
            let Some(sample) = sentinel.observe()? else {
                println!("Aucune batterie détectée.");
                break;
            };

            let record = Record::render(&sample);

            journal.append(&record)?;
            live.publish(record.clone());
            println!("{}", record.console_line());

            thread::sleep(interval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            power::{Percent, Reading},
            source::{MockClock, MockPowerSource},
        },
        chrono::{Local, TimeZone},
        std::{env, fs, process, time::Instant},
    };

    /// the loop journals one row per tick, in tick order, and stops as soon
    /// as the source reports no battery, without appending a further row.
    #[test]
    fn exits_after_last_reading_is_journaled() {
        let path = env::temp_dir().join(format!("coulomb-{}-loop.csv", process::id()));
        let _ = fs::remove_file(&path);

        let base = Instant::now();
        let instants = [
            base, // construction
            base,
            base + Duration::from_secs(1),
            base + Duration::from_secs(2),
        ];
        let walls = (7..10).map(|s| Local.with_ymd_and_hms(2024, 5, 1, 14, 3, s).unwrap());
        let readings = [
            Some(Reading {
                percent: Percent::new(75),
                plugged: true,
            }),
            Some(Reading {
                percent: Percent::new(30),
                plugged: false,
            }),
            Some(Reading {
                percent: Percent::new(15),
                plugged: false,
            }),
            None,
        ];

        let live = LiveState::new();
        let app = App {
            sentinel: Sentinel::new(
                MockClock::preloaded(instants, walls),
                MockPowerSource::preloaded(readings),
            ),
            journal: Journal::create(path.clone()).unwrap(),
            live: live.clone(),
            window: None,
            interval: Duration::ZERO,
        };

        app.run().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines = contents.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4, "header plus exactly three rows");
        assert_eq!(lines[1], "14:03:07,75,Secteur,00h 00m 00s");
        assert_eq!(lines[2], "14:03:08,30,Batterie,00h 00m 01s");
        assert_eq!(lines[3], "14:03:09,15,Batterie,00h 00m 02s");

        // the final record stays visible to the display side.
        assert_eq!(live.read_current().percent, "15");

        fs::remove_file(&path).ok();
    }
}
