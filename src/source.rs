use {
    crate::power::{Percent, Reading},
    battery::{Manager, State},
    chrono::{DateTime, Local},
    std::{cell::RefCell, collections::VecDeque, time::Instant},
    thiserror::Error,
};

pub use self::{clock::*, supply::*};

/// abstracts over sources of time.
mod clock {
    use super::*;

    pub trait Clock {
        /// monotonic time, for measuring elapsed run time.
        fn now(&self) -> Instant;
        /// wall-clock time, for timestamps.
        fn wall(&self) -> DateTime<Local>;
    }

    #[derive(Default)]
    pub struct SystemClock;

    /// a mock clock.
    #[derive(Default)]
    pub struct MockClock {
        instants: RefCell<VecDeque<Instant>>,
        walls: RefCell<VecDeque<DateTime<Local>>>,
    }

    // === impl SystemClock ===

    impl Clock for SystemClock {
        fn now(&self) -> Instant {
            Instant::now()
        }

        fn wall(&self) -> DateTime<Local> {
            Local::now()
        }
    }

    // === impl MockClock ===

    impl MockClock {
        #[allow(dead_code, reason = "this is a testing utility.")]
        pub fn preloaded(
            instants: impl IntoIterator<Item = Instant>,
            walls: impl IntoIterator<Item = DateTime<Local>>,
        ) -> Self {
            Self {
                instants: RefCell::new(instants.into_iter().collect()),
                walls: RefCell::new(walls.into_iter().collect()),
            }
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            let Self { instants, .. } = self;

            instants
                .borrow_mut()
                .pop_front()
                .expect("mock instants should not be empty")
        }

        fn wall(&self) -> DateTime<Local> {
            let Self { walls, .. } = self;

            walls
                .borrow_mut()
                .pop_front()
                .expect("mock walls should not be empty")
        }
    }
}

/// abstracts over providers of power-supply readings.
mod supply {
    use super::*;

    /// a source of power-supply readings.
    pub trait PowerSource {
        /// takes a reading.
        ///
        /// `Ok(None)` means the machine has no battery hardware at all; the
        /// polling loop treats that as its sole termination signal.
        fn read(&self) -> Result<Option<Reading>, ProbeError>;
    }

    /// readings backed by the operating system's power-supply interface.
    pub struct SystemPower {
        manager: Manager,
    }

    /// a mock power source.
    #[derive(Default)]
    pub struct MockPowerSource {
        readings: RefCell<VecDeque<Option<Reading>>>,
    }

    /// failure to probe the power supply.
    #[derive(Debug, Error)]
    #[error("power supply probe failed: {0}")]
    pub struct ProbeError(#[from] battery::Error);

    // === impl SystemPower ===

    impl SystemPower {
        /// connects to the power-supply interface.
        pub fn probe() -> Result<Self, ProbeError> {
            Manager::new()
                .map(|manager| Self { manager })
                .map_err(ProbeError)
        }
    }

    impl PowerSource for SystemPower {
        fn read(&self) -> Result<Option<Reading>, ProbeError> {
            let Self { manager } = self;

            let mut batteries = manager.batteries()?;
            let Some(battery) = batteries.next().transpose()? else {
                return Ok(None);
            };

            // the crate reports no plugged-in flag directly; infer it from
            // the charge state.
            let percent = Percent::from_ratio(battery.state_of_charge().value);
            let plugged = matches!(battery.state(), State::Charging | State::Full);

            Ok(Some(Reading { percent, plugged }))
        }
    }

    // === impl MockPowerSource ===

    impl MockPowerSource {
        #[allow(dead_code, reason = "this is a testing utility.")]
        pub fn preloaded(readings: impl IntoIterator<Item = Option<Reading>>) -> Self {
            Self {
                readings: RefCell::new(readings.into_iter().collect()),
            }
        }
    }

    impl PowerSource for MockPowerSource {
        fn read(&self) -> Result<Option<Reading>, ProbeError> {
            let Self { readings } = self;

            readings
                .borrow_mut()
                .pop_front()
                .map(Ok)
                .expect("mock readings should not be empty")
        }
    }
}
