use {
    crate::{
        power::Reading,
        source::{Clock, PowerSource, ProbeError, SystemClock, SystemPower},
    },
    chrono::{DateTime, Local},
    std::time::{Duration, Instant},
};

/// observes the power supply.
pub struct Sentinel<C = SystemClock, S = SystemPower> {
    /// the clock being used to measure time.
    clock: C,
    /// the underlying source of readings.
    source: S,
    /// when observation began.
    start: Instant,
}

/// a timestamped observation of the power supply.
#[derive(Clone, Debug)]
pub struct Sample {
    /// the wall-clock time of the observation.
    pub time: DateTime<Local>,
    /// the reading obtained.
    pub reading: Reading,
    /// how long the monitor has been running.
    pub elapsed: Duration,
}

// === impl Sentinel ===

impl<C, S> Sentinel<C, S>
where
    C: Clock,
    S: PowerSource,
{
    /// creates a new [`Sentinel`], marking the start of observation.
    pub fn new(clock: C, source: S) -> Self {
        let start = clock.now();
        Self {
            clock,
            source,
            start,
        }
    }

    /// takes one observation of the power supply.
    ///
    /// returns `Ok(None)` once the source reports that no battery is
    /// present; the clock is not consulted in that case.
    pub fn observe(&self) -> Result<Option<Sample>, ProbeError> {
        let Self {
            clock,
            source,
            start,
        } = self;

        let Some(reading) = source.read()? else {
            return Ok(None);
        };

        let time = clock.wall();
        let elapsed = clock.now().saturating_duration_since(*start);

        Ok(Some(Sample {
            time,
            reading,
            elapsed,
        }))
    }
}
