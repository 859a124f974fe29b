use {
    crate::{power::Tier, sentinel::Sample},
    crossterm::style::{Color, Stylize},
    std::time::Duration,
};

/// a sample rendered into display-ready text.
///
/// this is a pure projection: it is recomputed on every tick and holds no
/// handles or state of its own. the default value is the blank placeholder
/// shown before the first sample arrives.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    /// local wall-clock time, `HH:MM:SS`.
    pub time: String,
    /// integer charge percentage.
    pub percent: String,
    /// `Secteur` when on mains power, `Batterie` otherwise.
    pub source: String,
    /// run time, `HHh MMm SSs`.
    pub elapsed: String,
    /// the health tier the percentage falls into.
    pub tier: Tier,
}

// === impl Record ===

impl Record {
    /// renders a sample.
    pub fn render(sample: &Sample) -> Self {
        let Sample {
            time,
            reading,
            elapsed,
        } = sample;

        Self {
            time: time.format("%H:%M:%S").to_string(),
            percent: reading.percent.to_string(),
            source: reading.source().to_string(),
            elapsed: render_elapsed(*elapsed),
            tier: reading.percent.tier(),
        }
    }

    /// the colored line printed to the console, one per tick.
    pub fn console_line(&self) -> String {
        let Self {
            time,
            percent,
            source,
            elapsed,
            tier,
        } = self;

        format!(
            "{}: {time} | {}: {percent}% ({source}) | {}: {elapsed}",
            "Heure".blue(),
            "Batterie".with(color(*tier)),
            "Temps écoulé".cyan(),
        )
    }

    /// the three text lines mirrored to the live panel.
    pub fn panel_lines(&self) -> [String; 3] {
        let Self {
            time,
            percent,
            source,
            elapsed,
            ..
        } = self;

        [
            format!("Heure : {time}"),
            format!("Batterie : {percent}% ({source})"),
            format!("Temps écoulé : {elapsed}"),
        ]
    }
}

/// renders a run time as zero-padded `HHh MMm SSs`, in whole seconds.
fn render_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    format!("{hours:02}h {minutes:02}m {seconds:02}s")
}

/// the ansi color associated with a tier.
fn color(tier: Tier) -> Color {
    match tier {
        Tier::Healthy => Color::Green,
        Tier::Warning => Color::Yellow,
        Tier::Critical => Color::Red,
    }
}
