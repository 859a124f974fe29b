//! a compact battery monitor.

use {
    coulomb::App,
    std::{env, path::PathBuf},
};

/// the journal lands in the working directory unless `COULOMB_JOURNAL`
/// says otherwise.
const JOURNAL: &str = "batterie_log.csv";

fn main() -> Result<(), coulomb::Error> {
    env_logger::init();

    let journal = env::var_os("COULOMB_JOURNAL")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(JOURNAL));

    App::new(journal)?.run()
}
