use {
    crate::format::Record,
    std::{
        fs::OpenOptions,
        io::{self, ErrorKind, Write},
        path::PathBuf,
    },
    thiserror::Error,
};

/// the durable append-only log of samples.
///
/// every append is a self-contained open/write/close, so an abrupt
/// termination loses at most the row in flight, never prior ones.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
}

/// failure to create or extend the journal.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to create journal {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("failed to append to journal {}: {source}", .path.display())]
    Append { path: PathBuf, source: io::Error },
}

/// the fixed four-column header.
const HEADER: &str = "Heure,Pourcentage,Source,Temps_écoulé";

// === impl Journal ===

impl Journal {
    /// opens the journal at `path`, writing the header if and only if the
    /// file does not already exist.
    ///
    /// an existing file is never truncated or rewritten, preserving the
    /// history of prior runs across restarts.
    pub fn create(path: PathBuf) -> Result<Self, JournalError> {
        let created = OpenOptions::new().write(true).create_new(true).open(&path);

        match created {
            Ok(mut file) => writeln!(file, "{HEADER}").map_err(|source| JournalError::Create {
                path: path.clone(),
                source,
            })?,
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {}
            Err(source) => return Err(JournalError::Create { path, source }),
        }

        Ok(Self { path })
    }

    /// appends one row, opening and closing the file around the write.
    pub fn append(&self, record: &Record) -> Result<(), JournalError> {
        let Self { path } = self;

        let row = Self::row(record);
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{row}"))
            .map_err(|source| JournalError::Append {
                path: path.clone(),
                source,
            })
    }

    /// the on-disk csv representation of a record.
    ///
    /// none of the four fields can contain a comma or a newline, so no
    /// quoting is needed.
    fn row(record: &Record) -> String {
        let Record {
            time,
            percent,
            source,
            elapsed,
            tier: _,
        } = record;

        format!("{time},{percent},{source},{elapsed}")
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::power::Tier,
        std::{env, fs, process},
    };

    fn scratch(name: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("coulomb-{}-{name}.csv", process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    fn record(percent: &str) -> Record {
        Record {
            time: "14:03:07".into(),
            percent: percent.into(),
            source: "Secteur".into(),
            elapsed: "00h 00m 00s".into(),
            tier: Tier::Healthy,
        }
    }

    #[test]
    fn writes_header_once() {
        let path = scratch("header");

        Journal::create(path.clone()).unwrap();
        Journal::create(path.clone()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Heure,Pourcentage,Source,Temps_écoulé\n");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn preserves_rows_across_restarts() {
        let path = scratch("restart");

        let journal = Journal::create(path.clone()).unwrap();
        journal.append(&record("75")).unwrap();

        // a second run reopens the same file without touching its history.
        let journal = Journal::create(path.clone()).unwrap();
        journal.append(&record("74")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines = contents.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                HEADER,
                "14:03:07,75,Secteur,00h 00m 00s",
                "14:03:07,74,Secteur,00h 00m 00s",
            ],
        );

        fs::remove_file(&path).ok();
    }

    #[test]
    fn appends_one_row_per_call_in_order() {
        let path = scratch("order");

        let journal = Journal::create(path.clone()).unwrap();
        for i in 0..5 {
            journal.append(&record(&i.to_string())).unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        let rows = contents.lines().skip(1).collect::<Vec<_>>();
        assert_eq!(rows.len(), 5);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(*row, format!("14:03:07,{i},Secteur,00h 00m 00s"));
        }

        fs::remove_file(&path).ok();
    }

    #[test]
    fn create_surfaces_io_failure() {
        let path = PathBuf::from("/nonexistent-dir/coulomb.csv");
        let error = Journal::create(path).unwrap_err();
        assert!(matches!(error, JournalError::Create { .. }));
    }
}
