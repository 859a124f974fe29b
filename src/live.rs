use {
    crate::format::Record,
    std::sync::{Arc, Mutex, PoisonError},
};

/// the single shared cell holding the most recent rendered record.
///
/// the polling loop is the sole writer; the display thread is the sole
/// reader. publication swaps the whole record under the lock, so a reader
/// sees either the previous complete value or the new one, never a mix of
/// fields from two ticks.
#[derive(Clone, Default)]
pub struct LiveState {
    current: Arc<Mutex<Record>>,
}

// === impl LiveState ===

impl LiveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// replaces the current record. called once per tick by the polling
    /// loop.
    pub fn publish(&self, record: Record) {
        let Self { current } = self;
        *current.lock().unwrap_or_else(PoisonError::into_inner) = record;
    }

    /// returns the current record, or the blank placeholder if nothing has
    /// been published yet. never fails; the lock is held only for a clone.
    pub fn read_current(&self) -> Record {
        let Self { current } = self;
        current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::thread};

    #[test]
    fn placeholder_before_first_publish() {
        let live = LiveState::new();
        assert_eq!(live.read_current(), Record::default());
    }

    #[test]
    fn read_returns_latest_publish() {
        let live = LiveState::new();
        let record = Record {
            time: "14:03:07".into(),
            ..Record::default()
        };

        live.publish(record.clone());
        assert_eq!(live.read_current(), record);
    }

    /// concurrent publishes and reads never yield a record mixing fields
    /// from two different ticks.
    #[test]
    fn reads_are_never_torn() {
        let live = LiveState::new();

        let writer = {
            let live = live.clone();
            thread::spawn(move || {
                for tick in 0..1_000u32 {
                    let field = tick.to_string();
                    live.publish(Record {
                        time: field.clone(),
                        percent: field.clone(),
                        source: field.clone(),
                        elapsed: field,
                        ..Record::default()
                    });
                }
            })
        };

        for _ in 0..1_000 {
            let record = live.read_current();
            assert_eq!(record.time, record.percent);
            assert_eq!(record.time, record.source);
            assert_eq!(record.time, record.elapsed);
        }

        writer.join().unwrap();
    }
}
