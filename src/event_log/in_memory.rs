use super::*;
use anyhow::format_err;
use parking_lot::{Condvar, Mutex, MutexGuard};

type InMemoryLogInner = Vec<Event>;

/// Fake in-memory event log.
///
/// Useful for unit-tests.
#[derive(Default)]
pub struct InMemoryLog {
    inner: Mutex<InMemoryLogInner>,
    condvar: Condvar,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, InMemoryLogInner> {
        self.inner.lock()
    }

    /// Copy of everything written so far
    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }
}

impl Writer for InMemoryLog {
    fn write(&self, event: Event) {
        self.lock().push(event);
        self.condvar.notify_all();
    }
}

impl Reader for InMemoryLog {
    fn read(
        &self,
        offset: Offset,
        limit: usize,
        timeout: Option<Duration>,
    ) -> Result<WithOffset<Vec<LogEvent>>> {
        let offset_usize = usize::try_from(offset)?;

        let mut read = self.lock();

        if read.len() == offset_usize {
            if let Some(timeout) = timeout {
                self.condvar.wait_for(&mut read, timeout);
            } else {
                self.condvar.wait(&mut read);
            }
        }

        let data = read
            .get(offset_usize..)
            .ok_or_else(|| format_err!("out of bounds"))?
            .iter()
            .take(limit)
            .zip(offset..)
            .map(|(e, offset)| LogEvent {
                offset,
                details: e.clone(),
            })
            .collect::<Vec<_>>();

        Ok(WithOffset {
            offset: offset + u64::try_from(data.len())?,
            data,
        })
    }

    fn get_start_offset(&self) -> Result<Offset> {
        Ok(0)
    }
}

pub fn new_in_memory_shared() -> (SharedWriter, SharedReader) {
    let log = Arc::new(InMemoryLog::new());
    (log.clone(), log)
}
