use std::sync::atomic::{AtomicUsize, Ordering};

/// one rotation counter shared by every writer built with `SlotCounter::Process`
static PROCESS_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// where the rotation counter lives
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SlotCounter {
    /// each writer counts its own rotations from 0
    #[default]
    Local,
    /// all writers in the process advance one counter, never reset
    Process,
}

/// picks `path.0 .. path.(max-1)` round robin
#[derive(Debug)]
pub struct HistorySlots {
    counter: SlotCounter,
    local: usize,
    max_history_files: usize,
}

impl HistorySlots {
    pub fn new(counter: SlotCounter, max_history_files: usize) -> Self {
        assert!(
            max_history_files > 0,
            "[roll_log] max_history_files must be > 0"
        );
        Self {
            counter,
            local: 0,
            max_history_files,
        }
    }

    /// slot for the next rotation, advances the counter
    pub fn next_slot(&mut self) -> usize {
        let n = match self.counter {
            SlotCounter::Local => {
                let n = self.local;
                self.local = self.local.wrapping_add(1);
                n
            }
            SlotCounter::Process => PROCESS_COUNTER.fetch_add(1, Ordering::SeqCst),
        };
        n % self.max_history_files
    }

    /// `path.<slot>` for the next rotation
    pub fn next_history_file(&mut self, path: &str) -> String {
        format!("{}.{}", path, self.next_slot())
    }

    pub fn max_history_files(&self) -> usize {
        self.max_history_files
    }
}

#[cfg(test)]
mod test {
    use crate::plugin::slot::{HistorySlots, SlotCounter};

    #[test]
    fn test_local_cycle() {
        let mut slots = HistorySlots::new(SlotCounter::Local, 3);
        let names: Vec<String> = (0..7).map(|_| slots.next_history_file("a.log")).collect();
        assert_eq!(
            names,
            vec!["a.log.0", "a.log.1", "a.log.2", "a.log.0", "a.log.1", "a.log.2", "a.log.0"]
        );
    }

    #[test]
    fn test_local_is_per_instance() {
        let mut a = HistorySlots::new(SlotCounter::Local, 4);
        let mut b = HistorySlots::new(SlotCounter::Local, 4);
        assert_eq!(a.next_slot(), 0);
        assert_eq!(a.next_slot(), 1);
        assert_eq!(b.next_slot(), 0);
    }

    #[test]
    fn test_process_is_shared() {
        // other tests may advance the shared counter concurrently, so only
        // check that two instances never hand out the same raw count
        let mut a = HistorySlots::new(SlotCounter::Process, usize::MAX);
        let mut b = HistorySlots::new(SlotCounter::Process, usize::MAX);
        let x = a.next_slot();
        let y = b.next_slot();
        assert!(y > x);
    }

    #[test]
    #[should_panic]
    fn test_zero_slots() {
        HistorySlots::new(SlotCounter::Local, 0);
    }
}
