use crate::consts::LogSize;
use crate::plugin::packer::{GZipPacker, Packer, RenamePacker};
use crate::plugin::slot::SlotCounter;
use std::fmt::{Debug, Formatter};

/// the RollingFile Config
/// for example:
// RollingFile::new(
//         Config::new("target/logs/app.log")
//             .max_size(LogSize::MB(10))
//             .max_history_files(5)
//             .compress(true)
// )
pub struct Config {
    /// the active log file
    pub path: String,
    /// rotate when tracked size + next message >= max_size
    pub max_size: LogSize,
    /// history files are path.0 .. path.(max_history_files-1)
    pub max_history_files: usize,
    /// how the active file is archived on rotation
    pub packer: Box<dyn Packer>,
    pub slot_counter: SlotCounter,
    /// count the '\n' written after every message toward the tracked size
    pub count_newline: bool,
    /// archive on a saver thread instead of inside append
    pub background: bool,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("path", &self.path)
            .field("max_size", &self.max_size)
            .field("max_history_files", &self.max_history_files)
            .field("packer", &self.packer.pack_name())
            .field("slot_counter", &self.slot_counter)
            .field("count_newline", &self.count_newline)
            .field("background", &self.background)
            .finish()
    }
}

impl Config {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            max_size: LogSize::MB(10),
            max_history_files: 5,
            packer: Box::new(RenamePacker {}),
            slot_counter: SlotCounter::Local,
            count_newline: false,
            background: false,
        }
    }

    pub fn max_size(mut self, size: LogSize) -> Self {
        self.max_size = size;
        self
    }

    pub fn max_history_files(mut self, n: usize) -> Self {
        self.max_history_files = n;
        self
    }

    /// true => gzip into the history file, false => rename
    pub fn compress(mut self, compress: bool) -> Self {
        if compress {
            self.packer = Box::new(GZipPacker {});
        } else {
            self.packer = Box::new(RenamePacker {});
        }
        self
    }

    /// set a custom Packer
    pub fn packer<P: Packer + 'static>(mut self, packer: P) -> Self {
        self.packer = Box::new(packer);
        self
    }

    pub fn slot_counter(mut self, counter: SlotCounter) -> Self {
        self.slot_counter = counter;
        self
    }

    pub fn count_newline(mut self, count: bool) -> Self {
        self.count_newline = count;
        self
    }

    /// only takes effect for packers that copy data (gzip, lz4, zip)
    pub fn background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }
}
