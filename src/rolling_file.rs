use crate::config::Config;
use crate::consts::PENDING_SUFFIX;
use crate::error::LogError;
use crate::plugin::file_size::get_file_size;
use crate::plugin::packer::Packer;
use crate::plugin::saver::{LogPack, Saver};
use crate::plugin::slot::HistorySlots;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// size-bounded, rotating append-only log file.
///
/// Every `append` writes one message plus `'\n'` to the active file. When the
/// tracked size plus the next message would reach `max_size`, the active file
/// is archived into `path.<slot>` first, so a message never straddles two files.
/// Slots are reused round robin, which bounds the number of history files.
///
/// Failures while rotating are logged through the `log` facade and never
/// reach the caller. One writer per path: nothing here locks the file.
pub struct RollingFile {
    path: String,
    file: Option<File>,
    max_size: usize,
    /// bytes in the active file as far as this writer knows
    current_size: usize,
    count_newline: bool,
    slots: HistorySlots,
    packer: Arc<dyn Packer>,
    saver: Option<Saver>,
    /// rotations handed to the saver, keeps staging names unique
    pending_seq: usize,
}

impl RollingFile {
    /// open (or create) the active file in append mode.
    ///
    /// panics if `max_history_files` is 0
    pub fn new(config: Config) -> Result<RollingFile, LogError> {
        let slots = HistorySlots::new(config.slot_counter, config.max_history_files);
        let max_size = config.max_size.get_len();
        if max_size == 0 {
            return Err(LogError::from("[roll_log] max_size must be > 0"));
        }
        if let Some(dir) = Path::new(&config.path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    LogError::from(format!(
                        "[roll_log] create_dir_all({}) fail: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }
        let current_size = get_file_size(&config.path);
        let file = open_append(&config.path)?;
        let packer: Arc<dyn Packer> = Arc::from(config.packer);
        let saver = if config.background && !packer.is_rename() {
            Some(Saver::spawn(packer.clone())?)
        } else {
            None
        };
        Ok(Self {
            path: config.path,
            file: Some(file),
            max_size,
            current_size,
            count_newline: config.count_newline,
            slots,
            packer,
            saver,
            pending_seq: 0,
        })
    }

    /// write `msg` and a newline, rotating first when the threshold is reached.
    /// write errors are logged, not returned
    pub fn append<M: AsRef<str>>(&mut self, msg: M) {
        if let Err(e) = self.try_append(msg) {
            log::error!("[roll_log] append to {} fail: {}", self.path, e);
        }
    }

    /// like `append`, but hands the write error back.
    /// rotation failures are still only logged
    pub fn try_append<M: AsRef<str>>(&mut self, msg: M) -> Result<(), LogError> {
        let msg = msg.as_ref().as_bytes();
        let mut msg_size = msg.len();
        if self.count_newline {
            msg_size += 1;
        }
        if self.current_size + msg_size >= self.max_size {
            self.rotate();
        }
        self.active_file()?;
        let count_newline = self.count_newline;
        if let Some(file) = self.file.as_mut() {
            write_line(file, msg, count_newline, &mut self.current_size)?;
        }
        Ok(())
    }

    /// flush the active file and wait for background archives
    pub fn flush(&mut self) -> Result<(), LogError> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        if let Some(saver) = &self.saver {
            saver.wait();
        }
        Ok(())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn current_size(&self) -> usize {
        self.current_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    fn active_file(&mut self) -> Result<&mut File, LogError> {
        if self.file.is_none() {
            self.file = Some(open_append(&self.path)?);
        }
        match self.file.as_mut() {
            Some(file) => Ok(file),
            None => Err(LogError::from("[roll_log] active file closed")),
        }
    }

    /// close, archive into the next slot, reopen truncated
    fn rotate(&mut self) {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }
        let history = self.slots.next_history_file(&self.path);
        log::debug!("[roll_log] rotate {} -> {}", self.path, history);
        if let Err(e) = self.archive(&history) {
            log::error!("[roll_log] rotate {} -> {} fail: {}", self.path, history, e);
        }
        match open_truncate(&self.path) {
            Ok(file) => self.file = Some(file),
            Err(e) => log::error!("[roll_log] reopen {} fail: {}", self.path, e),
        }
        self.current_size = 0;
    }

    fn archive(&mut self, history: &str) -> Result<(), LogError> {
        match &self.saver {
            Some(saver) => {
                // the saver may still hold an older pack for this slot
                let staging = PathBuf::from(format!(
                    "{}.{}{}",
                    history, self.pending_seq, PENDING_SUFFIX
                ));
                self.pending_seq = self.pending_seq.wrapping_add(1);
                std::fs::rename(&self.path, &staging)?;
                saver.send_pack(LogPack {
                    staging,
                    history: PathBuf::from(history),
                })
            }
            None => self.packer.do_pack(Path::new(&self.path), Path::new(history)),
        }
    }
}

impl Write for RollingFile {
    /// one call is one chunk: counted and rotated like a message, no newline added
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.current_size + buf.len() >= self.max_size {
            self.rotate();
        }
        let file = self.active_file()?;
        file.write_all(buf)?;
        self.current_size += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        RollingFile::flush(self)?;
        Ok(())
    }
}

impl Drop for RollingFile {
    fn drop(&mut self) {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }
        // Saver::drop drains the queue and joins
        self.saver.take();
    }
}

/// `msg` then `'\n'`; `size` grows by what reached the file even if the newline fails
fn write_line<W: Write>(
    w: &mut W,
    msg: &[u8],
    count_newline: bool,
    size: &mut usize,
) -> std::io::Result<()> {
    w.write_all(msg)?;
    *size += msg.len();
    w.write_all(b"\n")?;
    if count_newline {
        *size += 1;
    }
    Ok(())
}

fn open_append(path: &str) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::from(format!("[roll_log] open({}) fail: {}", path, e)))
}

fn open_truncate(path: &str) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| LogError::from(format!("[roll_log] open({}) fail: {}", path, e)))
}

#[cfg(test)]
mod test {
    use crate::config::Config;
    use crate::consts::LogSize;
    use crate::rolling_file::{write_line, RollingFile};
    use std::fs::remove_dir_all;
    use std::io::Write;

    /// accepts everything except a lone newline
    struct NewlineFails {
        data: Vec<u8>,
    }

    impl Write for NewlineFails {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf == b"\n" {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_line_counts_partial_write() {
        let mut w = NewlineFails { data: vec![] };
        let mut size = 3;
        assert!(write_line(&mut w, b"hello", true, &mut size).is_err());
        assert_eq!(w.data, b"hello");
        assert_eq!(size, 8);

        let mut out = vec![];
        let mut size = 0;
        write_line(&mut out, b"hello", true, &mut size).unwrap();
        assert_eq!(out, b"hello\n");
        assert_eq!(size, 6);
    }

    #[test]
    fn test_tracks_initial_size() {
        let dir = "target/test/rf_initial/";
        let _ = remove_dir_all(dir);
        std::fs::create_dir_all(dir).unwrap();
        let path = format!("{}a.log", dir);
        std::fs::write(&path, "0123456789").unwrap();
        let mut f = RollingFile::new(Config::new(&path).max_size(LogSize::B(100))).unwrap();
        assert_eq!(f.current_size(), 10);
        f.append("abc");
        f.append(String::from("de"));
        assert_eq!(f.current_size(), 15);
        // append mode keeps the old content
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0123456789abc\nde\n");
        drop(f);
        let _ = remove_dir_all(dir);
    }

    #[test]
    fn test_count_newline() {
        let dir = "target/test/rf_newline/";
        let _ = remove_dir_all(dir);
        let path = format!("{}a.log", dir);
        let mut f = RollingFile::new(
            Config::new(&path)
                .max_size(LogSize::B(10))
                .count_newline(true),
        )
        .unwrap();
        f.append("1234");
        assert_eq!(f.current_size(), 5);
        // 5 + 5 >= 10
        f.append("5678");
        assert_eq!(f.current_size(), 5);
        assert_eq!(std::fs::read_to_string(format!("{}.0", path)).unwrap(), "1234\n");
        drop(f);
        let _ = remove_dir_all(dir);
    }

    #[test]
    fn test_write_chunks() {
        let dir = "target/test/rf_write/";
        let _ = remove_dir_all(dir);
        let path = format!("{}a.log", dir);
        let mut f = RollingFile::new(Config::new(&path).max_size(LogSize::B(8))).unwrap();
        f.write_all(b"abcd").unwrap();
        f.write_all(b"efgh").unwrap();
        f.flush().unwrap();
        assert_eq!(std::fs::read_to_string(format!("{}.0", path)).unwrap(), "abcd");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "efgh");
        drop(f);
        let _ = remove_dir_all(dir);
    }

    #[test]
    fn test_zero_max_size() {
        let dir = "target/test/rf_zero_size/";
        let _ = remove_dir_all(dir);
        let path = format!("{}a.log", dir);
        let e = RollingFile::new(Config::new(&path).max_size(LogSize::B(0)))
            .err()
            .unwrap();
        assert_eq!(e.to_string(), "[roll_log] max_size must be > 0");
        let _ = remove_dir_all(dir);
    }

    #[test]
    #[should_panic]
    fn test_zero_history_files() {
        let _ = RollingFile::new(Config::new("target/test/rf_zero_hist/a.log").max_history_files(0));
    }
}
