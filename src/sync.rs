use crate::config::Config;
use crate::error::LogError;
use crate::rolling_file::RollingFile;
use parking_lot::{Mutex, MutexGuard};

/// a RollingFile shared by the threads of one process
pub struct SyncRollingFile {
    inner: Mutex<RollingFile>,
}

impl SyncRollingFile {
    pub fn new(config: Config) -> Result<Self, LogError> {
        Ok(Self::from(RollingFile::new(config)?))
    }

    pub fn append<M: AsRef<str>>(&self, msg: M) {
        self.inner.lock().append(msg);
    }

    pub fn try_append<M: AsRef<str>>(&self, msg: M) -> Result<(), LogError> {
        self.inner.lock().try_append(msg)
    }

    pub fn flush(&self) -> Result<(), LogError> {
        self.inner.lock().flush()
    }

    pub fn current_size(&self) -> usize {
        self.inner.lock().current_size()
    }

    pub fn lock(&self) -> MutexGuard<'_, RollingFile> {
        self.inner.lock()
    }
}

impl From<RollingFile> for SyncRollingFile {
    fn from(arg: RollingFile) -> Self {
        Self {
            inner: Mutex::new(arg),
        }
    }
}
