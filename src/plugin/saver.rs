use crate::error::LogError;
use crate::plugin::packer::Packer;
use crossbeam_channel::{Receiver, Sender};
use crossbeam_utils::sync::WaitGroup;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

pub enum Command {
    Pack(LogPack),
    /// dropped by the saver once every earlier pack is archived
    Flush(WaitGroup),
}

/// a rotated file waiting to be archived
#[derive(Clone, Debug)]
pub struct LogPack {
    /// the old active file, renamed out of the way
    pub staging: PathBuf,
    pub history: PathBuf,
}

impl LogPack {
    /// archive the staging file into its history slot, then remove it.
    /// on failure the staging file is left on disk
    pub fn do_pack(&self, packer: &dyn Packer) -> Result<(), LogError> {
        packer.do_pack(&self.staging, &self.history)?;
        if !packer.is_rename() {
            std::fs::remove_file(&self.staging)?;
        }
        Ok(())
    }
}

/// archives rotated files on its own thread
pub struct Saver {
    sender: Option<Sender<Command>>,
    handle: Option<JoinHandle<()>>,
}

impl Saver {
    pub fn spawn(packer: Arc<dyn Packer>) -> Result<Self, LogError> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let handle = std::thread::Builder::new()
            .name("roll_log-saver".to_string())
            .spawn(move || save_loop(receiver, packer))?;
        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    pub fn send_pack(&self, pack: LogPack) -> Result<(), LogError> {
        match &self.sender {
            Some(s) => s
                .send(Command::Pack(pack))
                .map_err(|e| LogError::from(format!("[roll_log] saver gone: {}", e))),
            None => Err(LogError::from("[roll_log] saver closed")),
        }
    }

    /// block until every pack sent so far is archived
    pub fn wait(&self) {
        if let Some(s) = &self.sender {
            let wg = WaitGroup::new();
            if s.send(Command::Flush(wg.clone())).is_ok() {
                wg.wait();
            }
        }
    }
}

impl Drop for Saver {
    fn drop(&mut self) {
        // closing the channel lets the loop drain and exit
        self.sender.take();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

fn save_loop(r: Receiver<Command>, packer: Arc<dyn Packer>) {
    while let Ok(cmd) = r.recv() {
        match cmd {
            Command::Pack(pack) => {
                if let Err(e) = pack.do_pack(packer.as_ref()) {
                    log::error!(
                        "[roll_log] archive {} -> {} fail: {}",
                        pack.staging.display(),
                        pack.history.display(),
                        e
                    );
                }
            }
            Command::Flush(wg) => drop(wg),
        }
    }
}
