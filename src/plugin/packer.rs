use crate::consts::CHUNK_LEN;
use crate::error::LogError;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// archives the content of the active file into a history slot
///
/// must impl pack_name,do_pack method
pub trait Packer: Send + Sync {
    fn pack_name(&self) -> &'static str;

    /// archive `src` into `dest`.
    /// on error partial output may remain at `dest`
    fn do_pack(&self, src: &Path, dest: &Path) -> Result<(), LogError>;

    /// true when `do_pack` moves `src` away instead of copying its bytes
    fn is_rename(&self) -> bool {
        false
    }
}

impl Packer for Box<dyn Packer> {
    fn pack_name(&self) -> &'static str {
        (**self).pack_name()
    }

    fn do_pack(&self, src: &Path, dest: &Path) -> Result<(), LogError> {
        (**self).do_pack(src, dest)
    }

    fn is_rename(&self) -> bool {
        (**self).is_rename()
    }
}

/// plain rename, no transformation
pub struct RenamePacker {}

impl Packer for RenamePacker {
    fn pack_name(&self) -> &'static str {
        "log"
    }

    fn do_pack(&self, src: &Path, dest: &Path) -> Result<(), LogError> {
        std::fs::rename(src, dest).map_err(|e| {
            LogError::from(format!(
                "[roll_log] rename({} -> {}) fail: {}",
                src.display(),
                dest.display(),
                e
            ))
        })
    }

    fn is_rename(&self) -> bool {
        true
    }
}

/// gzip compress, readable by `gzip -d`
pub struct GZipPacker {}

impl Packer for GZipPacker {
    fn pack_name(&self) -> &'static str {
        "gz"
    }

    fn do_pack(&self, src: &Path, dest: &Path) -> Result<(), LogError> {
        let gz_file = create(dest)?;
        let mut encoder = GzEncoder::new(gz_file, Compression::default());
        let log_file = open(src)?;
        copy_chunks(log_file, &mut encoder, src)?;
        encoder.finish().map_err(|e| {
            LogError::from(format!("[roll_log] try gzip fail {}: {}", dest.display(), e))
        })?;
        Ok(())
    }
}

#[cfg(feature = "lz4")]
use lz4_flex::frame::FrameEncoder;

/// you need enable roll_log = { ... ,features=["lz4"]}
#[cfg(feature = "lz4")]
pub struct LZ4Packer {}

#[cfg(feature = "lz4")]
impl Packer for LZ4Packer {
    fn pack_name(&self) -> &'static str {
        "lz4"
    }

    fn do_pack(&self, src: &Path, dest: &Path) -> Result<(), LogError> {
        let lz4_file = create(dest)?;
        let mut encoder = FrameEncoder::new(lz4_file);
        let log_file = open(src)?;
        copy_chunks(log_file, &mut encoder, src)?;
        encoder.finish().map_err(|e| {
            LogError::from(format!("[roll_log] try lz4 fail {}: {}", dest.display(), e))
        })?;
        Ok(())
    }
}

/// you need enable roll_log = { ... ,features=["zip"]}
#[cfg(feature = "zip")]
pub struct ZipPacker {}

#[cfg(feature = "zip")]
impl Packer for ZipPacker {
    fn pack_name(&self) -> &'static str {
        "zip"
    }

    fn do_pack(&self, src: &Path, dest: &Path) -> Result<(), LogError> {
        let entry_name = src
            .file_name()
            .and_then(|v| v.to_str())
            .unwrap_or("log")
            .to_string();
        let zip_file = create(dest)?;
        let mut zip = zip::ZipWriter::new(zip_file);
        zip.start_file(entry_name, zip::write::FileOptions::default())
            .map_err(|e| LogError::from(e.to_string()))?;
        let log_file = open(src)?;
        copy_chunks(log_file, &mut zip, src)?;
        zip.finish().map_err(|e| {
            LogError::from(format!("[roll_log] try zip fail {}: {}", dest.display(), e))
        })?;
        Ok(())
    }
}

fn create(dest: &Path) -> Result<File, LogError> {
    File::create(dest).map_err(|e| {
        LogError::from(format!("[roll_log] create({}) fail: {}", dest.display(), e))
    })
}

fn open(src: &Path) -> Result<File, LogError> {
    File::open(src)
        .map_err(|e| LogError::from(format!("[roll_log] open({}) fail: {}", src.display(), e)))
}

/// stream `src` into `w` CHUNK_LEN bytes at a time, stop at the first read error
pub fn copy_chunks<R: Read, W: Write>(mut r: R, w: &mut W, src: &Path) -> Result<u64, LogError> {
    let mut buf = [0u8; CHUNK_LEN];
    let mut total = 0u64;
    loop {
        let n = match r.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(LogError::from(format!(
                    "[roll_log] read({}) fail: {}",
                    src.display(),
                    e
                )));
            }
        };
        w.write_all(&buf[..n])?;
        total += n as u64;
    }
    Ok(total)
}
