use std::io::ErrorKind;
use std::path::Path;

/// on-disk byte size of `path`.
/// 0 when the file is absent, or 0 with a diagnostic when stat fails otherwise
pub fn get_file_size<P: AsRef<Path>>(path: P) -> usize {
    let path = path.as_ref();
    match std::fs::metadata(path) {
        Ok(m) => m.len() as usize,
        Err(e) if e.kind() == ErrorKind::NotFound => 0,
        Err(e) => {
            log::warn!("[roll_log] failed to get log file size {}: {}", path.display(), e);
            0
        }
    }
}

#[cfg(test)]
mod test {
    use crate::plugin::file_size::get_file_size;
    use std::fs::remove_dir_all;

    #[test]
    fn test_file_size() {
        let dir = "target/test/file_size/";
        let _ = remove_dir_all(dir);
        std::fs::create_dir_all(dir).unwrap();
        let path = format!("{}a.log", dir);
        assert_eq!(get_file_size(&path), 0);
        std::fs::write(&path, [0u8; 90]).unwrap();
        assert_eq!(get_file_size(&path), 90);
        let _ = remove_dir_all(dir);
    }
}
