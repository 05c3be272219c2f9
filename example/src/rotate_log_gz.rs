use roll_log::bencher::TPS;
use roll_log::consts::LogSize;
use roll_log::{Config, RollingFile};
use std::time::Instant;

/// gzip every rotated file into rotate_gz.log.0 .. rotate_gz.log.4
fn main() {
    let _ = std::fs::remove_dir_all("target/logs_gz/");
    let mut log = RollingFile::new(
        Config::new("target/logs_gz/rotate_gz.log")
            .max_size(LogSize::KB(50))
            .max_history_files(5)
            .compress(true),
    )
    .unwrap();
    let total = 20000;
    let now = Instant::now();
    for _ in 0..total {
        log.append("Commencing yak shaving");
    }
    log.flush().unwrap();
    println!("TPS: {} Iter/s", now.tps(total));
    println!("you can see log files in path: {}", "target/logs_gz/")
}
