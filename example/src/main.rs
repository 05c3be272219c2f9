use roll_log::bencher::TPS;
use roll_log::consts::LogSize;
use roll_log::{Config, RollingFile};
use std::time::Instant;

/// rename rotation, 3 history files of ~1KB
fn main() {
    let _ = std::fs::remove_dir_all("target/logs/");
    let mut log = RollingFile::new(
        Config::new("target/logs/rotate.log")
            .max_size(LogSize::KB(1))
            .max_history_files(3),
    )
    .unwrap();
    let total = 10000;
    let mut bytes = 0;
    let now = Instant::now();
    for index in 0..total {
        let msg = format!("Commencing yak shaving {}", index);
        bytes += msg.len() as u64;
        log.append(msg);
    }
    log.flush().unwrap();
    println!("{}", now.report(total, bytes));
    println!("you can see log files in path: {}", "target/logs/")
}
