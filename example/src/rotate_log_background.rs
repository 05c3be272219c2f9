use roll_log::bencher::TPS;
use roll_log::consts::LogSize;
use roll_log::{Config, SyncRollingFile};
use std::sync::Arc;
use std::time::Instant;

/// four threads share one writer, gzip runs on the saver thread
fn main() {
    let _ = std::fs::remove_dir_all("target/logs_bg/");
    let log = Arc::new(
        SyncRollingFile::new(
            Config::new("target/logs_bg/rotate_bg.log")
                .max_size(LogSize::KB(64))
                .max_history_files(4)
                .compress(true)
                .background(true),
        )
        .unwrap(),
    );
    let now = Instant::now();
    let mut handles = vec![];
    for t in 0..4 {
        let log = log.clone();
        handles.push(std::thread::spawn(move || {
            for index in 0..10000 {
                log.append(format!("thread {} Commencing yak shaving {}", t, index));
            }
        }));
    }
    for h in handles {
        let _ = h.join();
    }
    log.flush().unwrap();
    println!("TPS: {} Iter/s", now.tps(40000));
    println!("you can see log files in path: {}", "target/logs_bg/")
}
