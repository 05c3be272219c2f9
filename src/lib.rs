#![forbid(unsafe_code)]

pub mod bencher;
pub mod config;
pub mod consts;
pub mod error;
pub mod plugin;
pub mod rolling_file;
pub mod sync;

pub use config::Config;
pub use rolling_file::RollingFile;
pub use sync::SyncRollingFile;
