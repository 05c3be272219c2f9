pub mod file_size;
pub mod packer;
pub mod saver;
pub mod slot;
