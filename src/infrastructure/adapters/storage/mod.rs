//! Storage Adapter - 本地音频输出

mod file_storage;

pub use file_storage::FileAudioStorage;
