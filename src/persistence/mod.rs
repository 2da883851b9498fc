pub mod files;
pub mod storage;
pub mod transfer;

pub use files::{ensure_data_dir, init_local_data_dir, log_file};
pub use storage::{
    FileStorage, KeyValueStore, MemoryStorage, SharedStorage, BREAK_DURATION_KEY, FOCUS_DURATION_KEY,
    NOTIFICATIONS_KEY, SOUND_KEY, TASKS_KEY,
};
pub use transfer::{read_import, write_export};
