pub mod error;
pub mod files;
pub mod queue;

pub use error::PersistenceError;
pub use files::{atomic_write, init_local_flow, log_file, queue_file, read_file, settings_file};
pub use queue::{load_queue, save_queue, QueueFile};
