pub mod events;
pub mod reader;
pub mod run_flag;
pub mod state;

pub use events::ReaderEvent;
pub use reader::{spawn_reader, FrameReader, ReaderExit};
pub use run_flag::RunFlag;
pub use state::ReaderState;
