pub mod frame_guard;
pub mod policy;

pub use frame_guard::{FrameGuard, Recovery};
pub use policy::ErrorPolicy;
