mod app;
pub use app::*;

pub mod input;
pub mod window_fit;

mod host_bridge;
pub use host_bridge::*;
