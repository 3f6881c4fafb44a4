pub mod arena;
pub mod config;
pub mod session;

pub use arena::{ArenaScope, FrameArena};
pub use config::SessionConfig;
pub use session::{Session, SpectrumCharts, TickOutput};
