pub mod app;
pub mod frame_stats;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
