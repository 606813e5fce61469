// Domain layer - the windowed streaming-buffer engine
pub mod axis;
pub mod errors;
pub mod sample;
pub mod scroll;
pub mod settings;
pub mod viewport;
pub mod window;
