// Application layer - collaborator seams, update strategies and scheduling
pub mod data_source;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod update_strategy;
