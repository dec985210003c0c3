// Application layer - Capabilities and the poll/render cycle
pub mod host;
pub mod monitor_runtime;
pub mod monitor_service;
pub mod options_bridge;
pub mod poller;
pub mod renderer;
pub mod scheduler;
pub mod settings_store;
