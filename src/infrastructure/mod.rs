// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod hudson_poller;
pub mod list_surface;
pub mod mock_poller;
pub mod network;
pub mod poll_queue;
pub mod settings_file;
pub mod tokio_timer;
