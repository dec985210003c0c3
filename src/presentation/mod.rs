// Presentation layer - HTTP front-end standing in for the gadget host
pub mod app_state;
pub mod handlers;
pub mod page;
