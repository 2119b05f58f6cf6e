pub mod console;
pub mod dns;

pub use console::{spawn_console, spawn_interrupt_watcher};
pub use dns::start_dns_server;
