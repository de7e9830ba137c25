// Commands module - Command Pattern implementation
// Licensed under GPL-3.0

mod command;
mod router;

// Individual command implementations
mod api_server;
mod database;
mod sync;

pub use command::Command;
pub use router::CommandRouter;

pub use api_server::ApiServerCommand;
pub use database::DatabaseCommand;
pub use sync::SyncCommand;
