pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, Commands, InstrumentArgs, MonitorsArgs, OutputFormat};
pub use handlers::{handle_instrument, handle_monitors};
