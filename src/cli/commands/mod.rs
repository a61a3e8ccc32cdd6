//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod chpass;
pub mod generate;
pub mod list;
pub mod new;
pub mod remove;
pub mod show;
