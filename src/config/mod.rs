//! Configuration loaded from `.passkeeper.toml`.

pub mod settings;

pub use settings::Settings;
