//! `passkeeper generate` — print random credentials.
//!
//! Usage:
//!   passkeeper generate 5 names
//!   passkeeper generate 3 pins 6
//!   passkeeper generate 10 passwords 12-16
//!   passkeeper generate 1 bytes 32
//!   passkeeper generate 3 services

use std::io::{self, Write};

use crate::cli::load_settings;
use crate::cli::output;
use crate::config::Settings;
use crate::errors::{PassKeeperError, Result};
use crate::random::generator::DEFAULT_NAME_SYLLABLES;
use crate::random::{Generated, Generator, LengthRange};

/// What `generate` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Name,
    Pin,
    Password,
    Bytes,
    Login,
    Service,
}

/// Identify the kind by substring, ignoring case, so that "names",
/// "PINs" and "passwords" all work.  Earlier kinds win: "username"
/// is a name.
pub fn identify_kind(text: &str) -> Option<Kind> {
    let text = text.to_lowercase();
    [
        ("name", Kind::Name),
        ("pin", Kind::Pin),
        ("pass", Kind::Password),
        ("byte", Kind::Bytes),
        ("login", Kind::Login),
        ("service", Kind::Service),
    ]
    .into_iter()
    .find(|(needle, _)| text.contains(needle))
    .map(|(_, kind)| kind)
}

/// Default length for `kind`: syllables for names, characters or bytes
/// for the rest.  Logins and service names always use 2-5 syllables.
pub fn default_length(kind: Kind, settings: &Settings) -> LengthRange {
    match kind {
        Kind::Name => settings.name_syllables(),
        Kind::Pin => LengthRange::fixed(settings.pin_length),
        Kind::Password => LengthRange::fixed(settings.password_length),
        Kind::Bytes => LengthRange::fixed(settings.hex_bytes),
        Kind::Login | Kind::Service => {
            let (min, max) = DEFAULT_NAME_SYLLABLES;
            LengthRange { min, max }
        }
    }
}

/// Execute the `generate` command.
pub fn execute(count: usize, kind: &str, length: Option<&str>) -> Result<()> {
    let kind = identify_kind(kind).ok_or_else(|| {
        PassKeeperError::CommandFailed(format!(
            "unknown kind '{kind}' — use names, pins, passwords, bytes, logins or services"
        ))
    })?;

    let (_, settings) = load_settings()?;
    let range = match length {
        Some(text) => text.parse()?,
        None => default_length(kind, &settings),
    };

    let mut generator = Generator::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for _ in 0..count {
        let item = generate_one(&mut generator, kind, range)?;
        writeln!(out, "{item}")?;
    }

    Ok(())
}

fn generate_one(generator: &mut Generator, kind: Kind, range: LengthRange) -> Result<String> {
    match kind {
        Kind::Name => checked_name(generator.make_name(range.min, range.max)),
        Kind::Login => checked_name(generator.make_login()),
        Kind::Service => checked_name(generator.make_service_name()),
        Kind::Pin => {
            let length = generator.pick_length(range)?;
            generator.try_make_pin(length)
        }
        Kind::Password => {
            let length = generator.pick_length(range)?;
            generator.try_make_password(length)
        }
        Kind::Bytes => {
            let length = generator.pick_length(range)?;
            generator.try_make_hex_block(length)
        }
    }
}

fn checked_name(name: Generated<String>) -> Result<String> {
    if !name.is_complete() {
        output::warning("random source failed; name is incomplete");
    }
    name.into_result()
}
