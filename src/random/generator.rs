//! Credential generators: numbers, PINs, passwords, hex keys, names.
//!
//! `Generator` owns (or borrows, through `&SharedPool`) the entropy it
//! draws from.  The `make_*` methods are fail-soft and report truncated
//! output as `Generated::Partial`; the `try_*` methods turn truncation
//! into `EntropySourceFailure` and are what secret-producing callers use.

use std::fmt;
use std::str::FromStr;

use super::names;
use super::pool::{DrawBits, EntropyPool};
use super::Generated;
use crate::errors::{PassKeeperError, Result};

/// 64 password characters; letters and digits that look alike are left out.
const PASSWORD_ALPHABET: &[u8; 64] =
    b"ACDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz0123456789#*?:+=_";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Domains appended to generated service names.
const SERVICE_DOMAINS: [&str; 4] = [".com", ".net", ".org", ".info"];

/// Syllable range used for generated logins and service names.
pub const DEFAULT_NAME_SYLLABLES: (u32, u32) = (2, 5);

/// Random credential generator.
#[derive(Debug)]
pub struct Generator<P = EntropyPool> {
    pool: P,
}

impl Generator<EntropyPool> {
    /// A generator with its own OS-backed entropy pool.
    pub fn new() -> Self {
        Self::with_pool(EntropyPool::new())
    }
}

impl Default for Generator<EntropyPool> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: DrawBits> Generator<P> {
    pub fn with_pool(pool: P) -> Self {
        Self { pool }
    }

    /// A uniform-ish number in `0..modulo` from a 64-bit draw.
    ///
    /// Returns `modulo` itself, which is never a valid result, when the
    /// entropy draw fails.  Prefer [`Self::try_make_number`].
    pub fn make_number(&mut self, modulo: u32) -> u32 {
        self.try_make_number(modulo).unwrap_or(modulo)
    }

    /// A number in `0..modulo`, or the entropy failure.
    pub fn try_make_number(&mut self, modulo: u32) -> Result<u32> {
        if modulo == 0 {
            return Err(PassKeeperError::CommandFailed(
                "modulo must be positive".into(),
            ));
        }
        let t = self.pool.draw_u64()?;
        // The remainder is below `modulo`, so it always fits.
        Ok((t % u64::from(modulo)) as u32)
    }

    /// `length` decimal digits, four per 64-bit draw.
    ///
    /// Each group is a number below 10000 written least significant
    /// digit first.
    pub fn make_pin(&mut self, length: usize) -> Generated<String> {
        let mut pin = String::with_capacity(length + 3);

        while pin.len() < length {
            let Ok(mut group) = self.try_make_number(10_000) else {
                return Generated::Partial(pin);
            };
            for _ in 0..4 {
                pin.push(char::from(b'0' + (group % 10) as u8));
                group /= 10;
            }
        }

        pin.truncate(length);
        Generated::Complete(pin)
    }

    /// `length` characters, one 6-bit draw each.
    pub fn make_password(&mut self, length: usize) -> Generated<String> {
        let mut password = String::with_capacity(length);

        for _ in 0..length {
            let Ok(t) = self.pool.draw(6) else {
                return Generated::Partial(password);
            };
            password.push(char::from(PASSWORD_ALPHABET[t as usize]));
        }

        Generated::Complete(password)
    }

    /// `bytes` random bytes as lowercase hex, low nibble first.
    pub fn make_hex_block(&mut self, bytes: usize) -> Generated<String> {
        let mut hex = String::with_capacity(bytes * 2);

        for _ in 0..bytes {
            let Ok(t) = self.pool.draw(8) else {
                return Generated::Partial(hex);
            };
            hex.push(char::from(HEX_DIGITS[(t & 0xF) as usize]));
            hex.push(char::from(HEX_DIGITS[(t >> 4) as usize]));
        }

        Generated::Complete(hex)
    }

    /// A pronounceable name; see [`names::make_name`].
    pub fn make_name(&mut self, min_syllables: u32, max_syllables: u32) -> Generated<String> {
        names::make_name(&mut self.pool, min_syllables, max_syllables)
    }

    /// A random login: a 2-5 syllable name.
    pub fn make_login(&mut self) -> Generated<String> {
        let (min, max) = DEFAULT_NAME_SYLLABLES;
        self.make_name(min, max)
    }

    /// A random service name: a 2-5 syllable name plus a domain suffix.
    pub fn make_service_name(&mut self) -> Generated<String> {
        let name = self.make_login();
        if !name.is_complete() {
            return name;
        }

        match self.try_make_number(SERVICE_DOMAINS.len() as u32) {
            Ok(index) => name.map(|mut n| {
                n.push_str(SERVICE_DOMAINS[index as usize]);
                n
            }),
            Err(_) => Generated::Partial(name.into_inner()),
        }
    }

    pub fn try_make_pin(&mut self, length: usize) -> Result<String> {
        self.make_pin(length).into_result()
    }

    pub fn try_make_password(&mut self, length: usize) -> Result<String> {
        self.make_password(length).into_result()
    }

    pub fn try_make_hex_block(&mut self, bytes: usize) -> Result<String> {
        self.make_hex_block(bytes).into_result()
    }

    /// Generate a secret for one of the password presets.
    pub fn make_preset(&mut self, preset: PasswordPreset) -> Result<String> {
        match preset {
            PasswordPreset::Pin4 => self.try_make_pin(4),
            PasswordPreset::Pass8 => self.try_make_password(8),
            PasswordPreset::Pass12 => self.try_make_password(12),
            PasswordPreset::Pass16 => self.try_make_password(16),
            PasswordPreset::Pass32 => self.try_make_password(32),
            PasswordPreset::Key128 => self.try_make_hex_block(16),
            PasswordPreset::Key192 => self.try_make_hex_block(24),
            PasswordPreset::Key256 => self.try_make_hex_block(32),
        }
    }

    /// Pick a length from `range`: `min + make_number(max - min + 1)`.
    ///
    /// The span is taken in 64 bits so `0-4294967295` is a valid range;
    /// for spans that fit in `u32` this is the same draw as
    /// [`Self::try_make_number`].
    pub fn pick_length(&mut self, range: LengthRange) -> Result<usize> {
        if range.min >= range.max {
            return Ok(range.min as usize);
        }
        let span = u64::from(range.max - range.min) + 1;
        let t = self.pool.draw_u64()?;
        // `t % span` is at most `max - min`.
        let extra = (t % span) as u32;
        Ok((range.min + extra) as usize)
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Canned password shapes, from PINs to 256-bit keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPreset {
    /// Bank cards, SIM cards.
    Pin4,
    /// Non-important accounts, guest WiFi.
    Pass8,
    /// Web sites, online services.
    #[default]
    Pass12,
    /// Local computer accounts.
    Pass16,
    /// Disk encryption, private WiFi.
    Pass32,
    Key128,
    Key192,
    Key256,
}

impl PasswordPreset {
    pub const ALL: [PasswordPreset; 8] = [
        Self::Pin4,
        Self::Pass8,
        Self::Pass12,
        Self::Pass16,
        Self::Pass32,
        Self::Key128,
        Self::Key192,
        Self::Key256,
    ];

    /// Short name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pin4 => "pin4",
            Self::Pass8 => "pass8",
            Self::Pass12 => "pass12",
            Self::Pass16 => "pass16",
            Self::Pass32 => "pass32",
            Self::Key128 => "key128",
            Self::Key192 => "key192",
            Self::Key256 => "key256",
        }
    }

    /// Human description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Pin4 => "4-digit PIN (bank cards, SIM cards, etc.)",
            Self::Pass8 => "8-char password (non-important accounts, guest WiFi, etc.)",
            Self::Pass12 => "12-char password (web sites, online services)",
            Self::Pass16 => "16-char password (local computer accounts)",
            Self::Pass32 => "32-char password (disk encryption, private WiFi, etc.)",
            Self::Key128 => "128-bit key in hex",
            Self::Key192 => "192-bit key in hex",
            Self::Key256 => "256-bit key in hex",
        }
    }
}

impl fmt::Display for PasswordPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PasswordPreset {
    type Err = PassKeeperError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                PassKeeperError::ConfigError(format!(
                    "unknown password preset '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Length ranges
// ---------------------------------------------------------------------------

/// A length written as `N` or `MIN-MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    pub min: u32,
    pub max: u32,
}

impl LengthRange {
    pub fn fixed(len: u32) -> Self {
        Self { min: len, max: len }
    }
}

impl FromStr for LengthRange {
    type Err = PassKeeperError;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim().parse::<u32>().map_err(|_| {
                PassKeeperError::CommandFailed(format!(
                    "invalid length '{s}' — use a number or a range like 5-10"
                ))
            })
        };

        match s.split_once('-') {
            Some((min, max)) => {
                let (min, max) = (parse(min)?, parse(max)?);
                if min > max {
                    return Err(PassKeeperError::CommandFailed(format!(
                        "invalid length range '{s}' — minimum exceeds maximum"
                    )));
                }
                Ok(Self { min, max })
            }
            None => parse(s).map(Self::fixed),
        }
    }
}
