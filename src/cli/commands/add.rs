//! `passkeeper add` — add a record, optionally with a generated password.

use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, prompt_password, Cli};
use crate::config::Settings;
use crate::errors::{PassKeeperError, Result};
use crate::random::{Generator, PasswordPreset};
use crate::vault::{Record, VaultStore};

/// Arguments of the `add` command.
pub struct AddArgs<'a> {
    pub service: &'a str,
    pub login: &'a str,
    pub password: Option<&'a str>,
    /// `Some("")` asks for the configured default preset.
    pub generate: Option<&'a str>,
    pub comment: &'a str,
}

/// What [`run`] stored.
#[derive(Debug)]
pub struct Added {
    pub index: usize,
    pub name: String,
    /// The preset and secret, when the password was generated.
    pub generated: Option<(PasswordPreset, Zeroizing<String>)>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let (cwd, settings) = load_settings()?;
    let path = settings.vault_path(&cwd, cli.vault.as_deref());
    let vault_password = prompt_password()?;

    let typed = match (args.password, args.generate) {
        (None, None) => Some(prompt_record_password()?),
        _ => None,
    };
    let args = AddArgs {
        password: typed.as_deref().map(String::as_str).or(args.password),
        ..*args
    };

    let added = run(&path, &vault_password, &args, &settings)?;
    if let Some((preset, secret)) = &added.generated {
        output::info(&format!("Generated {}: {}", preset.description(), secret.as_str()));
    }
    output::success(&format!("Added \"{}\" as record #{}", added.name, added.index));
    Ok(())
}

/// Open the vault, add the record and save.
///
/// The password is `args.password`, or generated when `args.generate`
/// is set; with neither the record gets an empty password.  The vault
/// is opened before anything is generated, so a wrong passphrase fails
/// first.
pub fn run(path: &Path, passphrase: &str, args: &AddArgs<'_>, settings: &Settings) -> Result<Added> {
    let (store, mut vault) = VaultStore::open(path, passphrase)?;

    let (secret, generated) = match (args.password, args.generate) {
        (Some(pw), _) => (Zeroizing::new(pw.to_string()), None),
        (None, Some(preset)) => {
            let preset = resolve_preset(preset, settings)?;
            let secret = Zeroizing::new(Generator::new().make_preset(preset)?);
            (secret.clone(), Some((preset, secret)))
        }
        (None, None) => (Zeroizing::new(String::new()), None),
    };

    let record = Record::new(args.service, args.login, secret.as_bytes(), args.comment);
    let name = record.display_name();
    let index = vault.insert(record);
    store.save(&vault)?;

    Ok(Added {
        index,
        name,
        generated,
    })
}

/// The named preset, or the configured default for an empty name.
fn resolve_preset(name: &str, settings: &Settings) -> Result<PasswordPreset> {
    if name.is_empty() {
        settings.preset()
    } else {
        name.parse()
    }
}

fn prompt_record_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("Password for the new record")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassKeeperError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_preset_name_uses_configured_default() {
        let settings = Settings {
            default_preset: "key128".into(),
            ..Settings::default()
        };
        assert_eq!(resolve_preset("", &settings).unwrap(), PasswordPreset::Key128);
        assert_eq!(resolve_preset("pin4", &settings).unwrap(), PasswordPreset::Pin4);
        assert!(resolve_preset("pass7", &settings).is_err());
    }
}
