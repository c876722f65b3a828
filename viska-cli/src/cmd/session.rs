//! Commands that talk to the native core: info, hash, session.

use std::path::Path;

use viska::{Client, Library};

use super::config::Config;
use super::{Error, Result, SessionArgs};

/// Show core version and effective configuration.
pub fn info(lib: &Library, cfg: &Config, config_path: &Path) -> Result<()> {
    println!("Core version:  {}", lib.version()?);
    println!("CLI version:   {}", env!("CARGO_PKG_VERSION"));
    println!("Config file:   {}", config_path.display());
    println!("Profiles dir:  {}", cfg.profiles_dir().display());
    Ok(())
}

/// Hash `text` (or the bytes it spells in hex) through the core.
pub fn hash(lib: &Library, text: &str, is_hex: bool) -> Result<()> {
    let data = if is_hex {
        hex::decode(text.trim_start_matches("0x"))
            .map_err(|e| Error::InvalidArgument(format!("invalid hex: {e}")))?
    } else {
        text.as_bytes().to_vec()
    };
    println!("{}", hex::encode(lib.hash(&data)?));
    Ok(())
}

/// Open every profile, print what the core knows about it, then release.
///
/// Clients are all opened before any is printed so several live handles
/// coexist. Every opened client is released even when a later one fails.
pub fn run(lib: &Library, profiles_dir: &Path, args: &SessionArgs) -> Result<()> {
    let mut clients = Vec::with_capacity(args.profiles.len());
    let opened = args.profiles.iter().try_for_each(|profile| {
        let path = profiles_dir.join(profile);
        let client = lib.create_client(&path.to_string_lossy())?;
        tracing::debug!(profile = %profile, handle = %client.handle(), "client opened");
        clients.push(client);
        Ok::<_, Error>(())
    });

    let printed = opened.and_then(|()| {
        for client in &clients {
            if let Some(name) = &args.display_name {
                client.set_display_name(Some(name))?;
            }
            print_client(client)?;
        }
        Ok(())
    });

    let released: Vec<_> = clients.iter().map(Client::release).collect();

    printed?;
    released.into_iter().collect::<viska::Result<()>>()?;
    Ok(())
}

fn print_client(client: &Client) -> Result<()> {
    println!("Handle:        {}", client.handle());
    println!("Name:          {}", client.name()?);
    println!("Profile path:  {}", client.profile_path()?);
    println!("Account ID:    {}", client.account_id_display()?);
    if let Some(display_name) = client.display_name()? {
        println!("Display name:  {display_name}");
    }
    println!();
    Ok(())
}
