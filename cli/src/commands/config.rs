//! Config command - show and edit the settings file.

use anyhow::Result;

use crate::settings::{Settings, SettingsStore};

pub async fn show(store: &SettingsStore, json: bool) -> Result<()> {
    let settings = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!("Settings file: {}", store.path().display());
    print_settings(&settings);
    Ok(())
}

pub async fn set_interval(store: &SettingsStore, secs: u64) -> Result<()> {
    let settings = store.set_refresh_interval(secs).await?;
    println!("Refresh interval set to {}s", settings.refresh_interval);
    Ok(())
}

pub async fn set_timeout(store: &SettingsStore, secs: u64) -> Result<()> {
    let settings = store.set_timeout(secs).await?;
    println!("Scan timeout set to {}s", settings.timeout_secs);
    Ok(())
}

pub async fn reset(store: &SettingsStore) -> Result<()> {
    let settings = store.reset().await?;
    println!("Settings reset to defaults");
    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &Settings) {
    let config = settings.scan_config();

    println!("  Refresh interval:  {}s", settings.refresh_interval);
    println!("  Scan timeout:      {}s", config.timeout.as_secs());
    println!("  lsof program:      {}", config.program);
    println!(
        "  Permission codes:  {}",
        if config.permission_exit_codes.is_empty() {
            "-".to_string()
        } else {
            config
                .permission_exit_codes
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    println!("  Permission signatures:");
    for signature in &config.permission_signatures {
        println!("    {}", signature);
    }
}
