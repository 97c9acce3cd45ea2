//! Preference file commands

use crate::config::{paths::FundwatchPaths, settings::Settings};
use crate::error::FundResult;

/// Write the current preferences (defaults on first run) to disk
pub fn handle_init_command(paths: &FundwatchPaths, settings: &Settings) -> FundResult<()> {
    let existed = paths.is_initialized();
    settings.save(paths)?;

    if existed {
        println!("Preferences rewritten at: {}", paths.settings_file().display());
    } else {
        println!("Initialized Fundwatch at: {}", paths.base_dir().display());
        println!();
        println!("Edit {} to change form defaults,", paths.settings_file().display());
        println!("the chat toggle, or the AI endpoint.");
    }
    Ok(())
}

/// Show paths and effective settings
pub fn handle_config_command(paths: &FundwatchPaths, settings: &Settings) -> FundResult<()> {
    println!("Fundwatch Configuration");
    println!("=======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!(
        "Preferences file: {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not created)" }
    );
    println!("Log file:         {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
    println!("  Branch size:      {}", settings.defaults.branch_size);
    println!(
        "  Hourly rate:      {}",
        settings.defaults.hourly_rate.format_with_symbol(&settings.currency_symbol)
    );
    println!("  Fiscal year:      {}", settings.defaults.fiscal_year);
    println!("  Chat enabled:     {}", settings.chat_enabled);
    println!("  AI model:         {}", settings.ai.model);
    println!("  AI endpoint:      {}", settings.ai.base_url);
    println!("  AI timeout:       {}s", settings.ai.timeout_secs);
    Ok(())
}
