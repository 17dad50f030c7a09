use crate::core::{
    config::AppConfig, error::Result, print_json, print_section_header, print_success,
};

/// Show the effective configuration, its location, or write the defaults
pub fn execute_config(show_path: bool, init: bool) -> Result<()> {
    let config_file = AppConfig::config_file()?;

    if show_path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if init {
        let existed = config_file.exists();
        AppConfig::load_or_create()?;
        if !existed {
            print_success(&format!("Created {}", config_file.display()));
        }
    }

    let config = AppConfig::load_or_default()?;
    print_section_header("Configuration");
    print_json(&config)
}
