use anyhow::{Context, Result};
use refrain_search::{config, Config};
use toml_edit::{Array, DocumentMut};

/// Keys `config get` and `config set` understand.
const KEYS: &str = "backend_base_url, albums, debounce_ms, request_timeout_secs";

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  backend_base_url: {}", config.backend_base_url);
    println!("  albums: {}", config.albums.join(", "));
    println!("  debounce_ms: {}", config.debounce_ms);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);
    println!("  logging: {:?}", config.logging);

    println!("\nPriority: CLI args > ENV vars (REFRAIN_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        match key.as_str() {
            "backend_base_url" => println!("{}", config.backend_base_url),
            "albums" => println!("{}", config.albums.join(", ")),
            "debounce_ms" => println!("{}", config.debounce_ms),
            "request_timeout_secs" => println!("{}", config.request_timeout_secs),
            _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, KEYS),
        }
    } else {
        // No key provided, show entire config file contents
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'refrain config init' to create it.");
        }
    }

    Ok(())
}

/// Set a config value, keeping the rest of the file (comments included).
pub fn set_config(key: String, value: String) -> Result<()> {
    let config_path = config::config_file_path();

    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let mut doc = contents
        .parse::<DocumentMut>()
        .context("Failed to parse config file")?;

    apply_setting(&mut doc, &key, &value)?;

    std::fs::write(&config_path, doc.to_string()).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, value);
    println!("  in {}", config_path.display());

    Ok(())
}

/// Write `key = value` into the document, converting `value` to the key's type.
///
/// `albums` takes a comma-separated list.
fn apply_setting(doc: &mut DocumentMut, key: &str, value: &str) -> Result<()> {
    match key {
        "backend_base_url" => {
            doc[key] = toml_edit::value(value);
        }
        "debounce_ms" | "request_timeout_secs" => {
            let number: i64 = value
                .parse()
                .with_context(|| format!("{} must be a whole number, got {:?}", key, value))?;
            doc[key] = toml_edit::value(number);
        }
        "albums" => {
            let mut albums = Array::new();
            for album in value.split(',').map(str::trim).filter(|a| !a.is_empty()) {
                albums.push(album);
            }
            doc[key] = toml_edit::value(albums);
        }
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, KEYS),
    }
    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure refrain.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_doc() -> DocumentMut {
        config::example_config().parse().unwrap()
    }

    #[test]
    fn test_set_backend_url_keeps_comments() {
        let mut doc = example_doc();
        apply_setting(&mut doc, "backend_base_url", "http://localhost:9000").unwrap();

        let text = doc.to_string();
        assert!(text.contains("backend_base_url = \"http://localhost:9000\""));
        assert!(text.starts_with("# Refrain Configuration File"));
    }

    #[test]
    fn test_set_numeric_key() {
        let mut doc = example_doc();
        apply_setting(&mut doc, "debounce_ms", "150").unwrap();
        assert_eq!(doc["debounce_ms"].as_integer(), Some(150));

        assert!(apply_setting(&mut doc, "debounce_ms", "fast").is_err());
    }

    #[test]
    fn test_set_albums_from_list() {
        let mut doc = example_doc();
        apply_setting(&mut doc, "albums", "Freudian, Son Of Spergy ,").unwrap();

        let albums: Vec<_> = doc["albums"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(albums, vec!["Freudian", "Son Of Spergy"]);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut doc = example_doc();
        let err = apply_setting(&mut doc, "theme", "dark").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }
}
