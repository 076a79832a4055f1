use anyhow::Result;
use refrain_core::AlbumFilter;
use refrain_search::Config;

/// List the values accepted by `--album` and offered by the TUI filter.
pub fn list_albums(config: &Config) -> Result<()> {
    for option in AlbumFilter::options(&config.albums) {
        println!("{}", option);
    }
    Ok(())
}
