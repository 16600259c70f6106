use std::path::{Path, PathBuf};

use crate::{index::PrefixIndex, models::Config, store::JsonStore};

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

const DEFAULT_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_DATA_PATH: &str = "data.json";

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load and merge one or more config files.
pub fn init_config(paths: &[PathBuf]) -> Config {
    let mut config: Option<Config> = None;

    for path in paths {
        log::info!("loading config: {}", path.display());
        match read_config(path) {
            Ok(c) => {
                if let Some(ref mut existing) = config {
                    merge_config(existing, c);
                } else {
                    config = Some(c);
                }
            }
            Err(e) => {
                log::error!("error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    let mut config = config.unwrap_or_else(|| {
        log::error!("no config files specified");
        std::process::exit(1);
    });
    apply_defaults(&mut config);
    config
}

/// Open the word store and build the index over it. `data_path` overrides
/// the path in the config.
pub fn init_index(config: &Config, data_path: Option<&Path>) -> PrefixIndex {
    let path = match data_path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(&config.index.path),
    };

    let store = JsonStore::new(path);
    log::info!("word store: {}", store.path().display());
    PrefixIndex::open(store)
}

/// Generate sample config file.
pub fn generate_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err("config file already exists".into());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Load configuration from TOML file.
fn read_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Merge the given src config into the dest config struct.
fn merge_config(dest: &mut Config, src: Config) {
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if src.app.max_suggestions.is_some() {
        dest.app.max_suggestions = src.app.max_suggestions;
    }
    if !src.index.path.is_empty() {
        dest.index.path = src.index.path;
    }
}

fn apply_defaults(config: &mut Config) {
    if config.app.address.is_empty() {
        config.app.address = DEFAULT_ADDRESS.to_string();
    }
    if config.index.path.is_empty() {
        config.index.path = DEFAULT_DATA_PATH.to_string();
    }
}
