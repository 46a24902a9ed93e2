//! Application configuration.
//!
//! Settings are layered: built-in defaults, then `config.toml` under the
//! user's config directory, then `ARG_*` environment variables.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use tracing::info;

use crate::{
    shop::{DEFAULT_QUANTITY_KG, MAX_QUANTITY_KG, MIN_QUANTITY_KG},
    wallet::{DEFAULT_STARTING_BALANCE, DEFAULT_TOP_UP_AMOUNTS},
};

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "arg-demo";
/// Prefix for environment overrides, e.g. `ARG_STARTING_BALANCE`.
pub const ENV_PREFIX: &str = "ARG";

const DEFAULT_CONFIG: &str = r#"# ARG demo configuration.
# Every value can also be set through an ARG_* environment variable.

# Wallet balance (MYR) each shop session starts with.
starting_balance = 210.0

# Top-up buttons on the wallet page.
top_up_amounts = [5, 10, 20, 50, 100, 200]

# Quantity (kg) preselected on the product page.
default_quantity_kg = 5

# JSON catalog used instead of the built-in listings.
# catalog_path = "/path/to/catalog.json"
"#;

/// Resolved settings for the demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Wallet balance (MYR) each shop session starts with.
    pub starting_balance: f64,
    /// JSON catalog to load instead of the built-in listings.
    pub catalog_path: Option<PathBuf>,
    /// Preset amounts offered on the wallet page.
    #[serde(deserialize_with = "one_or_many_amounts")]
    pub top_up_amounts: Vec<u32>,
    /// Quantity preselected whenever a product page opens.
    pub default_quantity_kg: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            catalog_path: None,
            top_up_amounts: DEFAULT_TOP_UP_AMOUNTS.to_vec(),
            default_quantity_kg: DEFAULT_QUANTITY_KG,
        }
    }
}

impl AppConfig {
    /// Load from the default config file and the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from `path` (optional on disk) and the process environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(path.as_ref(), env_source())
    }

    fn build(path: &Path, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        config.validate()?;
        info!(
            path = %path.display(),
            starting_balance = config.starting_balance,
            catalog = ?config.catalog_path,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            bail!(
                "starting_balance must be a non-negative amount, got {}",
                self.starting_balance
            );
        }
        if self.top_up_amounts.is_empty() {
            bail!("top_up_amounts must list at least one amount");
        }
        if self.top_up_amounts.contains(&0) {
            bail!("top_up_amounts must all be positive");
        }
        if !(MIN_QUANTITY_KG..=MAX_QUANTITY_KG).contains(&self.default_quantity_kg) {
            bail!(
                "default_quantity_kg must be within {MIN_QUANTITY_KG}..={MAX_QUANTITY_KG}, got {}",
                self.default_quantity_kg
            );
        }
        Ok(())
    }
}

/// Location of `config.toml`, falling back to the working directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write a commented default config on first run. Returns its path.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = default_config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("top_up_amounts")
}

/// `ARG_TOP_UP_AMOUNTS=50` reaches us as a bare integer, not a one-element list.
fn one_or_many_amounts<'de, D>(deserializer: D) -> std::result::Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountsVisitor;

    impl<'de> Visitor<'de> for AmountsVisitor {
        type Value = Vec<u32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an amount or a list of amounts")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
            u32::try_from(value)
                .map(|amount| vec![amount])
                .map_err(|_| E::custom(format!("top-up amount {value} is out of range")))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Self::Value, E> {
            u32::try_from(value)
                .map(|amount| vec![amount])
                .map_err(|_| E::custom(format!("top-up amount {value} is out of range")))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
            value
                .split(',')
                .map(|part| {
                    part.trim()
                        .parse::<u32>()
                        .map_err(|_| E::custom(format!("invalid top-up amount {part:?}")))
                })
                .collect()
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
            let mut amounts = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(amount) = seq.next_element::<u32>()? {
                amounts.push(amount);
            }
            Ok(amounts)
        }
    }

    deserializer.deserialize_any(AmountsVisitor)
}
