use std::env;
use std::str::FromStr;
use tracing::{info, warn};

pub const ID_STRATEGY_VAR: &str = "DOCSTORE_ID_STRATEGY";

/// How identifiers are generated for documents saved without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Random UUID.
    #[default]
    UuidV4,
    /// Time-ordered UUID.
    UuidV7,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid-v4" | "uuidv4" | "v4" => Ok(IdStrategy::UuidV4),
            "uuid-v7" | "uuidv7" | "v7" => Ok(IdStrategy::UuidV7),
            other => Err(format!("unknown id strategy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub id_strategy: IdStrategy,
}

impl StoreConfig {
    /// Reads the configuration from the environment, falling back to the
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let id_strategy = match lookup(ID_STRATEGY_VAR) {
            Some(raw) => match raw.parse::<IdStrategy>() {
                Ok(strategy) => {
                    info!(
                        "Using id strategy {:?} from environment variable {}.",
                        strategy, ID_STRATEGY_VAR
                    );
                    strategy
                }
                Err(e) => {
                    warn!(
                        "Invalid {} value: {}. Using default {:?}.",
                        ID_STRATEGY_VAR,
                        e,
                        IdStrategy::default()
                    );
                    IdStrategy::default()
                }
            },
            None => {
                info!(
                    "{} environment variable not set. Using default {:?}.",
                    ID_STRATEGY_VAR,
                    IdStrategy::default()
                );
                IdStrategy::default()
            }
        };

        Self { id_strategy }
    }
}
