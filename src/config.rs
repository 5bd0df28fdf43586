use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::Species;
use crate::ensembl::ENSEMBL_BASE;
use crate::error::KiraError;
use crate::kegg::KEGG_BASE;
use crate::pubmed::{DEFAULT_MAX_RESULTS, EUTILS_BASE};
use crate::uniprot::UNIPROT_BASE;

pub const CONFIG_FILE: &str = "kira-mo.json";
pub const ENV_DEFAULT_SPECIES: &str = "KIRA_MO_DEFAULT_SPECIES";
pub const ENV_MAX_RESULTS: &str = "KIRA_MO_MAX_RESULTS";

pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// On-disk shape of `kira-mo.json`. Every field is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub default_species: Option<String>,
    #[serde(default)]
    pub max_results: Option<usize>,
    #[serde(default)]
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointsConfig {
    #[serde(default)]
    pub kegg: Option<String>,
    #[serde(default)]
    pub ensembl: Option<String>,
    #[serde(default)]
    pub uniprot: Option<String>,
    #[serde(default)]
    pub eutils: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub kegg: String,
    pub ensembl: String,
    pub uniprot: String,
    pub eutils: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            kegg: KEGG_BASE.to_string(),
            ensembl: ENSEMBL_BASE.to_string(),
            uniprot: UNIPROT_BASE.to_string(),
            eutils: EUTILS_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_species: Species,
    pub max_results: usize,
    pub concurrency: usize,
    pub timeout: Duration,
    pub endpoints: Endpoints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_species: Species::default(),
            max_results: DEFAULT_MAX_RESULTS,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            endpoints: Endpoints::default(),
        }
    }
}

/// Environment overrides, captured up front so resolution stays testable.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub default_species: Option<String>,
    pub max_results: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            default_species: non_empty_var(ENV_DEFAULT_SPECIES),
            max_results: non_empty_var(ENV_MAX_RESULTS),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the config file, then the environment.
    pub fn resolve(path: Option<&str>) -> Result<Settings, KiraError> {
        let config = match Self::locate(path)? {
            Some(config_path) => Self::read(config_path)?,
            None => Config::default(),
        };
        Self::resolve_config(config, &EnvOverrides::from_env())
    }

    fn locate(path: Option<&str>) -> Result<Option<PathBuf>, KiraError> {
        if let Some(path) = path {
            let explicit = PathBuf::from(path);
            if !explicit.exists() {
                return Err(KiraError::ConfigRead(explicit));
            }
            return Ok(Some(explicit));
        }
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Ok(Some(local));
        }
        Ok(user_config_path()
            .filter(|candidate| candidate.as_std_path().exists())
            .map(Utf8PathBuf::into_std_path_buf))
    }

    fn read(path: PathBuf) -> Result<Config, KiraError> {
        tracing::debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(&path).map_err(|_| KiraError::ConfigRead(path.clone()))?;
        serde_json::from_str(&content).map_err(|err| KiraError::ConfigParse(err.to_string()))
    }

    pub fn resolve_config(config: Config, env: &EnvOverrides) -> Result<Settings, KiraError> {
        let defaults = Settings::default();

        let default_species = match env
            .default_species
            .as_deref()
            .or(config.default_species.as_deref())
        {
            Some(value) => value.parse()?,
            None => defaults.default_species,
        };

        let max_results = match env.max_results.as_deref() {
            Some(value) => value.parse::<usize>().map_err(|_| {
                KiraError::ConfigValue(format!("{ENV_MAX_RESULTS} must be a positive integer"))
            })?,
            None => config.max_results.unwrap_or(defaults.max_results),
        };
        if max_results == 0 {
            return Err(KiraError::ConfigValue(
                "max_results must be at least 1".to_string(),
            ));
        }

        let concurrency = config.concurrency.unwrap_or(defaults.concurrency);
        if concurrency == 0 {
            return Err(KiraError::ConfigValue(
                "concurrency must be at least 1".to_string(),
            ));
        }

        let timeout_secs = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(KiraError::ConfigValue(
                "timeout_secs must be at least 1".to_string(),
            ));
        }

        let endpoints = config.endpoints;
        let base = defaults.endpoints;
        Ok(Settings {
            default_species,
            max_results,
            concurrency,
            timeout: Duration::from_secs(timeout_secs),
            endpoints: Endpoints {
                kegg: endpoints.kegg.unwrap_or(base.kegg),
                ensembl: endpoints.ensembl.unwrap_or(base.ensembl),
                uniprot: endpoints.uniprot.unwrap_or(base.uniprot),
                eutils: endpoints.eutils.unwrap_or(base.eutils),
            },
        })
    }
}

pub fn user_config_path() -> Option<Utf8PathBuf> {
    ProjectDirs::from("", "", "kira-multiomics").and_then(|dirs| {
        Utf8PathBuf::from_path_buf(dirs.config_dir().join(CONFIG_FILE)).ok()
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let settings =
            ConfigLoader::resolve_config(Config::default(), &EnvOverrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_results, 5);
        assert_eq!(settings.default_species.as_str(), "homo_sapiens");
    }

    #[test]
    fn env_overrides_config_file() {
        let config = Config {
            default_species: Some("rattus_norvegicus".to_string()),
            max_results: Some(10),
            ..Config::default()
        };
        let env = EnvOverrides {
            default_species: Some("Mus musculus".to_string()),
            max_results: Some("3".to_string()),
        };
        let settings = ConfigLoader::resolve_config(config, &env).unwrap();
        assert_eq!(settings.default_species.as_str(), "mus_musculus");
        assert_eq!(settings.max_results, 3);
    }

    #[test]
    fn zero_values_are_rejected() {
        let config = Config {
            concurrency: Some(0),
            ..Config::default()
        };
        assert_matches!(
            ConfigLoader::resolve_config(config, &EnvOverrides::default()),
            Err(KiraError::ConfigValue(_))
        );

        let env = EnvOverrides {
            default_species: None,
            max_results: Some("many".to_string()),
        };
        assert_matches!(
            ConfigLoader::resolve_config(Config::default(), &env),
            Err(KiraError::ConfigValue(_))
        );
    }
}
