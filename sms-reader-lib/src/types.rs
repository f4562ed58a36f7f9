use std::{fmt, fs, path::Path, path::PathBuf, result::Result as StdResult, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::{KeywordFilter, PAYMENT_KEYWORDS};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

fn default_keywords() -> Vec<String> {
    PAYMENT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_case_sensitive() -> bool {
    true
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            case_sensitive: default_case_sensitive(),
        }
    }
}

impl FilterConfig {
    pub fn build(&self) -> Result<KeywordFilter> {
        let filter = KeywordFilter::new(self.keywords.iter().cloned())?;
        Ok(if self.case_sensitive {
            filter
        } else {
            filter.case_insensitive()
        })
    }
}

/// Bare `keywords` / `case_sensitive` table, as passed by mobile hosts.
impl FromStr for FilterConfig {
    type Err = toml::de::Error;
    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl ReaderConfig {
    pub fn new<P: Into<PathBuf>>(store_path: P) -> Self {
        Self {
            store: StoreConfig {
                path: store_path.into(),
            },
            filter: FilterConfig::default(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| Error::config(format!("cannot read {:?}: {}", path.as_ref(), e)))?;
        content.parse::<Self>().map_err(Error::config)
    }
}

impl FromStr for ReaderConfig {
    type Err = toml::de::Error;
    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl fmt::Display for ReaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        toml::to_string_pretty(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| write!(f, "{}", s))
    }
}
