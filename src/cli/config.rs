use crate::s3::{Credentials, Region};
use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::{fs::File, path::Path};

#[derive(Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    pub region: Option<String>,
    // S3 compatible providers
    pub endpoint: Option<String>,
}

impl Config {
    /// # Errors
    ///
    /// Will return `Err` if the file can not be opened or parsed
    pub fn new(config_path: &Path) -> Result<Self> {
        let file = File::open(config_path)
            .with_context(|| format!("unable to open {}", config_path.display()))?;

        let config: Self = serde_yaml_ng::from_reader(file)
            .with_context(|| format!("unable to parse config file {}", config_path.display()))?;

        Ok(config)
    }

    /// The `--region` flag wins over the config file, then `AWS_REGION`,
    /// `AWS_DEFAULT_REGION` and finally us-east-1
    ///
    /// # Errors
    ///
    /// Will return `Err` if the region name is unknown
    pub fn get_region(&self, flag: &str) -> Result<Region> {
        let name = Some(flag)
            .filter(|r| !r.is_empty())
            .or_else(|| self.region.as_deref().filter(|r| !r.is_empty()));

        if let Some(endpoint) = &self.endpoint {
            return Ok(Region::Custom {
                name: name.unwrap_or("us-east-1").to_string(),
                endpoint: endpoint.to_string(),
            });
        }

        match name {
            Some(r) => Ok(r.parse::<Region>()?),
            None => Ok(Region::default()),
        }
    }

    /// Keys from the environment take precedence over the file
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            &self.access_key,
            &SecretString::new(self.secret_key.clone().into()),
        )
    }
}
