//! Known source systems.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Broad family a connector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorCategory {
    Warehouse,
    Database,
    Lake,
    ObjectStore,
    Bi,
    Api,
}

/// A source system a connection crawls.
///
/// The lowercase value is the second segment of every connection-scoped
/// qualified name (`default/<connector>/<epoch>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    Snowflake,
    Postgres,
    Bigquery,
    Databricks,
    Redshift,
    S3,
    Tableau,
    Api,
}

impl ConnectorType {
    pub const ALL: [ConnectorType; 8] = [
        Self::Snowflake,
        Self::Postgres,
        Self::Bigquery,
        Self::Databricks,
        Self::Redshift,
        Self::S3,
        Self::Tableau,
        Self::Api,
    ];

    /// Returns the value used in qualified names and `connectorName`.
    #[must_use]
    pub fn value(&self) -> &'static str {
        match self {
            Self::Snowflake => "snowflake",
            Self::Postgres => "postgres",
            Self::Bigquery => "bigquery",
            Self::Databricks => "databricks",
            Self::Redshift => "redshift",
            Self::S3 => "s3",
            Self::Tableau => "tableau",
            Self::Api => "api",
        }
    }

    #[must_use]
    pub fn category(&self) -> ConnectorCategory {
        match self {
            Self::Snowflake | Self::Bigquery | Self::Redshift => ConnectorCategory::Warehouse,
            Self::Postgres => ConnectorCategory::Database,
            Self::Databricks => ConnectorCategory::Lake,
            Self::S3 => ConnectorCategory::ObjectStore,
            Self::Tableau => ConnectorCategory::Bi,
            Self::Api => ConnectorCategory::Api,
        }
    }

    /// Parses a connector from its lowercase value.
    pub fn parse(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.value() == value)
            .ok_or_else(|| Error::UnknownConnector(value.to_string()))
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ConnectorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
