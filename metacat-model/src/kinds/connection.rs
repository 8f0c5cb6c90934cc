use chrono::Utc;
use metacat_types::{ConnectorCategory, ConnectorType, qualified_name};
use serde::{Deserialize, Serialize};

use crate::schema::AssetSchema;
use crate::{Asset, AssetKind, ModelError, ModelResult};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "Connection",
    super_types: super::ASSET,
    required: &[],
    relationships: &[],
};

/// A configured link to a source system; the root of every
/// connection-scoped qualified name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionAttributes {
    pub category: Option<ConnectorCategory>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub allow_query: Option<bool>,
    pub allow_query_preview: Option<bool>,
    pub admin_users: Option<Vec<String>>,
    pub admin_groups: Option<Vec<String>>,
    pub admin_roles: Option<Vec<String>>,
    pub source_logo: Option<String>,
}

impl AssetKind for ConnectionAttributes {
    const TYPE_NAME: &'static str = "Connection";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }
}

pub type Connection = Asset<ConnectionAttributes>;

impl Connection {
    /// Builds a new connection. At least one admin user or group is needed.
    pub fn creator(
        name: &str,
        connector: ConnectorType,
        admin_users: Vec<String>,
        admin_groups: Vec<String>,
    ) -> ModelResult<Self> {
        Self::creator_at(name, connector, admin_users, admin_groups, Utc::now().timestamp())
    }

    /// As [`Connection::creator`], with an explicit epoch for the qualified name.
    pub fn creator_at(
        name: &str,
        connector: ConnectorType,
        admin_users: Vec<String>,
        admin_groups: Vec<String>,
        epoch_secs: i64,
    ) -> ModelResult<Self> {
        if admin_users.is_empty() && admin_groups.is_empty() {
            return Err(ModelError::missing("Connection", "adminUsers"));
        }
        let qualified_name = qualified_name::connection(connector.value(), epoch_secs);
        let mut connection = Self::minimal(qualified_name.clone(), name);
        connection.common.connector_name = Some(connector.value().to_string());
        connection.common.connection_qualified_name = Some(qualified_name);
        connection.attributes = ConnectionAttributes {
            category: Some(connector.category()),
            admin_users: Some(admin_users).filter(|u| !u.is_empty()),
            admin_groups: Some(admin_groups).filter(|g| !g.is_empty()),
            ..Default::default()
        };
        Ok(connection)
    }

    pub fn updater(qualified_name: &str, name: &str) -> Self {
        Self::minimal(qualified_name, name)
    }

    /// The connector parsed from the qualified name.
    pub fn connector(&self) -> Option<ConnectorType> {
        self.qualified_name()
            .and_then(|qn| qualified_name::segment(qn, 1))
            .and_then(|c| ConnectorType::parse(c).ok())
    }
}
