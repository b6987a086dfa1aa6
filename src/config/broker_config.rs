//! Brokerage gateway configuration, read from the `[IB]` section.

use super::section_reader::SectionReader;
use crate::domain::errors::ParseError;
use crate::infrastructure::IniDocument;
use serde::Serialize;

pub const BROKER_SECTION: &str = "IB";

/// Gateway connection and account settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokerConfig {
    /// TCP port, 0-65535
    pub port: u16,
    pub host: String,
    pub user_id: i64,
    pub autostart: bool,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub accounts: Vec<String>,
    /// Advisor accounts may trade several sub-accounts and stakes at once.
    pub is_advisor: bool,
}

impl BrokerConfig {
    pub fn from_document(doc: &IniDocument) -> Result<Self, ParseError> {
        let section = SectionReader::required(doc, BROKER_SECTION)?;
        Ok(Self {
            port: section.required_parse("port", "port number")?,
            host: section.string("host", "127.0.0.1"),
            user_id: section.parse("user_id", 100, "integer")?,
            autostart: section.boolean("autostart", false)?,
            username: section.string("username", ""),
            password: section.string("password", ""),
            accounts: section.required_list("accounts")?,
            is_advisor: section.required_boolean("is_advisor")?,
        })
    }
}
