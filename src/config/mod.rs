//! Configuration module for the trading policy engine.
//!
//! The backing INI file is organized by domain: General, Broker (`[IB]`),
//! Policy, Notifications (`[slack]`) and Reports. Each section has its own
//! typed struct; `Config` aggregates them and `ConfigStore` owns the file.

mod broker_config;
mod general_config;
mod notifications_config;
mod policy_config;
mod reports_config;
mod section_reader;
mod store;

pub use broker_config::{BROKER_SECTION, BrokerConfig};
pub use general_config::{GENERAL_SECTION, GeneralConfig};
pub use notifications_config::{NOTIFICATIONS_SECTION, NotificationsConfig};
pub use policy_config::{POLICY_SECTION, PolicyConfig};
pub use reports_config::{REPORTS_SECTION, ReportsConfig};
pub use store::ConfigStore;

use crate::domain::errors::ParseError;
use crate::domain::restriction::keep_first_unless_advisor;
use crate::infrastructure::IniDocument;
use serde::Serialize;

/// Fully derived configuration.
///
/// Leverage scaling, the single-account rule and email filtering have all
/// been applied; readers never re-derive anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub broker: BrokerConfig,
    pub policy: PolicyConfig,
    pub notifications: NotificationsConfig,
    pub reports: ReportsConfig,
}

impl Config {
    pub fn from_document(doc: &IniDocument) -> Result<Self, ParseError> {
        let general = GeneralConfig::from_document(doc)?;
        let mut broker = BrokerConfig::from_document(doc)?;
        let mut policy = PolicyConfig::from_document(doc)?;
        let notifications = NotificationsConfig::from_document(doc)?;
        let reports = ReportsConfig::from_document(doc)?;

        // Protect other accounts if not advisor
        keep_first_unless_advisor(broker.is_advisor, "account", &mut broker.accounts);
        keep_first_unless_advisor(broker.is_advisor, "stake", &mut policy.stakes);

        Ok(Self {
            general,
            broker,
            policy,
            notifications,
            reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
[general]
name = vol-bot

[IB]
port = 7497
accounts = U1, U2
is_advisor = false

[policy]
stakes = 1000, 2000
";

    #[test]
    fn test_minimal_document_loads_with_defaults() {
        let doc = IniDocument::parse(MINIMAL).unwrap();
        let config = Config::from_document(&doc).unwrap();
        assert_eq!(config.general.name, "vol-bot");
        assert_eq!(config.notifications, NotificationsConfig::default());
        assert_eq!(config.reports, ReportsConfig::default());
    }

    #[test]
    fn test_non_advisor_keeps_first_account_and_stake() {
        let doc = IniDocument::parse(MINIMAL).unwrap();
        let config = Config::from_document(&doc).unwrap();
        assert_eq!(config.broker.accounts, vec!["U1"]);
        assert_eq!(config.policy.stakes, vec![1000]);
    }

    #[test]
    fn test_advisor_keeps_all_accounts_and_stakes() {
        let doc = IniDocument::parse(&MINIMAL.replace("is_advisor = false", "is_advisor = true")).unwrap();
        let config = Config::from_document(&doc).unwrap();
        assert_eq!(config.broker.accounts, vec!["U1", "U2"]);
        assert_eq!(config.policy.stakes, vec![1000, 2000]);
    }

    #[test]
    fn test_missing_required_sections() {
        let doc = IniDocument::parse("[general]\nname = x\n").unwrap();
        assert!(matches!(
            Config::from_document(&doc),
            Err(ParseError::MissingSection { ref section }) if section == "IB"
        ));
    }

    #[test]
    fn test_missing_name() {
        let doc = IniDocument::parse(&MINIMAL.replace("name = vol-bot", "")).unwrap();
        assert!(matches!(
            Config::from_document(&doc),
            Err(ParseError::MissingKey { ref key, .. }) if key == "name"
        ));
    }
}
