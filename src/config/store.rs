//! File-backed owner of the live configuration.
//!
//! A `ConfigStore` keeps two views of the same file: the parsed document
//! (raw values, comments, unknown keys) and the derived `Config`. Every
//! mutation updates both and rewrites the whole document.
//!
//! The store does no locking. Hosts that share it between threads must
//! serialize access themselves, e.g. behind one `Mutex` per path.

use super::{BROKER_SECTION, Config, POLICY_SECTION};
use super::{BrokerConfig, GeneralConfig, NotificationsConfig, PolicyConfig, ReportsConfig};
use crate::domain::contract::{ContractType, join_contracts, parse_contracts};
use crate::domain::errors::{ConfigError, ParseError, PersistError, ValidationError};
use crate::infrastructure::{ConfigPersistence, IniDocument};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct ConfigStore {
    persistence: ConfigPersistence,
    document: IniDocument,
    config: Config,
}

impl ConfigStore {
    /// Read, parse and derive the configuration at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ParseError> {
        let persistence = ConfigPersistence::new(path);
        info!("Reading config from {:?} ...", persistence.path());

        let document = persistence.load()?;
        let config = Config::from_document(&document)?;

        info!(
            "Config loaded: name={}, accounts={:?}, stakes={:?}",
            config.general.name, config.broker.accounts, config.policy.stakes
        );
        Ok(Self {
            persistence,
            document,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn general(&self) -> &GeneralConfig {
        &self.config.general
    }

    pub fn broker(&self) -> &BrokerConfig {
        &self.config.broker
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.config.policy
    }

    pub fn notifications(&self) -> &NotificationsConfig {
        &self.config.notifications
    }

    pub fn reports(&self) -> &ReportsConfig {
        &self.config.reports
    }

    /// Replace the broker accounts.
    ///
    /// Unlike `load`, the single-account rule for non-advisors is not applied
    /// here; it takes effect again on the next load.
    pub fn set_accounts<S: AsRef<str>>(&mut self, accounts: &[S]) -> Result<(), PersistError> {
        let accounts: Vec<String> = accounts.iter().map(|a| a.as_ref().to_string()).collect();
        self.document
            .set(BROKER_SECTION, "accounts", accounts.join(", "));
        self.config.broker.accounts = accounts;
        self.persist()
    }

    /// Replace the traded symbols. Every symbol must be a known contract.
    pub fn set_main_contract<S: AsRef<str>>(&mut self, symbols: &[S]) -> Result<(), ConfigError> {
        let contracts = parse_contracts(symbols)?;
        self.document
            .set(POLICY_SECTION, "main_contract", join_contracts(&contracts));
        self.config.policy.main_contract = contracts;
        Ok(self.persist()?)
    }

    /// Store `value` as the raw contract leverage.
    ///
    /// Derived risk fields keep their current scaling until the next load.
    pub fn set_contract_leverage(&mut self, value: &str) -> Result<(), PersistError> {
        match value.trim().parse::<f64>() {
            Ok(leverage) => self.config.policy.contract_leverage = leverage,
            Err(_) => warn!(
                "contract_leverage '{}' is not a number; stored as-is, next load will reject it",
                value
            ),
        }
        self.document.set(POLICY_SECTION, "contract_leverage", value);
        self.persist()
    }

    pub fn set_contract_type(&mut self, value: &str) -> Result<(), ConfigError> {
        let contract_type: ContractType = value.parse()?;
        self.document
            .set(POLICY_SECTION, "contract_type", contract_type.as_str());
        self.config.policy.contract_type = contract_type;
        Ok(self.persist()?)
    }

    /// Raise `max_portfolio` and `stakes`, never lower them.
    ///
    /// `max_portfolio` changes only when `portfolio` is strictly larger.
    /// `stakes` is replaced when any supplied element is strictly larger than
    /// the stored one at the same position; the lengths must match. The file
    /// is rewritten on every successful call.
    pub fn apply_update(&mut self, portfolio: i64, stakes: Option<&[i64]>) -> Result<(), ConfigError> {
        let current = &self.config.policy;

        let new_stakes = match stakes {
            Some(supplied) if supplied.len() != current.stakes.len() => {
                return Err(ValidationError::StakeLengthMismatch {
                    supplied: supplied.len(),
                    stored: current.stakes.len(),
                }
                .into());
            }
            Some(supplied) if supplied.iter().zip(&current.stakes).any(|(new, old)| new > old) => {
                Some(supplied.to_vec())
            }
            Some(supplied) => {
                debug!("Stakes {:?} do not exceed {:?}; keeping", supplied, current.stakes);
                None
            }
            None => None,
        };

        let max_portfolio = current.max_portfolio;
        if portfolio > max_portfolio {
            info!("max_portfolio {} --> {}", max_portfolio, portfolio);
            self.document
                .set(POLICY_SECTION, "max_portfolio", portfolio.to_string());
            self.config.policy.max_portfolio = portfolio;
        } else {
            debug!("max_portfolio {} not above {}; keeping", portfolio, max_portfolio);
        }

        if let Some(stakes) = new_stakes {
            info!("stakes {:?} --> {:?}", self.config.policy.stakes, stakes);
            let joined = stakes
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.document.set(POLICY_SECTION, "stakes", joined);
            self.config.policy.stakes = stakes;
        }

        Ok(self.persist()?)
    }

    fn persist(&self) -> Result<(), PersistError> {
        self.persistence.save(&self.document)
    }
}
