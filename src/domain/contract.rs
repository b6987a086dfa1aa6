//! Tradable contract symbols and contract types.

use super::errors::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Volatility products the policy is allowed to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MainContract {
    #[serde(rename = "UVXY")]
    Uvxy,
    #[serde(rename = "VXX")]
    Vxx,
    #[serde(rename = "VIXY")]
    Vixy,
    #[serde(rename = "SVIX")]
    Svix,
    #[serde(rename = "UVIX")]
    Uvix,
    #[serde(rename = "SVXY")]
    Svxy,
}

impl MainContract {
    pub const ALL: [MainContract; 6] = [
        MainContract::Uvxy,
        MainContract::Vxx,
        MainContract::Vixy,
        MainContract::Svix,
        MainContract::Uvix,
        MainContract::Svxy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MainContract::Uvxy => "UVXY",
            MainContract::Vxx => "VXX",
            MainContract::Vixy => "VIXY",
            MainContract::Svix => "SVIX",
            MainContract::Uvix => "UVIX",
            MainContract::Svxy => "SVXY",
        }
    }
}

impl FromStr for MainContract {
    type Err = ValidationError;

    // Symbols are matched exactly; "uvxy" is not a known ticker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MainContract::ALL
            .into_iter()
            .find(|contract| contract.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownContract {
                symbol: s.to_string(),
            })
    }
}

impl fmt::Display for MainContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the main contract moves with volatility or against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    #[default]
    Regular,
    Inverse,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Regular => "regular",
            ContractType::Inverse => "inverse",
        }
    }
}

impl FromStr for ContractType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(ContractType::Regular),
            "inverse" => Ok(ContractType::Inverse),
            _ => Err(ValidationError::UnknownContractType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a caller-supplied symbol list, stopping at the first unknown symbol.
pub fn parse_contracts<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<MainContract>, ValidationError> {
    if symbols.is_empty() {
        return Err(ValidationError::EmptyContractList);
    }
    symbols
        .iter()
        .map(|s| MainContract::from_str(s.as_ref()))
        .collect()
}

/// Comma-joined form used in the backing file.
pub fn join_contracts(contracts: &[MainContract]) -> String {
    contracts
        .iter()
        .map(MainContract::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
