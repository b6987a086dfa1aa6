//! Trading policy limits, read from the `[policy]` section.
//!
//! `hedge_percent` and `max_put_risk` are stored already multiplied by
//! `contract_leverage`. The file keeps the raw values, so the scaling is
//! applied once per load and never compounds across rewrites.

use super::section_reader::SectionReader;
use crate::domain::contract::{ContractType, MainContract};
use crate::domain::errors::ParseError;
use crate::infrastructure::IniDocument;
use serde::Serialize;
use std::str::FromStr;

pub const POLICY_SECTION: &str = "policy";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyConfig {
    // Direction
    pub trade_weekends: bool,
    pub long_positions: bool,
    pub short_positions: bool,

    // Hedging & Risk (leverage adjusted)
    pub hedge: bool,
    pub hedge_percent: f64,
    pub max_put_risk: f64,

    // Sizing
    pub stakes: Vec<i64>,
    pub max_portfolio: i64,

    // Order Routing
    pub limit_orders: bool,
    pub distribute_orders: bool,
    pub distribute_quantity: i64,
    pub distribute_time: f64,
    pub distribute_order_type: bool,

    // Contract
    pub main_contract: Vec<MainContract>,
    pub contract_leverage: f64,
    pub contract_type: ContractType,
}

impl PolicyConfig {
    pub fn from_document(doc: &IniDocument) -> Result<Self, ParseError> {
        let section = SectionReader::required(doc, POLICY_SECTION)?;

        let contract_leverage = section.parse("contract_leverage", 1.5, "float")?;
        let raw_hedge_percent: f64 = section.parse("hedge_percent", 0.5, "float")?;
        let raw_max_put_risk: f64 = section.parse("max_put_risk", 0.05, "float")?;

        Ok(Self {
            trade_weekends: section.boolean("trade_weekends", false)?,
            long_positions: section.boolean("long_positions", true)?,
            short_positions: section.boolean("short_positions", true)?,
            hedge: section.boolean("hedge", false)?,
            hedge_percent: raw_hedge_percent * contract_leverage,
            max_put_risk: raw_max_put_risk * contract_leverage,
            stakes: section.required_parsed_list("stakes", "integer list")?,
            max_portfolio: section.parse("max_portfolio", 0, "integer")?,
            limit_orders: section.boolean("limit_orders", false)?,
            distribute_orders: section.boolean("distribute_orders", false)?,
            distribute_quantity: section.parse("distribute_quantity", 100_000, "integer")?,
            distribute_time: section.parse("distribute_time", 0.1, "float")?,
            distribute_order_type: section.boolean("distribute_order_type", true)?,
            main_contract: Self::parse_main_contract(doc)?,
            contract_leverage,
            contract_type: section.parse("contract_type", ContractType::Regular, "contract type")?,
        })
    }

    fn parse_main_contract(doc: &IniDocument) -> Result<Vec<MainContract>, ParseError> {
        let Some(raw) = doc.get(POLICY_SECTION, "main_contract") else {
            return Ok(vec![MainContract::Uvxy]);
        };
        let invalid = || ParseError::InvalidValue {
            section: POLICY_SECTION.to_string(),
            key: "main_contract".to_string(),
            value: raw.to_string(),
            expected: "contract symbol list",
        };

        let symbols = super::section_reader::split_list(raw);
        if symbols.is_empty() {
            return Err(invalid());
        }
        symbols
            .iter()
            .map(|s| MainContract::from_str(s).map_err(|_| invalid()))
            .collect()
    }
}
