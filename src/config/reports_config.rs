use super::section_reader::SectionReader;
use crate::domain::email::filter_valid_emails;
use crate::domain::errors::ParseError;
use crate::infrastructure::IniDocument;
use serde::Serialize;
use tracing::warn;

pub const REPORTS_SECTION: &str = "reports";

/// End-of-day reporting.
///
/// Only well-formed addresses are kept. Without any, `end_day_email` is off
/// whatever the file says.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportsConfig {
    pub end_day_email: bool,
    pub email_address: Vec<String>,
}

impl ReportsConfig {
    pub fn from_document(doc: &IniDocument) -> Result<Self, ParseError> {
        let section = SectionReader::optional(doc, REPORTS_SECTION);

        let mut end_day_email = section.boolean("end_day_email", false)?;
        let email_address = filter_valid_emails(section.list("email_address"));
        if email_address.is_empty() {
            warn!("No eligible client email found. End day email summary will not be sent.");
            end_day_email = false;
        }

        Ok(Self {
            end_day_email,
            email_address,
        })
    }
}
