use super::section_reader::SectionReader;
use crate::domain::errors::ParseError;
use crate::infrastructure::IniDocument;
use serde::Serialize;

pub const GENERAL_SECTION: &str = "general";

/// `[general]` section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralConfig {
    pub name: String,
}

impl GeneralConfig {
    pub fn from_document(doc: &IniDocument) -> Result<Self, ParseError> {
        let section = SectionReader::required(doc, GENERAL_SECTION)?;
        Ok(Self {
            name: section.required_string("name")?,
        })
    }
}
