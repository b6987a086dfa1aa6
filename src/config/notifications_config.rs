use super::section_reader::SectionReader;
use crate::domain::errors::ParseError;
use crate::infrastructure::IniDocument;
use serde::Serialize;

/// Notifications live under `[slack]` in the file.
pub const NOTIFICATIONS_SECTION: &str = "slack";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationsConfig {
    /// Prepended to every outgoing message
    pub prefix: String,
    pub conf_messages: bool,
}

impl NotificationsConfig {
    pub fn from_document(doc: &IniDocument) -> Result<Self, ParseError> {
        let section = SectionReader::optional(doc, NOTIFICATIONS_SECTION);
        Ok(Self {
            prefix: section.string("prefix", ""),
            conf_messages: section.boolean("conf_messages", false)?,
        })
    }
}
