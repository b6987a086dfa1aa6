pub mod config_persistence;
pub mod ini_document;

pub use config_persistence::ConfigPersistence;
pub use ini_document::IniDocument;
