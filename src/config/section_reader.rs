//! Typed extraction of values from one section of the backing document.

use crate::domain::errors::ParseError;
use crate::infrastructure::IniDocument;
use std::str::FromStr;

pub(crate) struct SectionReader<'a> {
    doc: &'a IniDocument,
    section: &'static str,
}

impl<'a> SectionReader<'a> {
    /// Reader for a section that must be present in the file.
    pub fn required(doc: &'a IniDocument, section: &'static str) -> Result<Self, ParseError> {
        if !doc.has_section(section) {
            return Err(ParseError::MissingSection {
                section: section.to_string(),
            });
        }
        Ok(Self { doc, section })
    }

    /// Reader for a section whose keys all have defaults.
    pub fn optional(doc: &'a IniDocument, section: &'static str) -> Self {
        Self { doc, section }
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        self.doc.get(self.section, key)
    }

    fn require(&self, key: &str) -> Result<&'a str, ParseError> {
        self.raw(key).ok_or_else(|| ParseError::MissingKey {
            section: self.section.to_string(),
            key: key.to_string(),
        })
    }

    fn invalid(&self, key: &str, value: &str, expected: &'static str) -> ParseError {
        ParseError::InvalidValue {
            section: self.section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    pub fn string(&self, key: &str, default: &str) -> String {
        self.raw(key).unwrap_or(default).to_string()
    }

    pub fn required_string(&self, key: &str) -> Result<String, ParseError> {
        self.require(key).map(str::to_string)
    }

    pub fn parse<T: FromStr>(&self, key: &str, default: T, expected: &'static str) -> Result<T, ParseError> {
        match self.raw(key) {
            Some(value) => value.parse::<T>().map_err(|_| self.invalid(key, value, expected)),
            None => Ok(default),
        }
    }

    pub fn required_parse<T: FromStr>(&self, key: &str, expected: &'static str) -> Result<T, ParseError> {
        let value = self.require(key)?;
        value.parse::<T>().map_err(|_| self.invalid(key, value, expected))
    }

    pub fn boolean(&self, key: &str, default: bool) -> Result<bool, ParseError> {
        match self.raw(key) {
            Some(value) => parse_bool(value).ok_or_else(|| self.invalid(key, value, "boolean")),
            None => Ok(default),
        }
    }

    pub fn required_boolean(&self, key: &str) -> Result<bool, ParseError> {
        let value = self.require(key)?;
        parse_bool(value).ok_or_else(|| self.invalid(key, value, "boolean"))
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        self.raw(key).map(split_list).unwrap_or_default()
    }

    pub fn required_list(&self, key: &str) -> Result<Vec<String>, ParseError> {
        self.require(key).map(split_list)
    }

    pub fn required_parsed_list<T: FromStr>(&self, key: &str, expected: &'static str) -> Result<Vec<T>, ParseError> {
        let value = self.require(key)?;
        let items = split_list(value);
        if items.is_empty() {
            return Err(self.invalid(key, value, expected));
        }
        items
            .iter()
            .map(|item| item.parse::<T>().map_err(|_| self.invalid(key, item, expected)))
            .collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Comma separated list; elements are trimmed and empty ones dropped.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
