//! Structured INI document that survives a parse/serialize cycle.
//!
//! Entries that were never modified are written back using their original
//! text, so comments, unknown keys and formatting are kept across rewrites.

use crate::domain::errors::ParseError;

/// Section whose entries act as fallbacks for every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

#[derive(Debug, Clone, PartialEq)]
struct IniEntry {
    key: String,
    value: String,
    /// Source lines; `None` once the value has been replaced.
    raw: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
enum IniItem {
    /// Blank line or comment, kept verbatim.
    Verbatim(String),
    Entry(IniEntry),
}

#[derive(Debug, Clone, PartialEq)]
struct IniSection {
    name: String,
    header: String,
    items: Vec<IniItem>,
}

impl IniSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            header: format!("[{}]", name),
            items: Vec::new(),
        }
    }

    fn entry(&self, key: &str) -> Option<&IniEntry> {
        self.items.iter().find_map(|item| match item {
            IniItem::Entry(entry) if entry.key == key => Some(entry),
            _ => None,
        })
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut IniEntry> {
        self.items.iter_mut().find_map(|item| match item {
            IniItem::Entry(entry) if entry.key == key => Some(entry),
            _ => None,
        })
    }

    fn last_entry_mut(&mut self) -> Option<&mut IniEntry> {
        match self.items.last_mut() {
            Some(IniItem::Entry(entry)) => Some(entry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    preamble: Vec<String>,
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut doc = IniDocument::default();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                match doc.sections.last_mut() {
                    Some(section) => section.items.push(IniItem::Verbatim(line.to_string())),
                    None => doc.preamble.push(line.to_string()),
                }
                continue;
            }

            // Indented line directly after an entry continues its value
            if line.starts_with(char::is_whitespace)
                && let Some(entry) = doc.sections.last_mut().and_then(IniSection::last_entry_mut)
            {
                entry.value.push('\n');
                entry.value.push_str(trimmed);
                if let Some(raw) = entry.raw.as_mut() {
                    raw.push(line.to_string());
                }
                continue;
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                let name = trimmed[1..trimmed.len() - 1].trim();
                if name.is_empty() {
                    return Err(ParseError::Syntax {
                        line: line_no,
                        reason: "empty section name".to_string(),
                    });
                }
                if doc.sections.iter().any(|s| s.name == name) {
                    return Err(ParseError::DuplicateSection {
                        section: name.to_string(),
                        line: line_no,
                    });
                }
                doc.sections.push(IniSection {
                    name: name.to_string(),
                    header: line.to_string(),
                    items: Vec::new(),
                });
                continue;
            }

            let Some(split_at) = trimmed.find(['=', ':']) else {
                return Err(ParseError::Syntax {
                    line: line_no,
                    reason: format!("expected 'key = value', found '{}'", trimmed),
                });
            };
            let key = trimmed[..split_at].trim().to_lowercase();
            let value = trimmed[split_at + 1..].trim().to_string();
            if key.is_empty() {
                return Err(ParseError::Syntax {
                    line: line_no,
                    reason: "entry has an empty key".to_string(),
                });
            }

            let Some(section) = doc.sections.last_mut() else {
                return Err(ParseError::Syntax {
                    line: line_no,
                    reason: format!("entry '{}' appears before any section header", key),
                });
            };
            if section.entry(&key).is_some() {
                return Err(ParseError::DuplicateKey {
                    section: section.name.clone(),
                    key,
                    line: line_no,
                });
            }
            section.items.push(IniItem::Entry(IniEntry {
                key,
                value,
                raw: Some(vec![line.to_string()]),
            }));
        }

        Ok(doc)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Look up `key` in `section`, falling back to `[DEFAULT]`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.section(section)
            .and_then(|s| s.entry(&key))
            .or_else(|| self.section(DEFAULT_SECTION).and_then(|s| s.entry(&key)))
            .map(|entry| entry.value.as_str())
    }

    /// Replace or add a single value. Missing sections are appended.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let key = key.to_lowercase();
        let value = value.into();

        let idx = match self.sections.iter().position(|s| s.name == section) {
            Some(idx) => idx,
            None => {
                if let Some(prev) = self.sections.last_mut()
                    && matches!(prev.items.last(), Some(IniItem::Entry(_)))
                {
                    prev.items.push(IniItem::Verbatim(String::new()));
                }
                self.sections.push(IniSection::new(section));
                self.sections.len() - 1
            }
        };
        let target = &mut self.sections[idx];

        if let Some(entry) = target.entry_mut(&key) {
            if entry.value != value {
                entry.value = value;
                entry.raw = None;
            }
            return;
        }

        // New keys go after the last entry so trailing blank lines stay separators
        let insert_at = target
            .items
            .iter()
            .rposition(|item| matches!(item, IniItem::Entry(_)))
            .map_or(0, |pos| pos + 1);
        target.items.insert(
            insert_at,
            IniItem::Entry(IniEntry {
                key,
                value,
                raw: None,
            }),
        );
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        for section in &self.sections {
            out.push_str(&section.header);
            out.push('\n');
            for item in &section.items {
                match item {
                    IniItem::Verbatim(line) => {
                        out.push_str(line);
                        out.push('\n');
                    }
                    IniItem::Entry(IniEntry {
                        raw: Some(lines), ..
                    }) => {
                        for line in lines {
                            out.push_str(line);
                            out.push('\n');
                        }
                    }
                    IniItem::Entry(entry) => {
                        let mut lines = entry.value.split('\n');
                        out.push_str(&format!(
                            "{} = {}\n",
                            entry.key,
                            lines.next().unwrap_or_default()
                        ));
                        for continuation in lines {
                            out.push_str("    ");
                            out.push_str(continuation);
                            out.push('\n');
                        }
                    }
                }
            }
        }
        out
    }

    fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# bot settings
[general]
name = alpha

[IB]
Port = 7497
; paper account
accounts = U1,
    U2
";

    #[test]
    fn test_get_is_case_insensitive_on_keys() {
        let doc = IniDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.get("IB", "port"), Some("7497"));
        assert_eq!(doc.get("IB", "PORT"), Some("7497"));
        assert_eq!(doc.get("ib", "port"), None);
    }

    #[test]
    fn test_continuation_lines_extend_value() {
        let doc = IniDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.get("IB", "accounts"), Some("U1,\nU2"));
    }

    #[test]
    fn test_untouched_document_renders_verbatim() {
        let doc = IniDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.render(), SAMPLE);
    }

    #[test]
    fn test_set_rewrites_only_changed_entry() {
        let mut doc = IniDocument::parse(SAMPLE).unwrap();
        doc.set("general", "name", "beta");
        let rendered = doc.render();
        assert!(rendered.contains("name = beta\n"));
        assert!(rendered.contains("; paper account\n"));
        assert!(rendered.contains("Port = 7497\n"));
        assert!(rendered.starts_with("# bot settings\n"));
    }

    #[test]
    fn test_set_adds_key_before_trailing_blank_line() {
        let mut doc = IniDocument::parse(SAMPLE).unwrap();
        doc.set("general", "owner", "desk");
        let rendered = doc.render();
        assert!(rendered.contains("name = alpha\nowner = desk\n\n[IB]"));
    }

    #[test]
    fn test_set_creates_missing_section() {
        let mut doc = IniDocument::parse(SAMPLE).unwrap();
        doc.set("policy", "max_portfolio", "10");
        let reparsed = IniDocument::parse(&doc.render()).unwrap();
        assert_eq!(reparsed.get("policy", "max_portfolio"), Some("10"));
        assert_eq!(reparsed.get("IB", "accounts"), Some("U1,\nU2"));
    }

    #[test]
    fn test_default_section_supplies_fallbacks() {
        let doc = IniDocument::parse("[DEFAULT]\nhost = 10.0.0.1\n[IB]\nport = 1\n").unwrap();
        assert_eq!(doc.get("IB", "host"), Some("10.0.0.1"));
        assert_eq!(doc.get("missing", "host"), Some("10.0.0.1"));
    }

    #[test]
    fn test_colon_delimiter() {
        let doc = IniDocument::parse("[general]\nname: gamma\n").unwrap();
        assert_eq!(doc.get("general", "name"), Some("gamma"));
    }

    #[test]
    fn test_rejects_entry_without_section() {
        let err = IniDocument::parse("name = alpha\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_rejects_line_without_delimiter() {
        let err = IniDocument::parse("[general]\njust words\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = IniDocument::parse("[a]\n[a]\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateSection { line: 2, .. }));

        let err = IniDocument::parse("[a]\nk = 1\nK = 2\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey { line: 3, .. }));
    }
}
