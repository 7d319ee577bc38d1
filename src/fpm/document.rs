//! Minimal INI-style document for the FPM config file.
//!
//! Sections keep insertion order, keys keep insertion order within their
//! section. Rendering produces the `key = value` form php-fpm reads.

use std::fmt;
use std::path::Path;

/// Errors raised while building a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("section {0:?} already exists")]
    DuplicateSection(String),

    #[error("section name must not be empty")]
    EmptySectionName,

    #[error("key name must not be empty in section {0:?}")]
    EmptyKey(String),

    #[error("value for {section}.{key} contains a line break")]
    MultilineValue { section: String, key: String },
}

/// One `[name]` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), DocumentError> {
        if key.is_empty() {
            return Err(DocumentError::EmptyKey(self.name.clone()));
        }
        let value = value.into();
        if value.contains(['\n', '\r']) {
            return Err(DocumentError::MultilineValue {
                section: self.name.clone(),
                key: key.to_string(),
            });
        }

        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An ordered collection of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FpmConfig {
    sections: Vec<Section>,
}

impl FpmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, empty section.
    pub fn new_section(&mut self, name: &str) -> Result<&mut Section, DocumentError> {
        if name.is_empty() {
            return Err(DocumentError::EmptySectionName);
        }
        if self.section(name).is_some() {
            return Err(DocumentError::DuplicateSection(name.to_string()));
        }

        self.sections.push(Section {
            name: name.to_string(),
            entries: Vec::new(),
        });
        let last = self.sections.len() - 1;
        Ok(&mut self.sections[last])
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up `section.key`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Write the rendered document to `path`.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_string())
    }
}

impl fmt::Display for FpmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{} = {}", key, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_section_rejected() {
        let mut doc = FpmConfig::new();
        doc.new_section("global").unwrap();
        assert_eq!(
            doc.new_section("global").unwrap_err(),
            DocumentError::DuplicateSection("global".into())
        );
    }

    #[test]
    fn test_key_validation() {
        let mut doc = FpmConfig::new();
        let s = doc.new_section("www").unwrap();
        assert!(matches!(s.set("", "x"), Err(DocumentError::EmptyKey(_))));
        assert!(matches!(
            s.set("listen", "a\nb"),
            Err(DocumentError::MultilineValue { .. })
        ));
        assert!(s.is_empty());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut doc = FpmConfig::new();
        let s = doc.new_section("www").unwrap();
        s.set("pm", "dynamic").unwrap();
        s.set("listen", "9000").unwrap();
        s.set("pm", "static").unwrap();

        let section = doc.section("www").unwrap();
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["pm", "listen"]);
        assert_eq!(doc.get("www", "pm"), Some("static"));
    }

    #[test]
    fn test_render_and_save() {
        let mut doc = FpmConfig::new();
        doc.new_section("global").unwrap().set("pid", "/tmp/a.pid").unwrap();
        doc.new_section("www").unwrap().set("pm", "static").unwrap();

        let rendered = doc.to_string();
        assert_eq!(rendered, "[global]\npid = /tmp/a.pid\n\n[www]\npm = static\n");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fpm.conf");
        doc.save_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);
    }
}
