//! Diagram catalog loading
//!
//! A catalog is a YAML (or TOML) document with a top-level `diagrams`
//! mapping from identifier to `{ name, code }`. Entries keep the order the
//! document declares them in, so "first diagram" means first declared.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// A single diagram definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagramDefinition {
    /// Display name
    pub name: String,
    /// Raw Mermaid markup
    pub code: String,
}

/// Document format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but `.toml` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Diagram entries in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DiagramEntries(Vec<(String, DiagramDefinition)>);

impl<'de> Deserialize<'de> for DiagramEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = DiagramEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of diagram identifiers to definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, DiagramDefinition)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, DiagramDefinition>()? {
                    // A repeated identifier keeps its first position but takes the last value
                    match entries.iter_mut().find(|(existing, _)| *existing == key) {
                        Some(slot) => slot.1 = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(DiagramEntries(entries))
            }

            // `diagrams:` with no value
            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(DiagramEntries::default())
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    diagrams: Option<DiagramEntries>,
}

/// A parsed diagram catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramFile {
    entries: Vec<(String, DiagramDefinition)>,
}

impl DiagramFile {
    /// Load a catalog from disk, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content, ConfigFormat::from_path(path))
    }

    /// Parse a catalog from a string
    pub fn from_str(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Err(ConfigError::NoDiagrams);
        }

        let raw: Option<RawCatalog> = match format {
            ConfigFormat::Yaml => serde_yaml_ng::from_str(content)?,
            ConfigFormat::Toml => Some(toml::from_str(content)?),
        };

        let entries = raw
            .and_then(|catalog| catalog.diagrams)
            .map(|entries| entries.0)
            .unwrap_or_default();
        if entries.is_empty() {
            return Err(ConfigError::NoDiagrams);
        }

        Ok(DiagramFile { entries })
    }

    /// Diagram identifiers in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over `(identifier, definition)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiagramDefinition)> {
        self.entries.iter().map(|(key, def)| (key.as_str(), def))
    }

    /// Select a diagram by identifier, or the first one when `name` is `None`
    pub fn select(&self, name: Option<&str>) -> Result<&DiagramDefinition, ConfigError> {
        match name {
            Some(name) => self
                .entries
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, def)| def)
                .ok_or_else(|| ConfigError::UnknownDiagram {
                    name: name.to_string(),
                    available: self.names().map(str::to_string).collect(),
                }),
            // Construction guarantees at least one entry
            None => self
                .entries
                .first()
                .map(|(_, def)| def)
                .ok_or(ConfigError::NoDiagrams),
        }
    }
}

/// Load a diagram's display name and markup from a catalog file
pub fn load_diagram(
    config_path: &Path,
    diagram_name: Option<&str>,
) -> Result<DiagramDefinition, ConfigError> {
    let file = DiagramFile::from_file(config_path)?;
    let diagram = file.select(diagram_name)?;
    log::debug!(
        "selected diagram '{}' from {}",
        diagram.name,
        config_path.display()
    );
    Ok(diagram.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
diagrams:
  zeta:
    name: "Zeta"
    code: "graph LR; Z-->Y;"
  alpha:
    name: "Alpha"
    code: |
      sequenceDiagram
        A->>B: hi
"#;

    #[test]
    fn test_first_entry_is_first_declared() {
        let file = DiagramFile::from_str(CATALOG, ConfigFormat::Yaml).unwrap();
        let first = file.select(None).unwrap();
        assert_eq!(first.name, "Zeta");
        assert_eq!(first.code, "graph LR; Z-->Y;");
        assert_eq!(file.names().collect::<Vec<_>>(), ["zeta", "alpha"]);
    }

    #[test]
    fn test_select_by_name() {
        let file = DiagramFile::from_str(CATALOG, ConfigFormat::Yaml).unwrap();
        let alpha = file.select(Some("alpha")).unwrap();
        assert_eq!(alpha.name, "Alpha");
        assert!(alpha.code.starts_with("sequenceDiagram\n"));
    }

    #[test]
    fn test_unknown_name() {
        let file = DiagramFile::from_str(CATALOG, ConfigFormat::Yaml).unwrap();
        let err = file.select(Some("missing")).unwrap_err();
        match err {
            ConfigError::UnknownDiagram { name, available } => {
                assert_eq!(name, "missing");
                assert_eq!(available, ["zeta", "alpha"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_identifier_last_value_wins() {
        let yaml = "diagrams:\n  a: {name: A1, code: x}\n  b: {name: B, code: y}\n  a: {name: A2, code: z}\n";
        let file = DiagramFile::from_str(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(file.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(file.select(None).unwrap().name, "A2");
        let a = file.select(Some("a")).unwrap();
        assert_eq!(a.name, "A2");
        assert_eq!(a.code, "z");
    }

    #[test]
    fn test_empty_mapping() {
        let err = DiagramFile::from_str("diagrams: {}\n", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::NoDiagrams));
    }

    #[test]
    fn test_null_mapping() {
        let err = DiagramFile::from_str("diagrams:\n", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::NoDiagrams));
    }

    #[test]
    fn test_missing_diagrams_key() {
        let err = DiagramFile::from_str("other: 1\n", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::NoDiagrams));
    }

    #[test]
    fn test_empty_document() {
        let err = DiagramFile::from_str("  \n", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::NoDiagrams));
    }

    #[test]
    fn test_missing_code_field_is_parse_error() {
        let err = DiagramFile::from_str("diagrams:\n  a:\n    name: A\n", ConfigFormat::Yaml)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_toml_preserves_declaration_order() {
        let toml_str = r#"
[diagrams.second]
name = "Second"
code = "graph TD; S-->T;"

[diagrams.first]
name = "First"
code = "graph TD; F-->G;"
"#;
        let file = DiagramFile::from_str(toml_str, ConfigFormat::Toml).unwrap();
        assert_eq!(file.select(None).unwrap().name, "Second");
        assert_eq!(file.names().collect::<Vec<_>>(), ["second", "first"]);
    }

    #[test]
    fn test_invalid_toml_error() {
        let err = DiagramFile::from_str("this is not valid toml {{{{", ConfigFormat::Toml)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.TOML")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Yaml);
    }
}
