//! The GFF3 attribute sub-format: `key1=v1,v2;key2=v3`.
//!
//! Entries are separated by `;`, key and value by the first `=`, and values
//! by `,`. No escaping is defined for `;`, `=` or `,` inside values; a value
//! containing one of those characters cannot be represented.
//!
//! Duplicate keys are a hard parse error rather than last-wins.
//!
//! # Examples
//!
//! ```
//! use ensvalid::formats::primitives::AttributeMap;
//!
//! let attrs = AttributeMap::parse("ID=gene:ENSG00000100320;biotype=protein_coding")?;
//! assert_eq!(attrs.single("ID"), Some("gene:ENSG00000100320"));
//! assert_eq!(attrs.get("biotype"), Some(&vec!["protein_coding".to_string()]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors produced while parsing the attribute column.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttributeError {
    /// An entry without `=`, or with an empty key.
    #[error("Malformed attribute entry '{entry}': expected 'key=value'.")]
    MalformedEntry {
        /// The offending entry text
        entry: String,
    },

    /// The same key appears more than once.
    #[error("Duplicate attribute key '{key}'.")]
    DuplicateKey {
        /// The duplicated key
        key: String,
    },
}

/// A parsed attribute column: attribute key to its ordered values.
///
/// Keys are case-sensitive. Every key maps to at least one value (an entry
/// like `key=` yields one empty-string value, matching a plain split).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl AttributeMap {
    /// Parses a raw attribute column.
    ///
    /// # Errors
    ///
    /// [`AttributeError::MalformedEntry`] when an entry lacks `=` or has an
    /// empty key; [`AttributeError::DuplicateKey`] when a key repeats.
    pub fn parse(raw: &str) -> Result<Self, AttributeError> {
        let mut entries = BTreeMap::new();
        for entry in raw.split(';') {
            let (key, value) = entry.split_once('=').ok_or_else(|| {
                AttributeError::MalformedEntry {
                    entry: entry.to_string(),
                }
            })?;
            if key.is_empty() {
                return Err(AttributeError::MalformedEntry {
                    entry: entry.to_string(),
                });
            }
            let values: Vec<String> = value.split(',').map(str::to_string).collect();
            if entries.insert(key.to_string(), values).is_some() {
                return Err(AttributeError::DuplicateKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(AttributeMap { entries })
    }

    /// Returns the values for a key.
    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.entries.get(key)
    }

    /// Returns the value for a key that carries exactly one value.
    ///
    /// `None` when the key is absent or carries multiple values.
    pub fn single(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(values) if values.len() == 1 => Some(values[0].as_str()),
            _ => None,
        }
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no attribute was parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, values)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Re-serializes the map with `;`/`=`/`,` joiners.
    ///
    /// Key order is the map's own (lexicographic), which may differ from the
    /// input; the result parses back to an equal map.
    pub fn to_attribute_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, values)| format!("{}={}", key, values.join(",")))
            .collect::<Vec<_>>()
            .join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let attrs = AttributeMap::parse("k1=v1,v2;k2=v3").unwrap();
        assert_eq!(
            attrs.get("k1"),
            Some(&vec!["v1".to_string(), "v2".to_string()])
        );
        assert_eq!(attrs.get("k2"), Some(&vec!["v3".to_string()]));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_parse_round_trip() {
        let attrs = AttributeMap::parse("k1=v1,v2;k2=v3").unwrap();
        let reparsed = AttributeMap::parse(&attrs.to_attribute_string()).unwrap();
        assert_eq!(attrs, reparsed);
    }

    #[test]
    fn test_parse_missing_equals() {
        let err = AttributeMap::parse("ID=gene:X;brokenentry").unwrap_err();
        assert!(matches!(err, AttributeError::MalformedEntry { .. }));
    }

    #[test]
    fn test_parse_empty_key() {
        let err = AttributeMap::parse("=value").unwrap_err();
        assert!(matches!(err, AttributeError::MalformedEntry { .. }));
    }

    #[test]
    fn test_parse_duplicate_key_is_error() {
        let err = AttributeMap::parse("ID=a;ID=b").unwrap_err();
        assert_eq!(
            err,
            AttributeError::DuplicateKey {
                key: "ID".to_string()
            }
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let attrs = AttributeMap::parse("id=a;ID=b").unwrap();
        assert_eq!(attrs.single("id"), Some("a"));
        assert_eq!(attrs.single("ID"), Some("b"));
    }

    #[test]
    fn test_value_split_on_first_equals_only() {
        // GFF3 descriptions can contain '=' inside the value
        let attrs = AttributeMap::parse("description=a=b").unwrap();
        assert_eq!(attrs.single("description"), Some("a=b"));
    }

    #[test]
    fn test_single_rejects_multi_value() {
        let attrs = AttributeMap::parse("tag=a,b").unwrap();
        assert_eq!(attrs.single("tag"), None);
        assert_eq!(attrs.get("tag").unwrap().len(), 2);
    }

    #[test]
    fn test_realistic_transcript_attributes() {
        let raw = "ID=transcript:ENST00000623180;Parent=gene:ENSG00000280279;\
                   Name=LINC02887-201;biotype=lncRNA;tag=gencode_basic,Ensembl_canonical;\
                   transcript_id=ENST00000623180;transcript_support_level=5;version=1";
        let attrs = AttributeMap::parse(raw).unwrap();
        assert_eq!(attrs.single("ID"), Some("transcript:ENST00000623180"));
        assert_eq!(attrs.get("tag").unwrap().len(), 2);
        assert_eq!(attrs.single("version"), Some("1"));
    }
}
