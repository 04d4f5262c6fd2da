//! Domain identifier types
//!
//! Hosts identify documents and layers with plain integers. These newtypes keep
//! the two apart so a layer id can never be passed where a document id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use assetport::domain::ids::DocumentId;
/// use std::str::FromStr;
///
/// let id = DocumentId::from_str("1042").unwrap();
/// assert_eq!(id.value(), 1042);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(i64);

impl DocumentId {
    /// Creates a new DocumentId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw host id
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid document id '{s}': {e}"))
    }
}

impl From<i64> for DocumentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Layer identifier newtype wrapper
///
/// Layer ids are only unique within their document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(i64);

impl LayerId {
    /// Creates a new LayerId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw host id
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LayerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid layer id '{s}': {e}"))
    }
}

impl From<i64> for LayerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_parse() {
        assert_eq!(DocumentId::from_str(" 7 ").unwrap(), DocumentId::new(7));
        assert!(DocumentId::from_str("seven").is_err());
    }

    #[test]
    fn test_layer_id_parse() {
        assert_eq!(LayerId::from_str("-3").unwrap().value(), -3);
        assert!(LayerId::from_str("").is_err());
    }

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&DocumentId::new(12)).unwrap();
        assert_eq!(json, "12");
        let layer: LayerId = serde_json::from_str("5").unwrap();
        assert_eq!(layer, LayerId::new(5));
    }

    #[test]
    fn test_display() {
        assert_eq!(DocumentId::new(3).to_string(), "3");
        assert_eq!(LayerId::new(9).to_string(), "9");
    }
}
