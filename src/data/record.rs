use std::collections::HashMap;
use std::error::Error;

/// Value used for a missing attribute.
pub const ABSENT: &str = "";

/// A single row of categorical data, mapping attribute names to values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(attr, value)| (attr.into(), value.into()))
                .collect(),
        }
    }
}

impl Record {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Returns the value of `attr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no such attribute.
    pub fn get(&self, attr: &str) -> Result<&str, Box<dyn Error>> {
        self.values
            .get(attr)
            .map(String::as_str)
            .ok_or_else(|| format!("Record has no attribute '{}'.", attr).into())
    }

    pub fn value(&self, attr: &str) -> Option<&str> {
        self.values.get(attr).map(String::as_str)
    }

    /// Returns `true` if `attr` holds the absent token. Missing keys are not absent values.
    pub fn is_absent(&self, attr: &str) -> bool {
        self.value(attr) == Some(ABSENT)
    }

    pub fn insert(&mut self, attr: impl Into<String>, value: impl Into<String>) {
        self.values.insert(attr.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_iter() {
        let record = Record::from_iter([("Sex", "male"), ("Age", "kid")]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Sex").unwrap(), "male");
        assert_eq!(record.get("Age").unwrap(), "kid");
    }

    #[test]
    fn test_record_get_missing() {
        let record = Record::from_iter([("Sex", "male")]);
        let result = record.get("Cabin");
        assert!(result.is_err());
        assert_eq!(record.value("Cabin"), None);
    }

    #[test]
    fn test_record_absent() {
        let mut record = Record::new();
        record.insert("Cabin", ABSENT);
        record.insert("Sex", "female");

        assert!(record.is_absent("Cabin"));
        assert!(!record.is_absent("Sex"));
        assert!(!record.is_absent("Age"));
    }

    #[test]
    fn test_record_insert_overwrites() {
        let mut record = Record::from_iter([("Fare", "7.25")]);
        record.insert("Fare", "0~12");
        assert_eq!(record.get("Fare").unwrap(), "0~12");
        assert_eq!(record.len(), 1);
    }
}
