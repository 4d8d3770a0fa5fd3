use super::FilterCriterion;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::property::PropertyValue;

/// Matches documents carrying every listed property value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFilter {
    values: Vec<PropertyValue>,
}

impl PropertyFilter {
    /// Build from `(property, value)` pairs
    pub fn new<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| PropertyValue::new(k, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_values(values))
    }

    /// Build from a flat `[property, value, property, value, ...]` list
    pub fn from_flat<S: AsRef<str>>(flat: &[S]) -> Result<Self> {
        if flat.len() % 2 != 0 {
            return Err(Error::InvalidFilter(format!(
                "property list needs name/value pairs, got {} entries",
                flat.len()
            )));
        }
        Self::new(
            flat.chunks_exact(2)
                .map(|pair| (pair[0].as_ref(), pair[1].as_ref())),
        )
    }

    pub fn from_values(values: impl IntoIterator<Item = PropertyValue>) -> Self {
        let mut unique: Vec<PropertyValue> = Vec::new();
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self { values: unique }
    }

    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }
}

impl FilterCriterion for PropertyFilter {
    fn matches(&self, document: &Document) -> bool {
        self.values
            .iter()
            .all(|pv| document.has_property(pv.name(), pv.value()))
    }

    fn accuracy(&self, document: &Document) -> u32 {
        let extra = document
            .properties()
            .num_elements()
            .saturating_sub(self.values.len());
        u32::try_from(extra).unwrap_or(u32::MAX)
    }

    fn describe(&self) -> String {
        let pairs: Vec<String> = self.values.iter().map(|pv| pv.to_string()).collect();
        format!("properties [{}]", pairs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: &[(&str, &str)]) -> Document {
        pairs.iter().fold(Document::new("n", "n").unwrap(), |d, (k, v)| {
            d.with_property(PropertyValue::new(*k, *v).unwrap())
        })
    }

    #[test]
    fn test_requires_all_pairs() {
        let filter = PropertyFilter::new([("author", "jane"), ("year", "2021")]).unwrap();
        assert!(filter.matches(&doc(&[("author", "jane"), ("year", "2021")])));
        assert!(!filter.matches(&doc(&[("author", "jane")])));
        assert!(!filter.matches(&doc(&[("author", "john"), ("year", "2021")])));
    }

    #[test]
    fn test_accuracy_counts_extra_values() {
        let filter = PropertyFilter::new([("author", "jane")]).unwrap();
        let d = doc(&[("author", "jane"), ("author", "john"), ("year", "2021")]);
        assert!(filter.matches(&d));
        assert_eq!(filter.accuracy(&d), 2);
    }

    #[test]
    fn test_from_flat() {
        let filter = PropertyFilter::from_flat(&["author", "jane", "year", "2021"]).unwrap();
        assert_eq!(filter.values().len(), 2);
        assert_eq!(filter.describe(), "properties [author=jane, year=2021]");

        assert!(matches!(
            PropertyFilter::from_flat(&["author", "jane", "year"]),
            Err(Error::InvalidFilter(_))
        ));
        assert!(PropertyFilter::from_flat::<&str>(&[]).unwrap().values().is_empty());
    }
}
