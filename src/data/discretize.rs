//! Turning raw attribute values into discrete tokens before training.
use crate::data::dataset::Dataset;
use crate::data::record::Record;
use std::error::Error;

/// How a single attribute is bucketed.
#[derive(Clone, Debug, PartialEq)]
pub enum Binning {
    /// Numeric bands. A value equal to one of the `exact` points gets that point's label.
    /// Otherwise it goes into the first band whose upper bound is greater than or equal to
    /// it, and values above every bound get `overflow`.
    Bands {
        exact: Vec<(f64, String)>,
        bounds: Vec<(f64, String)>,
        overflow: String,
    },
    /// Keeps the first `n` characters of the value.
    Prefix(usize),
}

impl Binning {
    pub fn bands<S: Into<String>>(
        bounds: impl IntoIterator<Item = (f64, S)>,
        overflow: impl Into<String>,
    ) -> Result<Self, Box<dyn Error>> {
        let bounds = bounds
            .into_iter()
            .map(|(bound, label)| (bound, label.into()))
            .collect::<Vec<_>>();
        if bounds.iter().any(|(bound, _)| bound.is_nan()) {
            return Err("Band bounds must not be NaN.".into());
        }
        if bounds.windows(2).any(|pair| pair[0].0 >= pair[1].0) {
            return Err("Band bounds must be strictly increasing.".into());
        }
        Ok(Self::Bands {
            exact: Vec::new(),
            bounds,
            overflow: overflow.into(),
        })
    }

    /// Gives `value` its own label, ahead of the bands. Has no effect on `Prefix`.
    pub fn with_exact(mut self, value: f64, label: impl Into<String>) -> Self {
        if let Self::Bands { exact, .. } = &mut self {
            exact.push((value, label.into()));
        }
        self
    }

    /// Maps a present value to its token.
    pub fn apply(&self, value: &str) -> Result<String, Box<dyn Error>> {
        match self {
            Self::Bands {
                exact,
                bounds,
                overflow,
            } => {
                let number = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|err| format!("Couldn't parse '{}' as a number: {}", value, err))?;
                let label = exact
                    .iter()
                    .find(|(point, _)| number == *point)
                    .or_else(|| bounds.iter().find(|(bound, _)| number <= *bound))
                    .map(|(_, label)| label)
                    .unwrap_or(overflow);
                Ok(label.clone())
            }
            Self::Prefix(n) => Ok(value.chars().take(*n).collect()),
        }
    }
}

/// A set of per-attribute binning rules.
#[derive(Clone, Debug, Default)]
pub struct Discretizer {
    rules: Vec<(String, Binning)>,
}

impl Discretizer {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, attr: impl Into<String>, binning: Binning) -> Self {
        self.rules.push((attr.into(), binning));
        self
    }

    /// Rules for the Titanic passenger list: cabin deck letter, fare and age bands, and
    /// sibling/spouse and parent/child counts.
    pub fn titanic() -> Result<Self, Box<dyn Error>> {
        let fare = Binning::bands(
            [
                (12.0, "0~12"),
                (18.0, "12~18"),
                (32.0, "18~32"),
                (100.0, "32~100"),
                (200.0, "100~200"),
                (500.0, "200~500"),
            ],
            "500~",
        )?
        .with_exact(0.0, "free");
        let age = Binning::bands(
            [
                (1.0, "infant"),
                (3.0, "toddler"),
                (12.0, "kid"),
                (18.0, "teenager"),
                (30.0, "young-adult"),
                (45.0, "mid-age"),
                (60.0, "old"),
            ],
            "very-old",
        )?;
        let sibsp = Binning::bands([(0.0, "none"), (1.0, "one")], "more")?;
        let parch = Binning::bands([(0.0, "none"), (1.0, "one"), (2.0, "two")], "more")?;

        Ok(Self::new()
            .with_rule("Cabin", Binning::Prefix(1))
            .with_rule("Fare", fare)
            .with_rule("Age", age)
            .with_rule("SibSp", sibsp)
            .with_rule("Parch", parch))
    }

    /// Rewrites every ruled attribute of `record` in place. Absent values and attributes the
    /// record doesn't carry are left alone.
    pub fn apply(&self, record: &mut Record) -> Result<(), Box<dyn Error>> {
        for (attr, binning) in &self.rules {
            if record.is_absent(attr) {
                continue;
            }
            let token = match record.value(attr) {
                Some(value) => binning
                    .apply(value)
                    .map_err(|err| format!("Attribute '{}': {}", attr, err))?,
                _ => continue,
            };
            record.insert(attr.as_str(), token);
        }
        Ok(())
    }

    pub fn apply_all(&self, dataset: &mut Dataset) -> Result<(), Box<dyn Error>> {
        dataset
            .records_mut()
            .iter_mut()
            .try_for_each(|record| self.apply(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sibsp() -> Binning {
        Binning::bands([(0.0, "none"), (1.0, "one")], "more").unwrap()
    }

    #[test]
    fn test_bands_are_upper_inclusive() {
        let binning = Binning::bands([(12.0, "0~12"), (18.0, "12~18")], "18~").unwrap();
        assert_eq!(binning.apply("12").unwrap(), "0~12");
        assert_eq!(binning.apply("12.01").unwrap(), "12~18");
        assert_eq!(binning.apply("18").unwrap(), "12~18");
        assert_eq!(binning.apply("512.33").unwrap(), "18~");
    }

    #[test]
    fn test_bands_integer_counts() {
        let binning = sibsp();
        assert_eq!(binning.apply("0").unwrap(), "none");
        assert_eq!(binning.apply("1").unwrap(), "one");
        assert_eq!(binning.apply("4").unwrap(), "more");
    }

    #[test]
    fn test_bands_not_a_number() {
        assert!(sibsp().apply("several").is_err());
    }

    #[test]
    fn test_bands_must_increase() {
        assert!(Binning::bands([(2.0, "a"), (1.0, "b")], "c").is_err());
        assert!(Binning::bands([(1.0, "a"), (1.0, "b")], "c").is_err());
        assert!(Binning::bands([(f64::NAN, "a")], "c").is_err());
    }

    #[test]
    fn test_prefix() {
        let binning = Binning::Prefix(1);
        assert_eq!(binning.apply("C85").unwrap(), "C");
        assert_eq!(binning.apply("B57 B59 B63 B66").unwrap(), "B");
    }

    #[test]
    fn test_exact_point_before_bands() {
        let binning = Binning::bands([(12.0, "0~12")], "12~")
            .unwrap()
            .with_exact(0.0, "free");
        assert_eq!(binning.apply("0").unwrap(), "free");
        assert_eq!(binning.apply("0.0").unwrap(), "free");
        assert_eq!(binning.apply("-3.5").unwrap(), "0~12");
        assert_eq!(binning.apply("0.5").unwrap(), "0~12");
        assert_eq!(Binning::Prefix(1).with_exact(0.0, "free"), Binning::Prefix(1));
    }

    fn titanic_token(attr: &str, value: &str) -> String {
        let mut record = Record::from_iter([(attr, value)]);
        Discretizer::titanic().unwrap().apply(&mut record).unwrap();
        record.get(attr).unwrap().to_string()
    }

    #[test]
    fn test_titanic_fare() {
        assert_eq!(titanic_token("Fare", "0"), "free");
        assert_eq!(titanic_token("Fare", "-3.5"), "0~12");
        assert_eq!(titanic_token("Fare", "7.25"), "0~12");
        assert_eq!(titanic_token("Fare", "12"), "0~12");
        assert_eq!(titanic_token("Fare", "12.01"), "12~18");
        assert_eq!(titanic_token("Fare", "18"), "12~18");
        assert_eq!(titanic_token("Fare", "32"), "18~32");
        assert_eq!(titanic_token("Fare", "100"), "32~100");
        assert_eq!(titanic_token("Fare", "200"), "100~200");
        assert_eq!(titanic_token("Fare", "500"), "200~500");
        assert_eq!(titanic_token("Fare", "500.01"), "500~");
    }

    #[test]
    fn test_titanic_age() {
        assert_eq!(titanic_token("Age", "0.42"), "infant");
        assert_eq!(titanic_token("Age", "1"), "infant");
        assert_eq!(titanic_token("Age", "1.5"), "toddler");
        assert_eq!(titanic_token("Age", "3"), "toddler");
        assert_eq!(titanic_token("Age", "12"), "kid");
        assert_eq!(titanic_token("Age", "18"), "teenager");
        assert_eq!(titanic_token("Age", "30"), "young-adult");
        assert_eq!(titanic_token("Age", "45"), "mid-age");
        assert_eq!(titanic_token("Age", "60"), "old");
        assert_eq!(titanic_token("Age", "60.5"), "very-old");
    }

    #[test]
    fn test_titanic_family_counts() {
        assert_eq!(titanic_token("SibSp", "0"), "none");
        assert_eq!(titanic_token("SibSp", "1"), "one");
        assert_eq!(titanic_token("SibSp", "2"), "more");
        assert_eq!(titanic_token("Parch", "0"), "none");
        assert_eq!(titanic_token("Parch", "1"), "one");
        assert_eq!(titanic_token("Parch", "2"), "two");
        assert_eq!(titanic_token("Parch", "3"), "more");
    }

    #[test]
    fn test_titanic_cabin_and_untouched() {
        assert_eq!(titanic_token("Cabin", "B57 B59"), "B");
        assert_eq!(titanic_token("Cabin", ""), "");
        assert_eq!(titanic_token("Age", ""), "");
        assert_eq!(titanic_token("Sex", "male"), "male");
    }

    #[test]
    fn test_discretizer_skips_absent_values() {
        let discretizer = Discretizer::new()
            .with_rule("SibSp", sibsp())
            .with_rule("Cabin", Binning::Prefix(1));

        let mut record = Record::from_iter([("SibSp", ""), ("Cabin", "E46")]);
        discretizer.apply(&mut record).unwrap();

        assert!(record.is_absent("SibSp"));
        assert_eq!(record.get("Cabin").unwrap(), "E");
    }

    #[test]
    fn test_discretizer_skips_missing_attributes() {
        let discretizer = Discretizer::new().with_rule("SibSp", sibsp());
        let mut record = Record::from_iter([("Sex", "male")]);
        discretizer.apply(&mut record).unwrap();
        assert_eq!(record, Record::from_iter([("Sex", "male")]));
    }

    #[test]
    fn test_discretizer_apply_all() {
        let headers = vec!["SibSp".to_string()];
        let records = vec![
            Record::from_iter([("SibSp", "0")]),
            Record::from_iter([("SibSp", "3")]),
        ];
        let mut dataset = Dataset::new(headers, records);

        Discretizer::new()
            .with_rule("SibSp", sibsp())
            .apply_all(&mut dataset)
            .unwrap();

        assert_eq!(dataset.records()[0].get("SibSp").unwrap(), "none");
        assert_eq!(dataset.records()[1].get("SibSp").unwrap(), "more");
    }

    #[test]
    fn test_discretizer_reports_attribute() {
        let discretizer = Discretizer::new().with_rule("Fare", sibsp());
        let mut record = Record::from_iter([("Fare", "abc")]);
        let err = discretizer.apply(&mut record).unwrap_err();
        assert!(err.to_string().contains("Fare"));
    }
}
