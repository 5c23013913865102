//! Shannon entropy of categorical attributes.
use crate::data::record::Record;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::error::Error;

/// Counts how often each value of `attr` occurs, ordered by value.
pub fn value_counts<'a, R: Borrow<Record>>(
    records: &'a [R],
    attr: &str,
) -> Result<BTreeMap<&'a str, usize>, Box<dyn Error>> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.borrow().get(attr)?).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Computes the base-2 Shannon entropy of the values of `attr` across `records`.
///
/// The result is `0.0` when every record shares one value and `log2(k)` when `k` values
/// occur equally often.
///
/// # Errors
///
/// Returns an error if `records` is empty or a record doesn't carry `attr`.
pub fn entropy<R: Borrow<Record>>(records: &[R], attr: &str) -> Result<f64, Box<dyn Error>> {
    if records.is_empty() {
        return Err("Cannot compute entropy of an empty collection.".into());
    }
    let n = records.len() as f64;

    let h = value_counts(records, attr)?
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            -p * p.log2()
        })
        .sum::<f64>();

    Ok(h)
}

/// Returns the most frequent value of `attr`. Ties go to the smallest value.
pub fn majority<R: Borrow<Record>>(records: &[R], attr: &str) -> Result<String, Box<dyn Error>> {
    let mut max_count = 0;
    let mut max_value = None;

    for (value, count) in value_counts(records, attr)? {
        if count > max_count {
            max_count = count;
            max_value = Some(value);
        }
    }

    max_value
        .map(str::to_string)
        .ok_or_else(|| "Cannot find the majority of an empty collection.".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn records(values: &[&str]) -> Vec<Record> {
        values
            .iter()
            .map(|value| Record::from_iter([("C", *value)]))
            .collect()
    }

    #[test]
    fn test_entropy_uniform_value() {
        let data = records(&["yes", "yes", "yes"]);
        assert_eq!(entropy(&data, "C").unwrap(), 0.0);
    }

    #[test]
    fn test_entropy_equal_frequencies() {
        let two = records(&["a", "b", "a", "b"]);
        assert_relative_eq!(entropy(&two, "C").unwrap(), 1.0, epsilon = 1e-12);

        let four = records(&["a", "b", "c", "d", "d", "c", "b", "a"]);
        assert_relative_eq!(entropy(&four, "C").unwrap(), 2.0, epsilon = 1e-12);

        let three = records(&["a", "b", "c"]);
        assert_relative_eq!(entropy(&three, "C").unwrap(), 3f64.log2(), epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_skewed() {
        let data = records(&["yes", "yes", "yes", "no"]);
        let expected = -(0.75 * 0.75f64.log2() + 0.25 * 0.25f64.log2());
        let h = entropy(&data, "C").unwrap();
        assert_relative_eq!(h, expected, epsilon = 1e-12);
        assert_relative_eq!(h, 0.8112781244591328, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_counts_absent_as_value() {
        let data = records(&["", "x"]);
        assert_relative_eq!(entropy(&data, "C").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_of_borrowed_records() {
        let data = records(&["yes", "no"]);
        let refs = data.iter().collect::<Vec<_>>();
        assert_relative_eq!(entropy(&refs, "C").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_empty() {
        let data: Vec<Record> = vec![];
        assert!(entropy(&data, "C").is_err());
    }

    #[test]
    fn test_entropy_missing_attribute() {
        let data = records(&["yes"]);
        assert!(entropy(&data, "Missing").is_err());
    }

    #[test]
    fn test_value_counts() {
        let data = records(&["b", "a", "b"]);
        let counts = value_counts(&data, "C").unwrap();
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_majority() {
        let data = records(&["no", "yes", "yes"]);
        assert_eq!(majority(&data, "C").unwrap(), "yes");
    }

    #[test]
    fn test_majority_tie_goes_to_smallest() {
        let data = records(&["yes", "no", "yes", "no"]);
        assert_eq!(majority(&data, "C").unwrap(), "no");
    }

    #[test]
    fn test_majority_empty() {
        let data: Vec<Record> = vec![];
        assert!(majority(&data, "C").is_err());
    }
}
