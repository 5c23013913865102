//! ID3 Decision Tree
use super::entropy::{entropy, majority};
use super::node::{DecisionNode, Tree};
use super::observer::{SilentObserver, TreeObserver};
use super::params::Id3Params;
use crate::data::record::{Record, ABSENT};
use crate::metrics::confusion::ClassificationMetrics;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;

struct SplitData<'a> {
    attr: &'a str,
    information_gain: f64,
    buckets: BTreeMap<&'a str, Vec<&'a Record>>,
}

/// Grows an ID3 tree predicting `class_attr` from the attributes in `attrs`.
///
/// Attributes are scanned in ascending name order and the first one with the highest
/// information gain is split on. A node whose class entropy is below
/// [`Id3Params::min_entropy`] becomes a leaf holding its majority class.
///
/// # Errors
///
/// Returns an error if `data` is empty, if `attrs` contains `class_attr`, or if a record lacks
/// an attribute that has to be inspected.
pub fn induce(
    data: &[Record],
    attrs: &BTreeSet<String>,
    class_attr: &str,
    params: &Id3Params,
    observer: &mut dyn TreeObserver,
) -> Result<Tree, Box<dyn Error>> {
    if data.is_empty() {
        return Err("Cannot grow a tree from an empty dataset.".into());
    }
    if attrs.contains(class_attr) {
        return Err(format!(
            "The class attribute '{}' can't be a split candidate.",
            class_attr
        )
        .into());
    }

    let rows = data.iter().collect::<Vec<_>>();
    build_tree(&rows, attrs, class_attr, params, observer, 0)
}

fn build_tree(
    rows: &[&Record],
    attrs: &BTreeSet<String>,
    class_attr: &str,
    params: &Id3Params,
    observer: &mut dyn TreeObserver,
    depth: usize,
) -> Result<Tree, Box<dyn Error>> {
    let most_likely = majority(rows, class_attr)?;
    let base_entropy = entropy(rows, class_attr)?;

    if base_entropy < params.min_entropy() {
        observer.leaf(depth, &most_likely, rows.len());
        return Ok(Tree::Leaf(most_likely));
    }

    let best_split = match get_best_split(rows, attrs, class_attr, base_entropy)? {
        Some(split) => split,
        None => {
            observer.exhausted(depth, &most_likely, rows.len());
            return Ok(Tree::Leaf(most_likely));
        }
    };
    observer.split(depth, best_split.attr, best_split.information_gain);

    let remaining = attrs
        .iter()
        .filter(|attr| attr.as_str() != best_split.attr)
        .cloned()
        .collect::<BTreeSet<_>>();

    let mut node = DecisionNode::new(best_split.attr, most_likely);
    for (value, bucket) in &best_split.buckets {
        observer.branch(depth, best_split.attr, value, bucket.len());
        let child = build_tree(bucket, &remaining, class_attr, params, observer, depth + 1)?;
        node.add_child(*value, child);
    }

    Ok(Tree::Node(node))
}

fn get_best_split<'a>(
    rows: &[&'a Record],
    attrs: &'a BTreeSet<String>,
    class_attr: &str,
    base_entropy: f64,
) -> Result<Option<SplitData<'a>>, Box<dyn Error>> {
    let mut best_split: Option<SplitData<'a>> = None;

    for attr in attrs {
        let Some(split) = split_on_attribute(rows, attr, class_attr, base_entropy)? else {
            continue;
        };
        let is_better = best_split
            .as_ref()
            .map_or(true, |best| split.information_gain > best.information_gain);
        if is_better {
            best_split = Some(split);
        }
    }

    Ok(best_split)
}

/// Buckets the rows with a present `attr` value and scores the partition. Returns `None` when
/// no row has a value for `attr`.
///
/// The gain is measured against the entropy of all rows while the buckets are weighted by
/// the number of rows with a value, so sparse attributes are favoured.
fn split_on_attribute<'a>(
    rows: &[&'a Record],
    attr: &'a str,
    class_attr: &str,
    base_entropy: f64,
) -> Result<Option<SplitData<'a>>, Box<dyn Error>> {
    let mut buckets: BTreeMap<&'a str, Vec<&'a Record>> = BTreeMap::new();
    for &record in rows {
        let value = record.get(attr)?;
        if value != ABSENT {
            buckets.entry(value).or_default().push(record);
        }
    }

    let num_present = buckets.values().map(Vec::len).sum::<usize>();
    if num_present == 0 {
        return Ok(None);
    }

    let mut weighted_entropy = 0.0;
    for bucket in buckets.values() {
        weighted_entropy +=
            bucket.len() as f64 / num_present as f64 * entropy(bucket, class_attr)?;
    }

    Ok(Some(SplitData {
        attr,
        information_gain: base_entropy - weighted_entropy,
        buckets,
    }))
}

/// ID3 Decision Tree Classifier
#[derive(Clone, Debug)]
pub struct Id3Classifier {
    root: Option<Tree>,
    class_attr: String,
    params: Id3Params,
}

impl ClassificationMetrics for Id3Classifier {}

impl Id3Classifier {
    /// Creates an unfitted classifier predicting `class_attr` with default parameters.
    pub fn new(class_attr: impl Into<String>) -> Self {
        Self {
            root: None,
            class_attr: class_attr.into(),
            params: Id3Params::new(),
        }
    }

    /// Creates an unfitted classifier with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `class_attr` - The attribute to predict.
    /// * `min_entropy` - Class entropy below which a node stops splitting.
    ///
    /// # Errors
    ///
    /// This method will return an error if the minimum entropy is negative or not finite.
    pub fn with_params(
        class_attr: impl Into<String>,
        min_entropy: Option<f64>,
    ) -> Result<Self, Box<dyn Error>> {
        let mut classifier = Self::new(class_attr);
        if let Some(min_entropy) = min_entropy {
            classifier.set_min_entropy(min_entropy)?;
        }
        Ok(classifier)
    }

    pub fn set_min_entropy(&mut self, min_entropy: f64) -> Result<(), Box<dyn Error>> {
        self.params.set_min_entropy(min_entropy)
    }

    pub fn min_entropy(&self) -> f64 {
        self.params.min_entropy()
    }

    pub fn params(&self) -> &Id3Params {
        &self.params
    }

    pub fn class_attr(&self) -> &str {
        &self.class_attr
    }

    /// The fitted tree, if any.
    pub fn tree(&self) -> Option<&Tree> {
        self.root.as_ref()
    }

    /// Builds the tree from `data`, splitting only on `attrs`.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree couldn't be built; see [`induce`].
    pub fn fit(
        &mut self,
        data: &[Record],
        attrs: &BTreeSet<String>,
    ) -> Result<String, Box<dyn Error>> {
        self.fit_with_observer(data, attrs, &mut SilentObserver)
    }

    /// Like [`Id3Classifier::fit`], reporting progress to `observer`.
    pub fn fit_with_observer(
        &mut self,
        data: &[Record],
        attrs: &BTreeSet<String>,
        observer: &mut dyn TreeObserver,
    ) -> Result<String, Box<dyn Error>> {
        let tree = induce(data, attrs, &self.class_attr, &self.params, observer)?;
        let message = if tree.is_leaf() {
            "Finished building the tree (a single leaf).".to_string()
        } else {
            format!(
                "Finished building the tree (depth {}, {} leaves).",
                tree.depth(),
                tree.leaf_count()
            )
        };
        self.root = Some(tree);
        Ok(message)
    }

    /// Predicts the class of a single record.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet or the record lacks an
    /// attribute the tree splits on.
    pub fn decide(&self, record: &Record) -> Result<&str, Box<dyn Error>> {
        self.root
            .as_ref()
            .ok_or("Tree wasn't built yet.")?
            .decide(record)
    }

    /// Predicts the classes of `records`, in order.
    pub fn predict(&self, records: &[Record]) -> Result<Vec<String>, Box<dyn Error>> {
        let tree = self.root.as_ref().ok_or("Tree wasn't built yet.")?;

        let predictions = records
            .par_iter()
            .map(|record| {
                tree.decide(record)
                    .map(str::to_string)
                    .map_err(|err| err.to_string())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(predictions)
    }
}
