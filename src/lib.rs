//! # Rusty-id3
//!
//! `rusty-id3` builds ID3 decision trees from categorical tabular data and uses them to
//! classify unseen records. It also contains utilities for reading and discretizing CSV data,
//! writing predictions and evaluating a model with a confusion matrix.
//!
//! ## Getting Started
//!
//! To use `rusty-id3`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-id3 = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can grow a tree on a tiny dataset and classify a record
//! whose value was never seen during training:
//!
//! ```rust
//! use rusty_id3::data::record::Record;
//! use rusty_id3::trees::id3::Id3Classifier;
//! use std::collections::BTreeSet;
//!
//! let mut data = vec![Record::from_iter([("A", "x"), ("C", "yes")]); 3];
//! data.push(Record::from_iter([("A", "y"), ("C", "no")]));
//!
//! let attrs = BTreeSet::from(["A".to_string()]);
//!
//! let mut model = Id3Classifier::new("C");
//! model.fit(&data, &attrs).unwrap();
//!
//! let unseen = Record::from_iter([("A", "z")]);
//! assert_eq!(model.decide(&unseen).unwrap(), "yes");
//! ```

/// Records, datasets and tabular I/O
pub mod data;
/// Functions for evaluating model performance
pub mod metrics;
/// ID3 decision trees
pub mod trees;
