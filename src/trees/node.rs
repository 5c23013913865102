use crate::data::record::Record;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// An induced decision tree: either a terminal class value or a node that routes on an
/// attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Tree {
    Leaf(String),
    Node(DecisionNode),
}

/// Internal node splitting on a single attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionNode {
    attr: String,
    fallback: String,
    children: BTreeMap<String, Tree>,
}

impl DecisionNode {
    pub(crate) fn new(attr: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            attr: attr.into(),
            fallback: fallback.into(),
            children: BTreeMap::new(),
        }
    }

    pub(crate) fn add_child(&mut self, value: impl Into<String>, child: Tree) {
        self.children.insert(value.into(), child);
    }

    pub fn attr(&self) -> &str {
        &self.attr
    }

    /// Majority class of the training records that reached this node.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn children(&self) -> &BTreeMap<String, Tree> {
        &self.children
    }

    pub fn child(&self, value: &str) -> Option<&Tree> {
        self.children.get(value)
    }

    /// Routes `record` by its value of this node's attribute. Values with no child,
    /// including the absent token, get the fallback.
    pub fn decide(&self, record: &Record) -> Result<&str, Box<dyn Error>> {
        match self.children.get(record.get(&self.attr)?) {
            Some(child) => child.decide(record),
            None => Ok(self.fallback.as_str()),
        }
    }
}

impl Tree {
    /// Predicts the class of `record`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record lacks an attribute some node on its path splits on.
    pub fn decide(&self, record: &Record) -> Result<&str, Box<dyn Error>> {
        match self {
            Tree::Leaf(class) => Ok(class.as_str()),
            Tree::Node(node) => node.decide(record),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    /// Number of decision nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Tree::Leaf(_) => 0,
            Tree::Node(node) => 1 + node.children.values().map(Tree::depth).max().unwrap_or(0),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Tree::Leaf(_) => 1,
            Tree::Node(node) => node.children.values().map(Tree::leaf_count).sum(),
        }
    }

    fn write_indented(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Tree::Leaf(class) => write!(f, "{}", class),
            Tree::Node(node) => {
                write!(f, "split on {}, fallback {}", node.attr, node.fallback)?;
                for (value, child) in &node.children {
                    write!(
                        f,
                        "\n{:indent$}{} = {} => ",
                        "",
                        node.attr,
                        value,
                        indent = 2 * (depth + 1)
                    )?;
                    child.write_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
