use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    error::Error,
    fmt::{self, Display, Formatter},
};

use nalgebra::DMatrix;

/// Tally of (actual, predicted) class pairs.
///
/// Rows are indexed by the actual class and columns by the predicted class, both following
/// the ascending order of [`ConfusionMatrix::classes`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConfusionMatrix {
    classes: Vec<String>,
    counts: DMatrix<usize>,
}

impl ConfusionMatrix {
    pub fn from_pairs<A, P, I>(pairs: I) -> Self
    where
        A: AsRef<str>,
        P: AsRef<str>,
        I: IntoIterator<Item = (A, P)>,
    {
        let mut tally = BTreeMap::<(String, String), usize>::new();
        for (actual, predicted) in pairs {
            *tally
                .entry((actual.as_ref().to_string(), predicted.as_ref().to_string()))
                .or_insert(0) += 1;
        }

        let classes = tally
            .keys()
            .flat_map(|(actual, predicted)| [actual, predicted])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        let position = classes
            .iter()
            .enumerate()
            .map(|(index, class)| (class.as_str(), index))
            .collect::<HashMap<_, _>>();

        let mut counts = DMatrix::zeros(classes.len(), classes.len());
        for ((actual, predicted), count) in &tally {
            counts[(position[actual.as_str()], position[predicted.as_str()])] += count;
        }

        Self { classes, counts }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn counts(&self) -> &DMatrix<usize> {
        &self.counts
    }

    /// Number of records of class `actual` that were predicted as `predicted`.
    pub fn get(&self, actual: &str, predicted: &str) -> usize {
        let row = self.classes.iter().position(|c| c == actual);
        let col = self.classes.iter().position(|c| c == predicted);
        match (row, col) {
            (Some(row), Some(col)) => self.counts[(row, col)],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.sum()
    }

    pub fn correct(&self) -> usize {
        self.counts.diagonal().iter().sum()
    }

    pub fn accuracy(&self) -> Result<f64, Box<dyn Error>> {
        let total = self.total();
        if total == 0 {
            return Err("Cannot compute accuracy of an empty confusion matrix.".into());
        }
        Ok(self.correct() as f64 / total as f64)
    }

    /// Precision of the second class for two classes, macro-averaged precision otherwise.
    pub fn precision(&self) -> f64 {
        let matrix = &self.counts;
        let num_classes = matrix.nrows();

        if num_classes == 2 {
            let tp = matrix[(1, 1)];
            let fp = matrix[(0, 1)];

            if tp + fp > 0 {
                return tp as f64 / (tp + fp) as f64;
            }
        }

        let mut precision_total = 0.0;
        for class in 0..num_classes {
            let tp = matrix[(class, class)];
            let fp = matrix.column(class).sum() - tp;

            if tp + fp > 0 {
                precision_total += tp as f64 / (tp + fp) as f64;
            }
        }

        precision_total / num_classes.max(1) as f64
    }

    /// Recall of the second class for two classes, macro-averaged recall otherwise.
    pub fn recall(&self) -> f64 {
        let matrix = &self.counts;
        let num_classes = matrix.nrows();

        if num_classes == 2 {
            let tp = matrix[(1, 1)];
            let fn_ = matrix[(1, 0)];

            if tp + fn_ > 0 {
                return tp as f64 / (tp + fn_) as f64;
            }
        }

        let mut recall_total = 0.0;
        for class in 0..num_classes {
            let tp = matrix[(class, class)];
            let fn_ = matrix.row(class).sum() - tp;

            if tp + fn_ > 0 {
                recall_total += tp as f64 / (tp + fn_) as f64;
            }
        }

        recall_total / num_classes.max(1) as f64
    }

    pub fn f1_score(&self) -> Result<f64, Box<dyn Error>> {
        let precision = self.precision();
        let recall = self.recall();

        match (precision + recall).abs() < f64::EPSILON {
            true => Err("Precision and recall are both 0, F1 score undefined.".into()),
            false => Ok(2.0 * (precision * recall) / (precision + recall)),
        }
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let corner = "actual\\predicted";
        let label_width = self
            .classes
            .iter()
            .map(String::len)
            .chain([corner.len()])
            .max()
            .unwrap_or_default();
        let cell_width = self
            .classes
            .iter()
            .map(String::len)
            .chain(self.counts.iter().map(|count| count.to_string().len()))
            .max()
            .unwrap_or_default();

        write!(f, "{:<label_width$}", corner)?;
        for class in &self.classes {
            write!(f, " {:>cell_width$}", class)?;
        }
        for (row, class) in self.classes.iter().enumerate() {
            write!(f, "\n{:<label_width$}", class)?;
            for col in 0..self.classes.len() {
                write!(f, " {:>cell_width$}", self.counts[(row, col)])?;
            }
        }
        Ok(())
    }
}

pub trait ClassificationMetrics {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// # Arguments
    ///
    /// * `y_true` - The true labels.
    /// * `y_pred` - The predicted labels.
    ///
    /// # Returns
    ///
    /// The confusion matrix as a `Result` containing a `ConfusionMatrix` or an error message.
    fn confusion_matrix(
        &self,
        y_true: &[String],
        y_pred: &[String],
    ) -> Result<ConfusionMatrix, Box<dyn Error>> {
        if y_true.len() != y_pred.len() {
            return Err("Predictions and labels are of different sizes.".into());
        }
        Ok(ConfusionMatrix::from_pairs(y_true.iter().zip(y_pred)))
    }

    /// Computes the accuracy based on the true labels and predicted labels.
    fn accuracy(&self, y_true: &[String], y_pred: &[String]) -> Result<f64, Box<dyn Error>> {
        self.confusion_matrix(y_true, y_pred)?.accuracy()
    }

    /// Computes the precision based on the true labels and predicted labels.
    ///
    /// With exactly two classes the second one in ascending order is the positive class;
    /// otherwise the per-class precisions are averaged.
    fn precision(&self, y_true: &[String], y_pred: &[String]) -> Result<f64, Box<dyn Error>> {
        Ok(self.confusion_matrix(y_true, y_pred)?.precision())
    }

    /// Computes the recall based on the true labels and predicted labels.
    fn recall(&self, y_true: &[String], y_pred: &[String]) -> Result<f64, Box<dyn Error>> {
        Ok(self.confusion_matrix(y_true, y_pred)?.recall())
    }

    /// Computes the F1 score based on the true labels and predicted labels.
    ///
    /// # Errors
    ///
    /// Fails when precision and recall are both zero.
    fn f1_score(&self, y_true: &[String], y_pred: &[String]) -> Result<f64, Box<dyn Error>> {
        self.confusion_matrix(y_true, y_pred)?.f1_score()
    }
}
