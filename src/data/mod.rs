/// Reading tabular data and splitting it for evaluation
pub mod dataset;
/// Binning raw values into categorical tokens
pub mod discretize;
/// Writing predictions back to CSV
pub mod predictions;
/// A single categorical row
pub mod record;
