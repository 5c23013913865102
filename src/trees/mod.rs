/// Shannon entropy and class counting
pub mod entropy;
/// ID3 induction and the classifier built on it
pub mod id3;
/// Decision tree nodes and prediction
pub mod node;
/// Progress reporting during induction
pub mod observer;
/// Tree hyperparameters
pub mod params;
