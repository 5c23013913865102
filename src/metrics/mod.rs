/// Confusion matrices and classification scores
pub mod confusion;
/// Hold-out evaluation over repeated random splits
pub mod evaluation;
