use rusty_id3::data::dataset::Dataset;
use rusty_id3::data::discretize::Discretizer;
use rusty_id3::data::predictions::Predictions;
use rusty_id3::metrics::evaluation::{evaluate, EvaluationParams};
use rusty_id3::trees::id3::Id3Classifier;
use rusty_id3::trees::observer::PrintObserver;
use std::env;
use std::error::Error;
use std::process;

const CLASS_ATTR: &str = "Survived";
const ID_ATTR: &str = "PassengerId";
const IGNORED_ATTRS: [&str; 3] = ["PassengerId", "Name", "Ticket"];

fn load(path: &str, discretizer: &Discretizer) -> Result<Dataset, Box<dyn Error>> {
    let mut dataset =
        Dataset::from_path(path).map_err(|err| format!("Couldn't read {}: {}", path, err))?;
    discretizer.apply_all(&mut dataset)?;
    println!("Loaded {} records from {}", dataset.len(), path);
    Ok(dataset)
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let train_path = args.next().unwrap_or_else(|| "train.csv".to_string());
    let test_path = args.next().unwrap_or_else(|| "test.csv".to_string());
    let output_path = args.next().unwrap_or_else(|| "result.csv".to_string());

    let discretizer = Discretizer::titanic()?;
    let training_set = load(&train_path, &discretizer)?;
    let testing_set = load(&test_path, &discretizer)?;

    let attrs = training_set.candidate_attributes(CLASS_ATTR, &IGNORED_ATTRS);
    let mut classifier = Id3Classifier::new(CLASS_ATTR);

    // Hold out as many records as the real test set has, relative to the training set.
    let mut params = EvaluationParams::new();
    params.set_ratio(training_set.len() as f64 / testing_set.len() as f64)?;
    let matrix = evaluate(&training_set, &attrs, &classifier, &params)?;
    println!("{}", matrix);
    println!("Accuracy: {:.2}%", matrix.accuracy()? * 100.0);

    println!(
        "{}",
        classifier.fit_with_observer(training_set.records(), &attrs, &mut PrintObserver)?
    );

    let survived = classifier.predict(testing_set.records())?;
    let mut predictions = Predictions::new(ID_ATTR, CLASS_ATTR);
    for (record, class) in testing_set.records().iter().zip(survived) {
        predictions.push(record.get(ID_ATTR)?, class);
    }
    predictions.to_path(&output_path)?;
    println!("Wrote {} predictions to {}", predictions.len(), output_path);

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
