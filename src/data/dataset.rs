use crate::data::record::Record;
use csv::ReaderBuilder;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{self, Debug, Formatter};
use std::io::Read;
use std::path::Path;

/// Tabular categorical data: a header row and the records read under it.
#[derive(Clone)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset {{\n    headers: [")?;
        for header in &self.headers {
            write!(f, "{}, ", header)?;
        }
        write!(f, "],\n    records: [\n")?;

        for record in &self.records {
            write!(f, "        [")?;
            for header in &self.headers {
                write!(f, "{:?}, ", record.value(header).unwrap_or_default())?;
            }
            writeln!(f, "],")?;
        }

        write!(f, "    ]\n}}")
    }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    /// Reads a CSV file whose first row names the attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be opened or a row doesn't match the header.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        Self::from_csv(reader)
    }

    /// Reads CSV data with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Box<dyn Error>> {
        let reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, Box<dyn Error>> {
        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            records.push(headers.iter().cloned().zip(row.iter()).collect::<Record>());
        }

        Ok(Self::new(headers, records))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Attributes usable for splitting: every header except the class attribute and `ignored`.
    pub fn candidate_attributes(&self, class_attr: &str, ignored: &[&str]) -> BTreeSet<String> {
        self.headers
            .iter()
            .filter(|header| header.as_str() != class_attr && !ignored.contains(&header.as_str()))
            .cloned()
            .collect()
    }

    /// Shuffles the records and splits them into `train_size` (a fraction) for training and
    /// the rest for testing.
    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), Box<dyn Error>> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err("Train size should be between 0.0 and 1.0".into());
        }
        let num_training = (self.len() as f64 * train_size).floor() as usize;
        self.shuffle_split(num_training, seed)
    }

    /// Shuffles the records and puts exactly `num_training` of them into the training part.
    pub fn shuffle_split(
        &self,
        num_training: usize,
        seed: Option<u64>,
    ) -> Result<(Self, Self), Box<dyn Error>> {
        if num_training > self.len() {
            return Err(format!(
                "Cannot take {} training records from a dataset of {}.",
                num_training,
                self.len()
            )
            .into());
        }
        let mut rng = seeded_rng(seed);

        let mut indices = (0..self.len()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);

        let select = |indices: &[usize]| {
            indices
                .iter()
                .map(|&index| self.records[index].clone())
                .collect::<Vec<_>>()
        };

        let train = Self::new(self.headers.clone(), select(&indices[..num_training]));
        let test = Self::new(self.headers.clone(), select(&indices[num_training..]));

        Ok((train, test))
    }
}
