use csv::Writer;
use std::error::Error;
use std::io::Write;
use std::path::Path;

/// Predicted classes keyed by a record identifier, ready to be written as CSV.
#[derive(Clone, Debug, PartialEq)]
pub struct Predictions {
    id_attr: String,
    class_attr: String,
    rows: Vec<(String, String)>,
}

impl Predictions {
    pub fn new(id_attr: impl Into<String>, class_attr: impl Into<String>) -> Self {
        Self {
            id_attr: id_attr.into(),
            class_attr: class_attr.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, id: impl Into<String>, class: impl Into<String>) {
        self.rows.push((id.into(), class.into()));
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes a header row followed by one `id,class` row per prediction.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Box<dyn Error>> {
        let mut writer = Writer::from_writer(writer);
        self.write_rows(&mut writer)
    }

    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let mut writer = Writer::from_path(path)?;
        self.write_rows(&mut writer)
    }

    fn write_rows<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Box<dyn Error>> {
        writer.write_record([&self.id_attr, &self.class_attr])?;
        for (id, class) in &self.rows {
            writer.write_record([id, class])?;
        }
        writer.flush()?;
        Ok(())
    }
}
