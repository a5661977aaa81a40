use crate::core::classifier::Classifier;
use crate::core::models::structure::{Structure, StructureOptions};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading structure file formats.
///
/// Implementors handle format-specific parsing; the classifier and options
/// are applied to every accepted atom as the structure is built.
pub trait StructureFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `name` - The name given to the resulting structure.
    /// * `classifier` - Assigns radii and classes to atoms.
    /// * `options` - Controls which atoms are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(
        reader: &mut impl BufRead,
        name: &str,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Structure, Self::Error>;

    /// Reads every structure the input holds.
    ///
    /// Formats that cannot split their input return the single structure
    /// from [`read_from`](Self::read_from).
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_all_from(
        reader: &mut impl BufRead,
        name: &str,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Vec<Structure>, Self::Error> {
        Ok(vec![Self::read_from(reader, name, classifier, options)?])
    }

    /// Reads a structure from a file path, naming it after the file stem.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Structure, Self::Error> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader, &structure_name(path), classifier, options)
    }

    /// Reads every structure from a file path, naming each after the file stem.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_all_from_path<P: AsRef<Path>>(
        path: P,
        classifier: &dyn Classifier,
        options: &StructureOptions,
    ) -> Result<Vec<Structure>, Self::Error> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_all_from(&mut reader, &structure_name(path), classifier, options)
    }
}

/// Name given to a structure read from `path`: the file stem, or the whole
/// path when it has none.
pub fn structure_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
