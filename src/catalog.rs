//! Delimited-text object catalogs.
//!
//! A catalog file is one object per line, comma-separated, each field a
//! designation for that object ("Sirius,alpha CMa,HR 2491"). No header row
//! and no fixed column count. The ephemeris side of the crate only consumes
//! [`Catalog::name`], which resolves an index to the primary designation and
//! yields `None` past the end instead of failing.

use camino::Utf8Path;
use smallvec::SmallVec;

use crate::astrokit_errors::AstrokitError;

/// Designations of a single catalog object, primary first.
pub type Designations = SmallVec<[String; 4]>;

/// One named object from a catalog file.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogObject {
    pub names: Designations,
}

impl CatalogObject {
    /// Primary designation, if the object carries any name at all.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// An in-memory sequence of named objects read from a delimited text file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    objects: Vec<CatalogObject>,
}

impl Catalog {
    /// Import a catalog from a comma-separated file.
    ///
    /// Rows may have any number of fields; blank fields and fully blank rows
    /// are skipped. Returns the populated catalog, whose [`Catalog::len`] is
    /// the number of records imported.
    ///
    /// Arguments
    /// ---------
    /// * `path`: path of the CSV file
    ///
    /// Return
    /// ------
    /// * the imported catalog, or an [`AstrokitError`] if the file cannot be
    ///   opened or parsed
    pub fn read_csv(path: &Utf8Path) -> Result<Catalog, AstrokitError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path.as_std_path())?;

        let mut objects = Vec::new();
        for record in reader.records() {
            let record = record?;
            let names: Designations = record
                .iter()
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(String::from)
                .collect();
            if !names.is_empty() {
                objects.push(CatalogObject { names });
            }
        }

        Ok(Catalog { objects })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&CatalogObject> {
        self.objects.get(index)
    }

    /// Primary designation of the object at `index`.
    ///
    /// Out-of-range indices yield `None`; callers are expected to tolerate
    /// the empty case rather than treat it as fatal.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.objects.get(index).and_then(CatalogObject::primary_name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogObject> {
        self.objects.iter()
    }
}
