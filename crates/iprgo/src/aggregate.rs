//! GO Aggregation
//!
//! Folds filtered rows into one set of GO identifiers per protein. A protein
//! hit by several signatures gets the union of their GO terms, each once.

use crate::annotation::AnnotationRow;
use std::collections::{BTreeMap, BTreeSet};

/// Protein accession -> distinct GO identifiers, both kept sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoAssociationTable {
    associations: BTreeMap<String, BTreeSet<String>>,
}

impl GoAssociationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from already filtered rows
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a AnnotationRow>,
    {
        let mut table = Self::new();
        for row in rows {
            table.insert_row(row);
        }
        table
    }

    /// Add every GO identifier of `row` to its protein's set
    ///
    /// A row whose GO column yields no identifiers adds nothing, not even an
    /// empty entry for the protein.
    pub fn insert_row(&mut self, row: &AnnotationRow) {
        for term in row.go_term_list() {
            self.insert(&row.protein_accession, term);
        }
    }

    pub fn insert(&mut self, protein_accession: &str, go_term: &str) -> bool {
        match self.associations.get_mut(protein_accession) {
            Some(terms) => terms.insert(go_term.to_string()),
            None => {
                self.associations.insert(
                    protein_accession.to_string(),
                    BTreeSet::from([go_term.to_string()]),
                );
                true
            },
        }
    }

    pub fn terms_for(&self, protein_accession: &str) -> Option<&BTreeSet<String>> {
        self.associations.get(protein_accession)
    }

    /// Number of proteins
    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }

    /// Number of distinct (protein, GO term) pairs
    pub fn term_count(&self) -> usize {
        self.associations.values().map(BTreeSet::len).sum()
    }

    /// Proteins in lexicographic order, each with its sorted GO terms
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.associations.iter().map(|(acc, terms)| (acc.as_str(), terms))
    }
}

impl<'a> Extend<&'a AnnotationRow> for GoAssociationTable {
    fn extend<I: IntoIterator<Item = &'a AnnotationRow>>(&mut self, rows: I) {
        for row in rows {
            self.insert_row(row);
        }
    }
}
