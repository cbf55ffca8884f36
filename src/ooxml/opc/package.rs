/// The in-memory OPC package that is assembled before serialization.
///
/// This module provides the OpcPackage type, which holds the parts of a package
/// together with the package-level relationships, and enforces the cross-reference
/// rules a conforming reader relies on.
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;

/// Main API class for building OPC packages.
///
/// Parts are kept in insertion order, which is also the order in which they are
/// written to the archive.
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, in insertion order
    parts: Vec<Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: Vec::new(),
        }
    }

    /// Get a reference to the main document part.
    ///
    /// For Excel this is the workbook.xml part.
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let rel = self
            .rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?;
        let partname = rel.target_partname()?;
        self.get_part(&partname)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .iter()
            .find(|part| part.partname() == partname)
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a mutable reference to a part by its partname.
    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .iter_mut()
            .find(|part| part.partname() == partname)
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Add a new part to the package.
    ///
    /// Partnames are unique within a package; adding a second part with the same
    /// name is an error.
    pub fn add_part(&mut self, part: Box<dyn Part>) -> Result<()> {
        if self.contains_part(part.partname()) {
            return Err(OpcError::DuplicatePart(part.partname().to_string()));
        }
        self.parts.push(part);
        Ok(())
    }

    /// Get an iterator over all parts in the package, in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.iter().map(|b| &**b as &dyn Part)
    }

    /// Get the number of parts in the package.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Get a reference to the package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Relate the package to a part.
    ///
    /// Creates or reuses a relationship from the package to the specified part.
    ///
    /// # Arguments
    /// * `target_ref` - The target part's membername (relative to the package root)
    /// * `reltype` - The relationship type URI
    ///
    /// # Returns
    /// The relationship ID (rId)
    pub fn relate_to(&mut self, target_ref: &str, reltype: &str) -> String {
        let rel = self.rels.get_or_add(reltype, target_ref);
        rel.r_id().to_string()
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.iter().any(|part| part.partname() == partname)
    }

    /// Check the package's cross-references.
    ///
    /// Every internal relationship, at package level and on every part, must
    /// resolve to a part that is present, and every part must carry a content
    /// type. A package that fails either check is unreadable by conforming
    /// readers.
    pub fn validate(&self) -> Result<()> {
        let package_source: (&str, &Relationships) = (PACKAGE_URI, &self.rels);
        let sources = std::iter::once(package_source).chain(
            self.parts
                .iter()
                .map(|part| (part.partname().as_str(), part.rels())),
        );

        for (source_uri, rels) in sources {
            for rel in rels.iter().filter(|rel| !rel.is_external()) {
                let target = rel.target_partname()?;
                if !self.contains_part(&target) {
                    return Err(OpcError::DanglingRelationship {
                        source_uri: source_uri.to_string(),
                        r_id: rel.r_id().to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }

        for part in &self.parts {
            if part.content_type().is_empty() {
                return Err(OpcError::ContentTypeNotFound(part.partname().to_string()));
            }
        }

        Ok(())
    }

    /// Whether `content_type` is covered by a `<Default>` entry for `ext`.
    pub(crate) fn is_default_content_type(ext: &str, content_type: &str) -> bool {
        matches!(
            (ext, content_type),
            ("rels", ct::OPC_RELATIONSHIPS) | ("xml", ct::XML)
        )
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
