//! Package writer for OPC packages.
//!
//! This module serializes an [`OpcPackage`] into a ZIP archive: the
//! `[Content_Types].xml` manifest, the package relationships, and every part
//! followed by its own relationships part.

use crate::common::fs::atomic_write_bytes;
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::fmt::Write as FmtWrite;
use std::path::Path;
use tracing::debug;

/// Package writer that serializes an OPC package to a ZIP file.
///
/// The package is validated first, so a package with dangling relationships
/// never reaches the archive.
pub struct PackageWriter;

impl PackageWriter {
    /// Write an OPC package to a file.
    ///
    /// The archive is written to a temporary file beside `path` and renamed into
    /// place, so a reader never observes a partially written package.
    pub fn write<P: AsRef<Path>>(path: P, package: &OpcPackage) -> Result<usize> {
        let bytes = Self::to_bytes(package)?;
        atomic_write_bytes(path.as_ref(), &bytes)?;
        Ok(bytes.len())
    }

    /// Serialize an OPC package to bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        package.validate()?;

        let mut phys_writer = PhysPkgWriter::new();

        Self::write_content_types(&mut phys_writer, package)?;
        Self::write_pkg_rels(&mut phys_writer, package)?;
        Self::write_parts(&mut phys_writer, package)?;

        phys_writer.finish()
    }

    /// Write the [Content_Types].xml part.
    fn write_content_types(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let cti = ContentTypesItem::from_package(package)?;
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        phys_writer.write(&content_types_uri, cti.to_xml().as_bytes())
    }

    /// Write package-level relationships.
    fn write_pkg_rels(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let rels_uri = PackURI::new(PACKAGE_URI)
            .and_then(|uri| uri.rels_uri())
            .map_err(OpcError::InvalidPackUri)?;
        phys_writer.write(&rels_uri, package.rels().to_xml().as_bytes())
    }

    /// Write all parts and their relationships.
    fn write_parts(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        for part in package.iter_parts() {
            debug!(part = %part.partname(), bytes = part.blob().len(), "writing part");
            phys_writer.write(part.partname(), part.blob())?;

            if !part.rels().is_empty() {
                let rels_uri = part
                    .partname()
                    .rels_uri()
                    .map_err(OpcError::InvalidPackUri)?;
                phys_writer.write(&rels_uri, part.rels().to_xml().as_bytes())?;
            }
        }

        Ok(())
    }
}

/// Helper for building [Content_Types].xml content.
///
/// Manages Default and Override elements for content type mapping, both kept
/// in the order they were first seen.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: Vec<(String, String)>,

    /// Override content types by partname
    overrides: Vec<(String, String)>,
}

impl ContentTypesItem {
    fn new() -> Self {
        Self {
            defaults: vec![
                ("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string()),
                ("xml".to_string(), ct::XML.to_string()),
            ],
            overrides: Vec::new(),
        }
    }

    /// Build ContentTypesItem from an OPC package.
    fn from_package(package: &OpcPackage) -> Result<Self> {
        let mut cti = Self::new();

        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type())?;
        }

        Ok(cti)
    }

    /// Add a content type for a part.
    ///
    /// Uses a default mapping if the extension matches a well-known type,
    /// otherwise uses an override for the specific partname.
    fn add_content_type(&mut self, partname: &PackURI, content_type: &str) -> Result<()> {
        if content_type.is_empty() {
            return Err(OpcError::ContentTypeNotFound(partname.to_string()));
        }

        let ext = partname.ext();
        if OpcPackage::is_default_content_type(ext, content_type) {
            if !self.defaults.iter().any(|(e, _)| e == ext) {
                self.defaults
                    .push((ext.to_string(), content_type.to_string()));
            }
        } else {
            self.overrides
                .push((partname.to_string(), content_type.to_string()));
        }

        Ok(())
    }

    /// Generate the XML for [Content_Types].xml.
    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = writeln!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES);

        for (ext, content_type) in &self.defaults {
            let _ = writeln!(
                xml,
                r#"  <Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            );
        }

        for (partname, content_type) in &self.overrides {
            let _ = writeln!(
                xml,
                r#"  <Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            );
        }

        xml.push_str("</Types>\n");

        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use crate::ooxml::opc::part::{BlobPart, Part};
    use crate::ooxml::opc::phys_pkg::PhysPkgReader;

    fn xml_part(uri: &str, content_type: &str) -> Box<dyn Part> {
        Box::new(BlobPart::xml(
            PackURI::new(uri).unwrap(),
            content_type,
            "<x/>".to_string(),
        ))
    }

    #[test]
    fn test_content_types_xml() {
        let mut cti = ContentTypesItem::new();
        cti.add_content_type(
            &PackURI::new("/xl/workbook.xml").unwrap(),
            ct::SML_SHEET_MAIN,
        )
        .unwrap();
        cti.add_content_type(&PackURI::new("/custom/data.xml").unwrap(), ct::XML)
            .unwrap();

        let xml = cti.to_xml();

        assert!(xml.contains(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#));
        assert!(xml.contains(r#"<Default Extension="xml" ContentType="application/xml"/>"#));
        assert!(xml.contains(r#"<Override PartName="/xl/workbook.xml""#));
        // Generic XML is covered by the default, not an override
        assert!(!xml.contains("/custom/data.xml"));
    }

    #[test]
    fn test_to_bytes_layout() {
        let mut pkg = OpcPackage::new();
        pkg.add_part(xml_part("/xl/workbook.xml", ct::SML_SHEET_MAIN))
            .unwrap();
        pkg.add_part(xml_part("/xl/styles.xml", ct::SML_STYLES))
            .unwrap();
        pkg.relate_to("xl/workbook.xml", rt::OFFICE_DOCUMENT);
        let workbook_uri = PackURI::new("/xl/workbook.xml").unwrap();
        pkg.get_part_mut(&workbook_uri)
            .unwrap()
            .relate_to("styles.xml", rt::STYLES);

        let bytes = PackageWriter::to_bytes(&pkg).unwrap();
        let mut reader = PhysPkgReader::new(&bytes).unwrap();
        assert_eq!(
            reader.member_names().unwrap(),
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/workbook.xml",
                "xl/_rels/workbook.xml.rels",
                "xl/styles.xml",
            ]
        );
    }

    #[test]
    fn test_invalid_package_is_not_serialized() {
        let mut pkg = OpcPackage::new();
        pkg.relate_to("xl/workbook.xml", rt::OFFICE_DOCUMENT);
        assert!(matches!(
            PackageWriter::to_bytes(&pkg),
            Err(OpcError::DanglingRelationship { .. })
        ));
    }

    #[test]
    fn test_write_leaves_no_file_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("broken.xlsx");

        let mut pkg = OpcPackage::new();
        pkg.relate_to("xl/workbook.xml", rt::OFFICE_DOCUMENT);
        assert!(PackageWriter::write(&dest, &pkg).is_err());
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
