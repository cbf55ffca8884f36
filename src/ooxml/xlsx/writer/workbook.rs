//! Workbook package assembly.
//!
//! [`WorkbookWriter`] turns a worksheet and its metadata into a complete OPC
//! package: the workbook descriptor and its relationships, the style table,
//! the worksheet body and the two `docProps` parts, all cross-referenced by
//! relationship IDs that are allocated before any part is rendered.

use super::sheet::MutableWorksheet;
use super::styles::StylesBuilder;
use crate::common::xml::escape_xml;
use crate::ooxml::common::{AppProperties, DocumentProperties};
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PACKAGE_URI;
use crate::ooxml::opc::{BlobPart, OpcPackage, PackURI, PackageWriter, Relationships};
use std::fmt::Write as FmtWrite;
use std::path::Path;
use tracing::{debug, info};

const WORKBOOK_URI: &str = "/xl/workbook.xml";
const STYLES_URI: &str = "/xl/styles.xml";
const CORE_PROPS_URI: &str = "/docProps/core.xml";
const APP_PROPS_URI: &str = "/docProps/app.xml";

/// Builds and writes a single-sheet XLSX package.
#[derive(Debug, Clone)]
pub struct WorkbookWriter {
    worksheet: MutableWorksheet,
    styles: StylesBuilder,
    core_properties: DocumentProperties,
    app_properties: AppProperties,
}

impl WorkbookWriter {
    /// Create a writer for one worksheet with default styles and no metadata.
    pub fn new(worksheet: MutableWorksheet) -> Self {
        Self {
            worksheet,
            styles: StylesBuilder::new(),
            core_properties: DocumentProperties::new(),
            app_properties: AppProperties::new(),
        }
    }

    /// Set the `docProps/core.xml` metadata.
    pub fn with_core_properties(mut self, props: DocumentProperties) -> Self {
        self.core_properties = props;
        self
    }

    /// Set the `docProps/app.xml` metadata.
    pub fn with_app_properties(mut self, props: AppProperties) -> Self {
        self.app_properties = props;
        self
    }

    pub fn worksheet(&self) -> &MutableWorksheet {
        &self.worksheet
    }

    /// Assemble the OPC package.
    ///
    /// Parts are added in archive order: core and app properties, the
    /// workbook (followed by its relationships part), styles, then the
    /// worksheet.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let workbook_uri = pack_uri(WORKBOOK_URI)?;
        let core_uri = pack_uri(CORE_PROPS_URI)?;
        let app_uri = pack_uri(APP_PROPS_URI)?;
        let styles_uri = pack_uri(STYLES_URI)?;
        let sheet_uri = pack_uri(&format!(
            "/xl/worksheets/sheet{}.xml",
            self.worksheet.sheet_id()
        ))?;

        let mut pkg = OpcPackage::new();
        pkg.relate_to(&workbook_uri.relative_ref(PACKAGE_URI), rt::OFFICE_DOCUMENT);
        pkg.relate_to(&core_uri.relative_ref(PACKAGE_URI), rt::CORE_PROPERTIES);
        pkg.relate_to(&app_uri.relative_ref(PACKAGE_URI), rt::EXTENDED_PROPERTIES);

        pkg.add_part(Box::new(BlobPart::xml(
            core_uri,
            ct::OPC_CORE_PROPERTIES,
            self.core_properties.to_xml(),
        )))?;
        pkg.add_part(Box::new(BlobPart::xml(
            app_uri,
            ct::OFC_EXTENDED_PROPERTIES,
            self.app_properties.to_xml(),
        )))?;

        // The workbook markup names the sheet by rId, so its relationships
        // are allocated before the part is rendered.
        let workbook_base = workbook_uri.base_uri().to_string();
        let mut workbook_rels = Relationships::new(workbook_base.clone());
        let sheet_r_id = workbook_rels
            .get_or_add(rt::WORKSHEET, &sheet_uri.relative_ref(&workbook_base))
            .r_id()
            .to_string();
        workbook_rels.get_or_add(rt::STYLES, &styles_uri.relative_ref(&workbook_base));

        let workbook_xml = self.workbook_xml(&sheet_r_id);
        pkg.add_part(Box::new(
            BlobPart::xml(workbook_uri, ct::SML_SHEET_MAIN, workbook_xml).with_rels(workbook_rels),
        ))?;
        pkg.add_part(Box::new(BlobPart::xml(
            styles_uri,
            ct::SML_STYLES,
            self.styles.to_xml(),
        )))?;
        pkg.add_part(Box::new(BlobPart::xml(
            sheet_uri,
            ct::SML_WORKSHEET,
            self.worksheet.to_xml(),
        )))?;

        debug!(
            parts = pkg.part_count(),
            rows = self.worksheet.row_count(),
            cells = self.worksheet.cell_count(),
            "assembled workbook package"
        );
        Ok(pkg)
    }

    /// Serialize the package to archive bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(&self.to_package()?)
    }

    /// Write the package to `path`.
    ///
    /// The file appears under its final name only once it is complete.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let size = PackageWriter::write(path, &self.to_package()?)?;
        info!(path = %path.display(), bytes = size, "wrote workbook");
        Ok(size)
    }

    /// Generate workbook.xml content.
    fn workbook_xml(&self, sheet_r_id: &str) -> String {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = writeln!(
            xml,
            r#"<workbook xmlns="{}" xmlns:r="{}">"#,
            namespace::SML_MAIN,
            namespace::OFC_RELATIONSHIPS
        );
        xml.push_str("  <sheets>\n");
        let _ = writeln!(
            xml,
            r#"    <sheet name="{}" sheetId="{}" r:id="{}"/>"#,
            escape_xml(self.worksheet.name()),
            self.worksheet.sheet_id(),
            sheet_r_id
        );
        xml.push_str("  </sheets>\n");
        xml.push_str("</workbook>\n");
        xml
    }
}

fn pack_uri(uri: &str) -> Result<PackURI> {
    PackURI::new(uri).map_err(OpcError::InvalidPackUri)
}
