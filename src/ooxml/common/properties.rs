//! Document properties for OOXML packages.
//!
//! This module provides the two metadata parts stored under `docProps/`:
//! the core properties (`core.xml`) and the extended application
//! properties (`app.xml`).

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use std::fmt::Write as FmtWrite;

/// Document core properties (metadata).
///
/// These properties are stored in the `docProps/core.xml` file in the OPC package.
/// Timestamps are always serialized in UTC at second precision.
#[derive(Debug, Clone, Default)]
pub struct DocumentProperties {
    /// Document creator/author
    pub creator: Option<String>,
    /// Last modified by
    pub last_modified_by: Option<String>,
    /// Creation date
    pub created: Option<DateTime<Utc>>,
    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl DocumentProperties {
    /// Create a new empty document properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document creator/author.
    pub fn creator(mut self, creator: &str) -> Self {
        self.creator = Some(creator.to_string());
        self
    }

    /// Set who last modified the document.
    pub fn last_modified_by(mut self, name: &str) -> Self {
        self.last_modified_by = Some(name.to_string());
        self
    }

    /// Stamp both the creation and modification dates.
    ///
    /// Sub-second precision is dropped.
    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        let at = at.with_nanosecond(0).unwrap_or(at);
        self.created = Some(at);
        self.modified = Some(at);
        self
    }

    /// Generate core.xml content for this properties set.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(768);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
        xml.push('\n');

        if let Some(ref creator) = self.creator {
            let _ = writeln!(xml, "  <dc:creator>{}</dc:creator>", escape_xml(creator));
        }

        if let Some(ref last_modified_by) = self.last_modified_by {
            let _ = writeln!(
                xml,
                "  <cp:lastModifiedBy>{}</cp:lastModifiedBy>",
                escape_xml(last_modified_by)
            );
        }

        if let Some(ref created) = self.created {
            let _ = writeln!(
                xml,
                r#"  <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
                w3cdtf(created)
            );
        }

        if let Some(ref modified) = self.modified {
            let _ = writeln!(
                xml,
                r#"  <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
                w3cdtf(modified)
            );
        }

        xml.push_str("</cp:coreProperties>\n");
        xml
    }
}

/// W3CDTF timestamp, e.g. `2024-05-01T12:30:00Z`.
fn w3cdtf(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Extended (application) properties stored in `docProps/app.xml`.
#[derive(Debug, Clone, Default)]
pub struct AppProperties {
    /// Name of the producing application
    pub application: Option<String>,
}

impl AppProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the producing application name.
    pub fn application(mut self, name: &str) -> Self {
        self.application = Some(name.to_string());
        self
    }

    /// Generate app.xml content.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(384);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = writeln!(
            xml,
            r#"<Properties xmlns="{}" xmlns:vt="{}">"#,
            namespace::OFC_EXTENDED_PROPERTIES,
            namespace::OFC_DOC_PROPS_VTYPES
        );
        if let Some(ref application) = self.application {
            let _ = writeln!(
                xml,
                "  <Application>{}</Application>",
                escape_xml(application)
            );
        }
        xml.push_str("</Properties>\n");
        xml
    }
}
