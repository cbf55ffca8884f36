//! Styles.xml generator for XLSX files.
//!
//! Only the single default style is produced: one font, the two fills Excel
//! requires, one empty border and one cell format referencing them.

use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;

/// Builder for generating styles.xml content.
#[derive(Debug, Clone, Default)]
pub struct StylesBuilder;

impl StylesBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Generate styles.xml content.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = writeln!(xml, r#"<styleSheet xmlns="{}">"#, namespace::SML_MAIN);

        xml.push_str(concat!(
            "  <fonts count=\"1\">\n",
            "    <font>\n",
            "      <sz val=\"11\"/>\n",
            "      <color theme=\"1\"/>\n",
            "      <name val=\"Calibri\"/>\n",
            "      <family val=\"2\"/>\n",
            "    </font>\n",
            "  </fonts>\n",
            "  <fills count=\"2\">\n",
            "    <fill>\n",
            "      <patternFill patternType=\"none\"/>\n",
            "    </fill>\n",
            "    <fill>\n",
            "      <patternFill patternType=\"gray125\"/>\n",
            "    </fill>\n",
            "  </fills>\n",
            "  <borders count=\"1\">\n",
            "    <border>\n",
            "      <left/>\n",
            "      <right/>\n",
            "      <top/>\n",
            "      <bottom/>\n",
            "      <diagonal/>\n",
            "    </border>\n",
            "  </borders>\n",
            "  <cellStyleXfs count=\"1\">\n",
            "    <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/>\n",
            "  </cellStyleXfs>\n",
            "  <cellXfs count=\"1\">\n",
            "    <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>\n",
            "  </cellXfs>\n",
            "  <cellStyles count=\"1\">\n",
            "    <cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/>\n",
            "  </cellStyles>\n",
        ));

        xml.push_str("</styleSheet>\n");
        xml
    }
}
