//! `pom.xml` parsing and serialization

use std::fs;
use std::path::Path;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use tracing::{debug, info};

use super::element::{Element, Node};
use crate::config::{ConfigError, ConfigResult};

/// The `<?xml ...?>` line as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// Markup ahead of the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrologItem {
    Comment(String),
    DocType(String),
    ProcessingInstruction(String),
}

/// An in-memory `pom.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomDocument {
    declaration: Option<Declaration>,
    prolog: Vec<PrologItem>,
    root: Element,
}

impl PomDocument {
    /// Wrap an element as a document root
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self {
            declaration: Some(Declaration::default()),
            prolog: Vec::new(),
            root,
        }
    }

    /// Parse a document from a string
    ///
    /// Whitespace-only text is layout and is dropped; any other text is kept
    /// exactly, including leading and trailing spaces.
    ///
    /// # Errors
    /// Returns an error for malformed XML or a missing root element
    pub fn parse(xml: &str) -> ConfigResult<Self> {
        let mut reader = Reader::from_str(xml);

        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Decl(decl) => declaration = Some(read_declaration(&decl)?),
                Event::Start(start) => stack.push(start_element(&start)?),
                Event::Empty(start) => {
                    let element = start_element(&start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let mut element = stack.pop().ok_or_else(|| xml_error("unbalanced end tag"))?;
                    element.drop_blank_text();
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&text.unescape()?, false);
                    }
                }
                Event::CData(cdata) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&String::from_utf8_lossy(&cdata), true);
                    }
                }
                Event::Comment(comment) => {
                    let comment = String::from_utf8_lossy(&comment).into_owned();
                    match stack.last_mut() {
                        Some(current) => current.push_comment(comment),
                        None if root.is_none() => prolog.push(PrologItem::Comment(comment)),
                        None => {}
                    }
                }
                Event::DocType(doctype) if root.is_none() => {
                    let doctype = String::from_utf8_lossy(&doctype).trim().to_string();
                    prolog.push(PrologItem::DocType(doctype));
                }
                Event::PI(pi) if root.is_none() && stack.is_empty() => {
                    let pi = String::from_utf8_lossy(&pi).into_owned();
                    prolog.push(PrologItem::ProcessingInstruction(pi));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(xml_error("unexpected end of document"));
        }
        let root = root.ok_or_else(|| xml_error("document has no root element"))?;

        Ok(Self {
            declaration,
            prolog,
            root,
        })
    }

    /// Read and parse a document from disk
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> ConfigResult<Self> {
        debug!(path = %path.display(), "loading pom");
        let content = fs::read_to_string(path).map_err(|e| ConfigError::from(e).at(path))?;
        Self::parse(&content).map_err(|e| e.at(path))
    }

    /// Serialize with four-space indentation
    ///
    /// # Errors
    /// Returns an error if the writer fails
    pub fn to_xml_string(&self) -> ConfigResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

        if let Some(decl) = &self.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }
        for item in &self.prolog {
            let event = match item {
                PrologItem::Comment(comment) => {
                    Event::Comment(BytesText::from_escaped(comment.as_str()))
                }
                PrologItem::DocType(doctype) => {
                    Event::DocType(BytesText::from_escaped(doctype.as_str()))
                }
                PrologItem::ProcessingInstruction(pi) => Event::PI(BytesPI::new(pi.as_str())),
            };
            writer.write_event(event)?;
        }
        write_element(&mut writer, &self.root)?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| ConfigError::Internal(format!("non UTF-8 output: {e}")))?;
        xml.push('\n');
        Ok(xml)
    }

    /// Serialize and write to disk
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let xml = self.to_xml_string()?;
        fs::write(path, xml).map_err(|e| ConfigError::from(e).at(path))?;
        info!(path = %path.display(), "wrote pom");
        Ok(())
    }

    /// The `<project>` element
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The `<project>` element, mutably
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }
}

fn read_declaration(decl: &BytesDecl<'_>) -> ConfigResult<Declaration> {
    let text = |bytes: &[u8]| String::from_utf8_lossy(bytes).into_owned();
    let version = decl.version().map_err(|e| xml_error(&e.to_string()))?;
    let encoding = decl
        .encoding()
        .transpose()
        .map_err(|e| xml_error(&e.to_string()))?;
    let standalone = decl
        .standalone()
        .transpose()
        .map_err(|e| xml_error(&e.to_string()))?;
    Ok(Declaration {
        version: text(&version),
        encoding: encoding.as_deref().map(text),
        standalone: standalone.as_deref().map(text),
    })
}

fn start_element(start: &BytesStart<'_>) -> ConfigResult<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.set_attribute(key, value);
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => {
            parent.append_child(element);
        }
        None => *root = Some(element),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> ConfigResult<()> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = element.text() {
        if element.is_cdata() {
            writer.write_event(Event::CData(BytesCData::new(text)))?;
        } else {
            writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        }
    }
    for node in element.nodes() {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}

fn xml_error(message: &str) -> ConfigError {
    ConfigError::XmlError {
        path: std::path::PathBuf::new(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated -->
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.example</groupId>
    <!-- keep me -->
    <build>
        <plugins/>
    </build>
    <extraOptions>
        <extraOption>
            <type><![CDATA[java.util.List<String>]]></type>
            <name>names</name>
        </extraOption>
    </extraOptions>
    <excludeMethods>a &amp; b</excludeMethods>
</project>
"#;

    #[test]
    fn test_parse_keeps_structure() {
        let doc = PomDocument::parse(POM).unwrap();
        let root = doc.root();

        assert_eq!(root.name(), "project");
        assert_eq!(root.attribute("xmlns"), Some("http://maven.apache.org/POM/4.0.0"));
        assert_eq!(root.child_text("groupId"), Some("org.example"));
        assert_eq!(root.child_text("excludeMethods"), Some("a & b"));
        assert!(root.nodes().iter().any(|n| matches!(n, Node::Comment(c) if c == " keep me ")));
    }

    #[test]
    fn test_cdata_survives_round_trip() {
        let doc = PomDocument::parse(POM).unwrap();
        let xml = doc.to_xml_string().unwrap();

        assert!(xml.contains("<![CDATA[java.util.List<String>]]>"));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<!-- generated -->"));

        let reparsed = PomDocument::parse(&xml).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_prolog_and_padded_text_survive_round_trip() {
        let xml = "<?xml version=\"1.0\"?>\n<!DOCTYPE project>\n<?pi data?>\n\
                   <project><excludeMethods> foo bar </excludeMethods>\n    <plugins>\n    </plugins></project>";
        let doc = PomDocument::parse(xml).unwrap();
        assert_eq!(doc.root().child_text("excludeMethods"), Some(" foo bar "));
        assert_eq!(doc.root().child("plugins").unwrap().text(), None);

        let out = doc.to_xml_string().unwrap();
        let prolog = "<?xml version=\"1.0\"?>\n<!DOCTYPE project>\n<?pi data?>\n<project>";
        assert!(out.starts_with(prolog), "{out}");
        assert!(out.contains("<excludeMethods> foo bar </excludeMethods>"));
        assert!(out.contains("<plugins/>"));
        assert_eq!(PomDocument::parse(&out).unwrap(), doc);
    }

    #[test]
    fn test_declaration_attributes_are_kept() {
        let doc = PomDocument::parse(
            "<?xml version=\"1.1\" encoding=\"ISO-8859-1\" standalone=\"yes\"?><project/>",
        )
        .unwrap();
        let out = doc.to_xml_string().unwrap();
        assert!(out.starts_with(
            "<?xml version=\"1.1\" encoding=\"ISO-8859-1\" standalone=\"yes\"?>"
        ));

        let bare = PomDocument::parse("<project/>").unwrap();
        assert!(bare.to_xml_string().unwrap().starts_with("<project"));
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let mut doc = PomDocument::new(Element::new("project"));
        doc.root_mut()
            .get_or_create_child_with_content("excludeClasses", "(a<b)|(c)");
        let xml = doc.to_xml_string().unwrap();

        assert!(xml.contains("<excludeClasses>(a&lt;b)|(c)</excludeClasses>"));
    }

    #[test]
    fn test_empty_elements_self_close() {
        let mut doc = PomDocument::new(Element::new("project"));
        doc.root_mut().get_or_create_child("apis");
        let xml = doc.to_xml_string().unwrap();

        assert!(xml.contains("<apis/>"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(PomDocument::parse("<project><build></project>").is_err());
        assert!(PomDocument::parse("").is_err());
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pom.xml");
        fs::write(&path, POM).unwrap();

        let mut doc = PomDocument::load(&path).unwrap();
        doc.root_mut().get_or_create_child_with_content("artifactId", "demo");
        doc.save(&path).unwrap();

        let reloaded = PomDocument::load(&path).unwrap();
        assert_eq!(reloaded.root().child_text("artifactId"), Some("demo"));
    }
}
