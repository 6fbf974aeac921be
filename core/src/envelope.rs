//! Docsvault response envelope and the XML tree it is read from.
//!
//! # Design
//! Every endpoint answers with the same shape:
//!
//! ```xml
//! <Docsvault>
//!   <Response><StatusCode>0</StatusCode><Message>...</Message></Response>
//!   <Result>...</Result>
//! </Docsvault>
//! ```
//!
//! The body is read into a small generic `Node` tree rather than typed serde
//! structs, because the `Result` payload changes shape per operation and a
//! record may arrive once or repeated. Repeated elements stay siblings in
//! `children`, so `Node::all` always yields a sequence whether the server sent
//! zero, one or many of them; that is where singleton-vs-list ambiguity is
//! normalized. Attributes are folded into children with the attribute name,
//! so `<FileDetail CheckedOut="true"/>` and
//! `<FileDetail><CheckedOut>true</CheckedOut></FileDetail>` read the same.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Name of the envelope's root element.
pub const ROOT_ELEMENT: &str = "Docsvault";

/// The body was not well-formed XML or not a Docsvault envelope.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct XmlError(pub String);

/// One XML element: its name, trimmed text (`None` when empty), and child
/// elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = non_empty(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every child named `name`, in document order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a chain of child names from this node.
    pub fn path(&self, names: &[&str]) -> Option<&Node> {
        names.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Node::text)
    }
}

/// Parse an XML document into its root `Node`.
pub fn parse_document(xml: &str) -> Result<Node, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlError(format!("at byte {}: {e}", reader.buffer_position())))?;
        match event {
            Event::Start(start) => stack.push(open(&start)?),
            Event::Empty(start) => {
                let node = open(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| XmlError("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| XmlError(e.to_string()))?;
                append_text(&mut stack, &text);
            }
            Event::CData(cdata) => {
                let text = String::from_utf8(cdata.into_inner().into_owned())
                    .map_err(|e| XmlError(e.to_string()))?;
                append_text(&mut stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| XmlError("document has no root element".to_string()))
}

fn open(start: &BytesStart<'_>) -> Result<Node, XmlError> {
    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(|e| XmlError(e.to_string()))?
        .to_string();
    let mut node = Node::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError(e.to_string()))?;
        if attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(|e| XmlError(e.to_string()))?
            .to_string();
        let value = attr.unescape_value().map_err(|e| XmlError(e.to_string()))?;
        node.children.push(Node::new(key).with_text(value.into_owned()));
    }
    Ok(node)
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError(format!("second root element <{}>", node.name)));
    }
    *root = Some(node);
    Ok(())
}

fn append_text(stack: &mut [Node], text: &str) {
    let Some(node) = stack.last_mut() else {
        return;
    };
    match &mut node.text {
        Some(existing) => existing.push_str(text),
        None => node.text = non_empty(text.to_string()),
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// A decoded Docsvault response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// `Response/StatusCode`; `"0"` is success and `"1"` failure.
    pub status_code: Option<String>,
    /// `Response/Message`, present on failures.
    pub message: Option<String>,
    /// The `Result` payload, shape depending on the operation.
    pub result: Option<Node>,
}

impl Envelope {
    pub fn parse(body: &str) -> Result<Self, XmlError> {
        let root = parse_document(body)?;
        if root.name != ROOT_ELEMENT {
            return Err(XmlError(format!(
                "expected <{ROOT_ELEMENT}> root element, found <{}>",
                root.name
            )));
        }

        let response = root.child("Response");
        Ok(Self {
            status_code: response
                .and_then(|r| r.child_text("StatusCode"))
                .map(str::to_string),
            message: response
                .and_then(|r| r.child_text("Message"))
                .map(str::to_string),
            result: root.child("Result").cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_failure_envelope() {
        let env = Envelope::parse(
            "<Docsvault><Response><StatusCode>1</StatusCode><Message>bad creds</Message></Response></Docsvault>",
        )
        .unwrap();
        assert_eq!(env.status_code.as_deref(), Some("1"));
        assert_eq!(env.message.as_deref(), Some("bad creds"));
        assert!(env.result.is_none());
    }

    #[test]
    fn parses_success_envelope_with_declaration_and_whitespace() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
            <Docsvault>
              <Response>
                <StatusCode>0</StatusCode>
              </Response>
              <Result>
                <TokenID>abc-123</TokenID>
              </Result>
            </Docsvault>"#;
        let env = Envelope::parse(body).unwrap();
        assert_eq!(env.status_code.as_deref(), Some("0"));
        assert_eq!(env.message, None);
        assert_eq!(env.result.unwrap().child_text("TokenID"), Some("abc-123"));
    }

    #[test]
    fn empty_elements_have_no_text() {
        let root = parse_document("<A><B/><C></C><D>  </D></A>").unwrap();
        assert_eq!(root.child("B").unwrap().text(), None);
        assert_eq!(root.child("C").unwrap().text(), None);
        assert_eq!(root.child("D").unwrap().text(), None);
        assert!(root.child("E").is_none());
    }

    #[test]
    fn repeated_children_are_all_kept() {
        let root = parse_document(
            "<Result><UserDetail><UserID>1</UserID></UserDetail><UserDetail><UserID>2</UserID></UserDetail></Result>",
        )
        .unwrap();
        let ids: Vec<_> = root
            .all("UserDetail")
            .map(|u| u.child_text("UserID").unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn single_child_is_still_a_sequence() {
        let root = parse_document("<Result><Group><GroupID>7</GroupID></Group></Result>").unwrap();
        assert_eq!(root.all("Group").count(), 1);
        assert_eq!(root.all("Missing").count(), 0);
    }

    #[test]
    fn attributes_read_as_children() {
        let root = parse_document(r#"<FileDetail FileID="42" CheckedOut="true"/>"#).unwrap();
        assert_eq!(root.child_text("FileID"), Some("42"));
        assert_eq!(root.child_text("CheckedOut"), Some("true"));
    }

    #[test]
    fn entities_and_cdata_are_decoded() {
        let root = parse_document(
            "<R><Location>Cabinet &amp; Co\\Reports</Location><Note><![CDATA[a < b]]></Note></R>",
        )
        .unwrap();
        assert_eq!(root.child_text("Location"), Some("Cabinet & Co\\Reports"));
        assert_eq!(root.child_text("Note"), Some("a < b"));
    }

    #[test]
    fn path_walks_nested_children() {
        let root = parse_document(
            "<FileDetail><ListOfIndexes><Indexes><Index>Year</Index></Indexes></ListOfIndexes></FileDetail>",
        )
        .unwrap();
        let first = root.path(&["ListOfIndexes", "Indexes"]).unwrap();
        assert_eq!(first.child_text("Index"), Some("Year"));
        assert!(root.path(&["ListOfIndexes", "Nope"]).is_none());
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = Envelope::parse("<html><body>Server Error</body></html>").unwrap_err();
        assert!(err.0.contains("<Docsvault>"), "{err}");
    }

    #[test]
    fn truncated_document_is_rejected() {
        assert!(parse_document("<Docsvault><Response>").is_err());
        assert!(parse_document("").is_err());
        assert!(parse_document("<A></B>").is_err());
    }
}
