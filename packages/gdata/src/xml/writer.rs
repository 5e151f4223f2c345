//! Namespace-aware XML writer for element trees.
//!
//! The root element's namespace becomes the default namespace. Every other
//! namespace used in the tree is bound to a prefix on the root, using the
//! conventional prefix for well-known namespaces and `nsN` otherwise.
//! Unqualified elements below a default namespace reset it with `xmlns=""`.

use std::borrow::Cow;
use std::io::Write;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::{known_prefix, WriteOptions, XML_NAMESPACE};
use crate::error::{GDataError, Result};
use crate::extension::ExtensionElement;
use crate::xml::split_attribute_key;

/// Serialize an element tree to an XML string.
///
/// # Examples
/// ```
/// use gdata_binding::config::WriteOptions;
/// use gdata_binding::extension::ExtensionElement;
/// use gdata_binding::xml::write_element;
///
/// let element = ExtensionElement::new("label", Some("urn:example")).with_text("Laptop");
/// let xml = write_element(&element, WriteOptions::compact()).unwrap();
/// assert_eq!(xml, r#"<label xmlns="urn:example">Laptop</label>"#);
/// ```
pub fn write_element(element: &ExtensionElement, options: WriteOptions) -> Result<String> {
    let buffer = Vec::new();
    let bytes = if options.pretty {
        let writer = Writer::new_with_indent(buffer, b' ', options.indent_width);
        write_document(writer, element, options)?
    } else {
        write_document(Writer::new(buffer), element, options)?
    };

    String::from_utf8(bytes).map_err(|e| GDataError::Write(format!("invalid UTF-8 output: {e}")))
}

fn write_document(
    mut writer: Writer<Vec<u8>>,
    element: &ExtensionElement,
    options: WriteOptions,
) -> Result<Vec<u8>> {
    if options.xml_declaration {
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
    }

    let mut state = WriterState::default();
    let mut scope = Scope {
        default_namespace: element.namespace.clone(),
        prefixes: Vec::new(),
    };

    // Bind every non-default namespace on the root so descendants share it.
    let mut root_declarations = Vec::new();
    if let Some(namespace) = &element.namespace {
        root_declarations.push(("xmlns".to_string(), namespace.clone()));
    }
    for namespace in collect_namespaces(element) {
        if Some(&namespace) == element.namespace.as_ref() {
            continue;
        }
        let prefix = state.allocate_prefix(&namespace, &scope);
        root_declarations.push((format!("xmlns:{prefix}"), namespace.clone()));
        scope.prefixes.push((prefix, namespace));
    }

    write_node(&mut writer, element, &mut scope, &mut state, root_declarations)?;
    Ok(writer.into_inner())
}

/// Namespace bindings visible at the element being written.
#[derive(Debug, Clone)]
struct Scope {
    default_namespace: Option<String>,
    prefixes: Vec<(String, String)>,
}

impl Scope {
    fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .rev()
            .find(|(_, uri)| uri == namespace)
            .map(|(prefix, _)| prefix.as_str())
    }

    fn prefix_in_use(&self, prefix: &str) -> bool {
        self.prefixes.iter().any(|(p, _)| p == prefix)
    }
}

#[derive(Debug, Default)]
struct WriterState {
    generated: usize,
}

impl WriterState {
    fn allocate_prefix(&mut self, namespace: &str, scope: &Scope) -> String {
        if let Some(prefix) = known_prefix(namespace) {
            if !scope.prefix_in_use(prefix) {
                return prefix.to_string();
            }
        }
        loop {
            let candidate = format!("ns{}", self.generated);
            self.generated += 1;
            if !scope.prefix_in_use(&candidate) {
                return candidate;
            }
        }
    }
}

/// Namespaces used by the tree, in first-use order, excluding `xml:`.
fn collect_namespaces(element: &ExtensionElement) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    collect_into(element, &mut found);
    found
}

fn collect_into(element: &ExtensionElement, found: &mut Vec<String>) {
    let mut note = |namespace: &str| {
        if namespace != XML_NAMESPACE && !found.iter().any(|n| n == namespace) {
            found.push(namespace.to_string());
        }
    };

    if let Some(namespace) = &element.namespace {
        note(namespace);
    }
    for key in element.attributes.keys() {
        if let (Some(namespace), _) = split_attribute_key(key) {
            note(namespace);
        }
    }
    for child in &element.children {
        collect_into(child, found);
    }
}

fn write_node<W: Write>(
    writer: &mut Writer<W>,
    element: &ExtensionElement,
    scope: &mut Scope,
    state: &mut WriterState,
    mut declarations: Vec<(String, String)>,
) -> Result<()> {
    let saved = scope.clone();

    let name = match element.namespace.as_deref() {
        None => {
            if scope.default_namespace.is_some() {
                declarations.push(("xmlns".to_string(), String::new()));
                scope.default_namespace = None;
            }
            element.tag.clone()
        }
        Some(namespace) if scope.default_namespace.as_deref() == Some(namespace) => {
            element.tag.clone()
        }
        Some(namespace) => {
            let prefix = prefix_or_declare(namespace, scope, state, &mut declarations);
            format!("{prefix}:{}", element.tag)
        }
    };

    let mut attributes: Vec<(String, &str)> = Vec::with_capacity(element.attributes.len());
    for (key, value) in &element.attributes {
        let qualified = match split_attribute_key(key) {
            (None, local) => local.to_string(),
            (Some(XML_NAMESPACE), local) => format!("xml:{local}"),
            (Some(namespace), local) => {
                let prefix = prefix_or_declare(namespace, scope, state, &mut declarations);
                format!("{prefix}:{local}")
            }
        };
        attributes.push((qualified, value.as_str()));
    }

    let mut start = BytesStart::new(name.as_str());
    for (key, value) in &declarations {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    for (key, value) in &attributes {
        let escaped = escape_attribute(value);
        start.push_attribute(Attribute::from((key.as_bytes(), escaped.as_bytes())));
    }

    if element.text.is_none() && element.children.is_empty() {
        emit(writer, Event::Empty(start))?;
    } else {
        emit(writer, Event::Start(start))?;
        if let Some(text) = &element.text {
            emit(writer, Event::Text(BytesText::from_escaped(escape_text(text))))?;
        }
        for child in &element.children {
            write_node(writer, child, scope, state, Vec::new())?;
        }
        emit(writer, Event::End(BytesEnd::new(name.as_str())))?;
    }

    *scope = saved;
    Ok(())
}

fn prefix_or_declare(
    namespace: &str,
    scope: &mut Scope,
    state: &mut WriterState,
    declarations: &mut Vec<(String, String)>,
) -> String {
    if let Some(prefix) = scope.prefix_for(namespace) {
        return prefix.to_string();
    }
    let prefix = state.allocate_prefix(namespace, scope);
    declarations.push((format!("xmlns:{prefix}"), namespace.to_string()));
    scope.prefixes.push((prefix.clone(), namespace.to_string()));
    prefix
}

/// Escape an attribute value, including the whitespace that attribute-value
/// normalization would otherwise turn into spaces.
fn escape_attribute(value: &str) -> String {
    let escaped = escape(value);
    if !escaped.contains(['\n', '\r', '\t']) {
        return escaped.into_owned();
    }
    escaped
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

/// Escape text content. A raw carriage return would come back as a line feed.
fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = escape(text);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#13;"))
    } else {
        escaped
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| GDataError::Write(e.to_string()))
}
