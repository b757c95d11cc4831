// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The XML front end: reads a document with [`quick_xml`] and pushes its
//! events into a [`ContentHandler`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use quick_xml::NsReader;

use crate::error::Error;
use crate::event::{Attribute, Attributes, ElementName};
use crate::handler::ContentHandler;

/// Pushes all events of the XML document in `data` into the `handler`.
///
/// Element and attribute names are resolved against the namespace
/// declarations in scope. Namespace declarations themselves are not reported
/// as attributes. Whitespace-only text is skipped; other text is delivered as
/// is, and may arrive in several pieces (e.g. around comments).
///
/// # Errors
///
/// Returns an error if the document is not well-formed or the handler fails.
/// Events up to the error have already been delivered.
pub fn parse<H>(data: &[u8], handler: &mut H) -> Result<(), Error>
where
    H: ContentHandler + ?Sized,
{
    let mut reader = EventReader::new(data);
    while reader.step(handler)? {}
    Ok(())
}

/// Pull-style reader delivering one XML event per [`step`](Self::step).
pub struct EventReader<'a> {
    reader: NsReader<&'a [u8]>,
    buf: Vec<u8>,
    depth: usize,
}

impl<'a> EventReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let mut reader = NsReader::from_reader(data);
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
            depth: 0,
        }
    }

    /// Reads the next event and pushes it into the `handler`.
    ///
    /// Returns `false` once the end of the document is reached.
    pub fn step<H>(&mut self, handler: &mut H) -> Result<bool, Error>
    where
        H: ContentHandler + ?Sized,
    {
        self.buf.clear();
        match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(e) => {
                let name = OwnedName::resolve(&self.reader, e.name())?;
                let attrs = attributes(&self.reader, &e)?;
                self.depth += 1;
                handler.start_element(&name.as_name(), &attrs)?;
            }
            Event::Empty(e) => {
                let name = OwnedName::resolve(&self.reader, e.name())?;
                let attrs = attributes(&self.reader, &e)?;
                handler.start_element(&name.as_name(), &attrs)?;
                handler.end_element(&name.as_name())?;
            }
            Event::End(e) => {
                let name = OwnedName::resolve(&self.reader, e.name())?;
                self.depth = self.depth.saturating_sub(1);
                handler.end_element(&name.as_name())?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                if !text.trim().is_empty() {
                    handler.characters(&text)?;
                }
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)?;
                if !text.trim().is_empty() {
                    handler.characters(text)?;
                }
            }
            Event::Eof if self.depth > 0 => {
                return Err(Error::Xml(format!(
                    "document ends with {} unclosed element(s)",
                    self.depth
                )));
            }
            Event::Eof => return Ok(false),
            _ => {}
        }

        Ok(true)
    }
}

struct OwnedName {
    namespace: String,
    local: String,
    qualified: String,
}

impl OwnedName {
    fn resolve(reader: &NsReader<&[u8]>, name: QName) -> Result<Self, Error> {
        let (namespace, local) = reader.resolve_element(name);
        Ok(Self {
            namespace: namespace_uri(namespace)?,
            local: std::str::from_utf8(local.as_ref())?.to_string(),
            qualified: std::str::from_utf8(name.as_ref())?.to_string(),
        })
    }

    fn as_name(&self) -> ElementName<'_> {
        ElementName::new(&self.namespace, &self.local, &self.qualified)
    }
}

fn namespace_uri(result: ResolveResult) -> Result<String, Error> {
    match result {
        ResolveResult::Bound(ns) => Ok(std::str::from_utf8(ns.as_ref())?.to_string()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(Error::Xml(format!(
            "unknown namespace prefix \"{}\"",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn attributes(reader: &NsReader<&[u8]>, e: &BytesStart) -> Result<Attributes, Error> {
    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let (namespace, local) = reader.resolve_attribute(attr.key);
        attrs.push(Attribute {
            namespace: namespace_uri(namespace)?,
            local: std::str::from_utf8(local.as_ref())?.to_string(),
            qualified: std::str::from_utf8(attr.key.as_ref())?.to_string(),
            value: attr.unescape_value()?.into_owned(),
        });
    }
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl ContentHandler for Trace {
        fn start_element(&mut self, name: &ElementName, attrs: &Attributes) -> Result<(), Error> {
            let attrs: Vec<_> = attrs
                .iter()
                .map(|a| format!(" {{{}}}{}={}", a.namespace, a.local, a.value))
                .collect();
            self.0.push(format!(
                "<{{{}}}{} {}{}",
                name.namespace,
                name.local,
                name.qualified,
                attrs.concat()
            ));
            Ok(())
        }

        fn characters(&mut self, text: &str) -> Result<(), Error> {
            self.0.push(text.to_string());
            Ok(())
        }

        fn end_element(&mut self, name: &ElementName) -> Result<(), Error> {
            self.0.push(format!(">{{{}}}{}", name.namespace, name.local));
            Ok(())
        }
    }

    #[test]
    fn resolves_namespaces() {
        let xml = br#"
          <gml:Point xmlns:gml="http://www.opengis.net/gml" xmlns:x="urn:x" x:id="p1" srsName="EPSG:4326">
            <gml:coordinates>1,2</gml:coordinates>
            <plain/>
          </gml:Point>"#;

        let mut trace = Trace::default();
        parse(xml, &mut trace).unwrap();

        assert_eq!(
            trace.0,
            vec![
                "<{http://www.opengis.net/gml}Point gml:Point {urn:x}id=p1 {}srsName=EPSG:4326",
                "<{http://www.opengis.net/gml}coordinates gml:coordinates",
                "1,2",
                ">{http://www.opengis.net/gml}coordinates",
                "<{}plain plain",
                ">{}plain",
                ">{http://www.opengis.net/gml}Point",
            ]
        );
    }

    #[test]
    fn unescapes_text_and_attributes() {
        let xml = br#"<a b="x &amp; y">1 &lt; 2<![CDATA[ raw ]]></a>"#;

        let mut trace = Trace::default();
        parse(xml, &mut trace).unwrap();

        assert_eq!(
            trace.0,
            vec!["<{}a a {}b=x & y", "1 < 2", " raw ", ">{}a"]
        );
    }

    #[test]
    fn text_around_comments_keeps_its_whitespace() {
        let xml = b"<a>1,2 <!-- c --> 3,4</a>";

        let mut trace = Trace::default();
        parse(xml, &mut trace).unwrap();

        assert_eq!(trace.0, vec!["<{}a a", "1,2 ", " 3,4", ">{}a"]);
    }

    #[test]
    fn mismatched_end_is_an_error() {
        let mut trace = Trace::default();
        let err = parse(b"<a><b></a>", &mut trace).unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }

    #[test]
    fn unclosed_document_is_an_error() {
        let mut trace = Trace::default();
        let err = parse(b"<a><b></b>", &mut trace).unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }

    #[test]
    fn unknown_prefix_is_an_error() {
        let mut trace = Trace::default();
        assert!(parse(b"<gml:Point/>", &mut trace).is_err());
    }
}
