use super::*;

fn events(xml: &str) -> Vec<XmlEvent> {
    let mut reader = EventReader::new(xml.as_bytes());
    let mut out = Vec::new();
    loop {
        let event = reader.next().expect("well-formed input");
        let is_eof = event == XmlEvent::Eof;
        out.push(event);
        if is_eof {
            return out;
        }
    }
}

#[test]
fn start_and_end_are_paired() {
    let got = events("<r><x>hi</x></r>");
    assert_eq!(
        got,
        vec![
            XmlEvent::Start { name: "r".to_string(), attrs: vec![] },
            XmlEvent::Start { name: "x".to_string(), attrs: vec![] },
            XmlEvent::Text("hi".to_string()),
            XmlEvent::End { name: "x".to_string() },
            XmlEvent::End { name: "r".to_string() },
            XmlEvent::Eof,
        ]
    );
}

#[test]
fn self_closing_element_splits_into_start_then_end() {
    let got = events(r#"<r><x id="2"/></r>"#);
    assert_eq!(
        got,
        vec![
            XmlEvent::Start { name: "r".to_string(), attrs: vec![] },
            XmlEvent::Start { name: "x".to_string(), attrs: vec![("id".to_string(), "2".to_string())] },
            XmlEvent::End { name: "x".to_string() },
            XmlEvent::End { name: "r".to_string() },
            XmlEvent::Eof,
        ]
    );
}

#[test]
fn qualified_names_are_kept_whole() {
    let got = events("<r><book:item>x</book:item></r>");
    assert!(got.iter().any(|e| *e == XmlEvent::Start { name: "book:item".to_string(), attrs: vec![] }));
}

#[test]
fn predefined_and_numeric_entities_decode_in_text() {
    let got = events("<r>&lt;b&gt;&amp;&#65;&#x42;</r>");
    assert_eq!(got[1], XmlEvent::Text("<b>&AB".to_string()));
}

#[test]
fn attribute_values_are_entity_decoded() {
    let got = events(r#"<r a="x &amp; y"/>"#);
    match &got[0] {
        XmlEvent::Start { attrs, .. } => assert_eq!(attrs[0].1, "x & y"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn cdata_is_passed_through_raw() {
    let got = events("<r><![CDATA[<raw>&]]></r>");
    assert_eq!(got[1], XmlEvent::CData("<raw>&".to_string()));
}

#[test]
fn comments_pis_decl_and_doctype_are_skipped() {
    let got = events(
        r#"<?xml version="1.0"?><!DOCTYPE r><!-- hi --><r><?pi data?><x>1</x></r>"#,
    );
    assert_eq!(
        got,
        vec![
            XmlEvent::Start { name: "r".to_string(), attrs: vec![] },
            XmlEvent::Start { name: "x".to_string(), attrs: vec![] },
            XmlEvent::Text("1".to_string()),
            XmlEvent::End { name: "x".to_string() },
            XmlEvent::End { name: "r".to_string() },
            XmlEvent::Eof,
        ]
    );
}

#[test]
fn malformed_input_yields_parse_error_with_offset() {
    let mut reader = EventReader::new("<r><x></y></r>".as_bytes());
    reader.next().unwrap(); // r
    reader.next().unwrap(); // x
    let err = reader.next().unwrap_err();
    match err {
        Error::Parse { offset: Some(_), .. } => {}
        other => panic!("expected a Parse error with an offset, got {other:?}"),
    }
}

#[test]
fn eof_repeats_once_reached() {
    let mut reader = EventReader::new("<r/>".as_bytes());
    reader.next().unwrap();
    reader.next().unwrap();
    assert_eq!(reader.next().unwrap(), XmlEvent::Eof);
    assert_eq!(reader.next().unwrap(), XmlEvent::Eof);
}
