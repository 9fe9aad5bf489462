use super::*;

fn run_to_string(xml: &str, target: &str, batch_size: usize) -> String {
    let sink = run(xml.as_bytes(), target, batch_size, None, Writer::memory()).unwrap();
    let bytes = sink.into_writer().into_memory().unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn validate_rejects_empty_target_element() {
    match validate("", DEFAULT_BATCH_SIZE) {
        Err(Error::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn validate_rejects_zero_batch_size() {
    match validate("x", 0) {
        Err(Error::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn validate_rejects_batch_size_above_the_maximum() {
    match validate("x", MAX_BATCH_SIZE + 1) {
        Err(Error::ResourceLimit(_)) => {}
        other => panic!("expected ResourceLimit, got {other:?}"),
    }
}

#[test]
fn validate_accepts_boundary_batch_sizes() {
    assert!(validate("x", 1).is_ok());
    assert!(validate("x", MAX_BATCH_SIZE).is_ok());
}

#[test]
fn end_to_end_scenario_s1() {
    let out = run_to_string(r#"<?xml version="1.0"?><r><x id="1"><a>hi</a></x><x id="2"/></r>"#, "x", 1000);
    assert_eq!(out, "{\"@id\":\"1\",\"a\":[\"hi\"]}\n{\"@id\":\"2\"}\n");
}

#[test]
fn end_to_end_scenario_s2() {
    let out = run_to_string("<r><y>1</y><y>2</y><y>3</y></r>", "r", 1000);
    assert_eq!(out, "{\"y\":[\"1\",\"2\",\"3\"]}\n");
}

#[test]
fn end_to_end_scenario_s6_no_match_yields_empty_output() {
    let out = run_to_string("<r><z>skip</z></r>", "x", 1000);
    assert_eq!(out, "");
}

#[test]
fn end_to_end_scenario_s7_is_batch_invariant() {
    let mut xml = String::from("<root>");
    for i in 0..10_000 {
        xml.push_str(&format!("<x><n>{i}</n></x>"));
    }
    xml.push_str("</root>");

    let outputs: Vec<String> =
        [1usize, 1_000, 100_000].iter().map(|&b| run_to_string(&xml, "x", b)).collect();
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(outputs[0].lines().count(), 10_000);
}

#[test]
fn source_invariance_between_string_and_file() {
    let xml = "<r><x a=\"1\"><y>hi</y></x></r>";
    let dir = std::env::temp_dir();
    let path = dir.join(format!("xml-to-ndjson-driver-test-{}.xml", std::process::id()));
    std::fs::write(&path, xml).unwrap();

    let from_string = run_to_string(xml, "x", 1000);
    let file = std::fs::File::open(&path).unwrap();
    let sink = run(std::io::BufReader::new(file), "x", 1000, None, Writer::memory()).unwrap();
    let from_file = String::from_utf8(sink.into_writer().into_memory().unwrap()).unwrap();

    std::fs::remove_file(&path).unwrap();
    assert_eq!(from_string, from_file);
}

#[test]
fn malformed_xml_surfaces_a_parse_error_and_still_flushes_what_was_emitted() {
    let err = run("<r><x>ok</x><y></r>".as_bytes(), "x", 1, None, Writer::memory()).unwrap_err();
    match err {
        Error::Parse { .. } => {}
        other => panic!("expected a Parse error, got {other:?}"),
    }
}
