//! End-to-end wire format tests
//!
//! These pin down the exact byte layout produced by `encode_map`, including
//! the header, package string, string table, and element stream.

use nether_map::{
    AttributeValue, Element, MapError, encode_map, encode_map_to_file, encode_map_to_vec,
    INNER_TEXT_KEY, MAP_HEADER, TAG_STR_INDEXED, TAG_STR_RAW, TAG_U8,
};

/// varint length prefix + UTF-8 bytes, for building expected buffers
fn prefixed(s: &str) -> Vec<u8> {
    assert!(s.len() < 128, "test helper only handles one-byte prefixes");
    let mut out = vec![s.len() as u8];
    out.extend_from_slice(s.as_bytes());
    out
}

#[test]
fn minimal_map_layout() {
    // Map -> root{n: 5}; table order is name first, then key
    let root = Element::new("root").with_attr("n", 5i64);
    let bytes = encode_map_to_vec(&root, "pkg").unwrap();

    let mut expected = Vec::new();
    expected.extend(prefixed(MAP_HEADER));
    expected.extend(prefixed("pkg"));
    expected.extend_from_slice(&[0x02, 0x00]); // table count
    expected.extend(prefixed("root"));
    expected.extend(prefixed("n"));
    expected.extend_from_slice(&[0x00, 0x00]); // name index: "root" -> 0
    expected.push(0x01); // attr count
    expected.extend_from_slice(&[0x01, 0x00]); // key index: "n" -> 1
    expected.extend_from_slice(&[TAG_U8, 0x05]);
    expected.extend_from_slice(&[0x00, 0x00]); // child count

    assert_eq!(bytes, expected);
}

#[test]
fn string_values_share_table_entries() {
    // "spinner" appears as a value twice; both occurrences must resolve to
    // the same index, stored once
    let root = Element::new("entities")
        .with_child(Element::new("entity").with_attr("kind", "spinner"))
        .with_child(Element::new("entity").with_attr("kind", "spinner"));
    let bytes = encode_map_to_vec(&root, "pkg").unwrap();

    let needle = prefixed("spinner");
    let hits = bytes
        .windows(needle.len())
        .filter(|w| *w == needle.as_slice())
        .count();
    assert_eq!(hits, 1, "value string must be stored exactly once");
}

#[test]
fn inner_text_encodes_as_sentinel_attribute() {
    let root = Element::new("dialog").with_text("abcdefgh");
    let bytes = encode_map_to_vec(&root, "pkg").unwrap();

    // Table: "dialog", "innerText" - never the body
    let mut table = Vec::new();
    table.extend_from_slice(&[0x02, 0x00]);
    table.extend(prefixed("dialog"));
    table.extend(prefixed(INNER_TEXT_KEY));

    let mut element = Vec::new();
    element.extend_from_slice(&[0x00, 0x00]); // "dialog" -> 0
    element.push(0x01); // the text counts as an attribute
    element.extend_from_slice(&[0x01, 0x00]); // "innerText" -> 1
    element.push(TAG_STR_RAW); // body not in table, no repeats
    element.extend(prefixed("abcdefgh"));
    element.extend_from_slice(&[0x00, 0x00]);

    let mut expected = Vec::new();
    expected.extend(prefixed(MAP_HEADER));
    expected.extend(prefixed("pkg"));
    expected.extend(table);
    expected.extend(element);

    assert_eq!(bytes, expected);
}

#[test]
fn inner_text_body_can_still_hit_the_table() {
    // The body is never registered, but an identical string registered
    // elsewhere makes the lookup succeed, same as any string value
    let root = Element::new("Map")
        .with_attr("label", "warp")
        .with_child(Element::new("dialog").with_text("warp"));
    let bytes = encode_map_to_vec(&root, "pkg").unwrap();

    // "warp" registers once (as the attribute value), index 2
    let tail = [TAG_STR_INDEXED, 0x02, 0x00];
    assert!(
        bytes.windows(tail.len()).any(|w| w == tail),
        "inner text matching a table entry should encode as an index"
    );
}

#[test]
fn encoding_is_deterministic() {
    let room = Element::new("level")
        .with_attr("name", "lvl_2")
        .with_attr("x", 1024i64)
        .with_attr("dark", true)
        .with_attr("windSpeed", 0.25f32)
        .with_child(Element::new("solids").with_text("999999999\n900000009\n999999999"));
    let root = Element::new("Map").with_child(Element::new("levels").with_child(room));

    let first = encode_map_to_vec(&root, "campaign").unwrap();
    let second = encode_map_to_vec(&root, "campaign").unwrap();
    assert_eq!(first, second);
}

#[test]
fn mixed_value_types_cover_the_tag_space() {
    let root = Element::new("e")
        .with_attr("b", false)
        .with_attr("small", 7i64)
        .with_attr("mid", -300i64)
        .with_attr("big", 70000i64)
        .with_attr("f", 1.5f32)
        .with_attr("s", "e"); // matches the element name, table hit at index 0
    let bytes = encode_map_to_vec(&root, "pkg").unwrap();

    let mut expected = Vec::new();
    expected.extend(prefixed(MAP_HEADER));
    expected.extend(prefixed("pkg"));
    expected.extend_from_slice(&[0x07, 0x00]); // table count
    for s in ["e", "b", "small", "mid", "big", "f", "s"] {
        expected.extend(prefixed(s));
    }
    expected.extend_from_slice(&[0x00, 0x00, 0x06]); // name index, attr count
    expected.extend_from_slice(&[0x01, 0x00, 0, 0x00]); // b: bool false
    expected.extend_from_slice(&[0x02, 0x00, 1, 0x07]); // small: u8 7
    expected.extend_from_slice(&[0x03, 0x00, 2, 0xD4, 0xFE]); // mid: i16 -300
    expected.extend_from_slice(&[0x04, 0x00, 3, 0x70, 0x11, 0x01, 0x00]); // big: i32 70000
    expected.extend_from_slice(&[0x05, 0x00, 4, 0x00, 0x00, 0xC0, 0x3F]); // f: f32 1.5
    expected.extend_from_slice(&[0x06, 0x00, 5, 0x00, 0x00]); // s: index of "e"
    expected.extend_from_slice(&[0x00, 0x00]); // child count

    assert_eq!(bytes, expected);
}

#[test]
fn attribute_value_enum_is_exposed() {
    let v: AttributeValue = 12i64.into();
    assert_eq!(v, AttributeValue::Int(12));
}

#[test]
fn write_failure_surfaces_as_io_error() {
    struct Broken;
    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink unavailable"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let root = Element::new("root");
    let result = encode_map(&root, "pkg", Broken);
    assert!(matches!(result, Err(MapError::Io(_))));
}

#[test]
fn file_output_matches_vec_output() {
    let room = Element::new("level")
        .with_attr("name", "lvl_1")
        .with_child(Element::new("bg").with_text("0000000000000000000000000000"));
    let root = Element::new("Map").with_child(Element::new("levels").with_child(room));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bin");
    encode_map_to_file(&root, "campaign", &path).unwrap();

    let from_file = std::fs::read(&path).unwrap();
    let from_vec = encode_map_to_vec(&root, "campaign").unwrap();
    assert_eq!(from_file, from_vec);
    assert_eq!(&from_file[1..12], MAP_HEADER.as_bytes());
}
