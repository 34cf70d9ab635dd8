mod common;

use common::{envelope, header_body, sample_replay, Fixture};
use propbag_reader::propbag::format::header::{has_net_version, parse_header};
use propbag_reader::{
    parse_bytes, parse_bytes_with_envelope, Cursor, ParseOptions, PropbagError, PropertyValue,
};

#[test]
fn net_version_gate() {
    assert!(has_net_version(900, 20));
    assert!(has_net_version(866, 18));
    assert!(!has_net_version(865, 20));
    assert!(!has_net_version(900, 17));
    assert!(!has_net_version(800, 5));
}

#[test]
fn newer_header_consumes_net_version() {
    let bytes = header_body(900, 20, 7, "Soccar", Fixture::new().int_prop("TeamSize", 2).end());
    let mut cursor = Cursor::new(bytes);
    let header = parse_header(&mut cursor, &ParseOptions::default()).expect("header");

    assert_eq!(header.major_version, 900);
    assert_eq!(header.minor_version, 20);
    assert_eq!(header.net_version, Some(7));
    assert_eq!(header.game_type, "Soccar");
    assert_eq!(header.properties.get("TeamSize"), Some(&PropertyValue::Int(2)));
    assert_eq!(cursor.remaining_length(), 0);
}

#[test]
fn older_header_never_reads_a_net_version() {
    let bytes = Fixture::new().i32(800).i32(5).build();
    let mut cursor = Cursor::new(bytes);
    match parse_header(&mut cursor, &ParseOptions::default()) {
        Err(PropbagError::HeaderError(msg)) => assert!(msg.contains("800.5"), "message: {}", msg),
        other => panic!("expected HeaderError, got {:?}", other),
    }
    assert_eq!(cursor.position(), 8);
}

#[test]
fn sample_replay_decodes() {
    let parsed = parse_bytes_with_envelope(sample_replay(), &ParseOptions::default())
        .expect("sample replay");

    assert_eq!(parsed.header_crc, 0xDEAD_BEEF);
    assert_eq!(parsed.header.major_version, 868);
    assert_eq!(parsed.header.net_version, Some(10));
    assert_eq!(parsed.header.game_type, "TAGame.Replay_Soccar_TA");

    let props = &parsed.header.properties;
    assert_eq!(
        props.keys().collect::<Vec<_>>(),
        vec![
            "TeamSize",
            "Team0Score",
            "Team1Score",
            "Goals",
            "PlayerName",
            "RecordFPS",
            "MapName",
            "PlayerStats",
            "bMatchEnded",
        ]
    );

    let goals = props.get("Goals").and_then(PropertyValue::as_array).expect("goals");
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[1].get("PlayerName").and_then(PropertyValue::as_str), Some("Müller"));
    assert_eq!(goals[1].get("frame"), Some(&PropertyValue::Int(2950)));

    let stats = props.get("PlayerStats").and_then(PropertyValue::as_array).expect("stats");
    assert_eq!(stats[0].get("OnlineID"), Some(&PropertyValue::QWord(76_561_198_000_000_001)));
    assert_eq!(stats[0].get("bBot"), Some(&PropertyValue::Bool(false)));
    assert_eq!(props.get("RecordFPS"), Some(&PropertyValue::Float(30.0)));
    assert_eq!(props.get("bMatchEnded"), Some(&PropertyValue::Bool(true)));
}

#[test]
fn checksum_is_not_verified() {
    let body = header_body(900, 20, 1, "Any", Fixture::new().end());
    let a = parse_bytes(envelope(body.clone(), 0), &ParseOptions::default()).expect("crc 0");
    let b = parse_bytes(envelope(body, 0x1234_5678), &ParseOptions::default()).expect("crc other");
    assert_eq!(a, b);
}

#[test]
fn declared_header_size_must_be_available() {
    let body = header_body(900, 20, 1, "Any", Fixture::new().end());
    let bytes = Fixture::new()
        .i32(body.len() as i32 + 1)
        .u32(0)
        .raw(&body)
        .build();
    assert!(matches!(
        parse_bytes(bytes, &ParseOptions::default()),
        Err(PropbagError::OutOfBounds { offset: 8, .. })
    ));
}

#[test]
fn header_size_is_advisory_only() {
    // A smaller declared size does not bound the header decode.
    let body = header_body(900, 20, 1, "Any", Fixture::new().int_prop("X", 1).end());
    let bytes = Fixture::new().i32(4).u32(0).raw(&body).build();
    let header = parse_bytes(bytes, &ParseOptions::default()).expect("header");
    assert_eq!(header.properties.get("X"), Some(&PropertyValue::Int(1)));
}

#[test]
fn negative_header_size_is_rejected() {
    let bytes = Fixture::new().i32(-1).u32(0).build();
    assert!(matches!(
        parse_bytes(bytes, &ParseOptions::default()),
        Err(PropbagError::HeaderError(_))
    ));
}

#[test]
fn wide_game_type_is_supported() {
    let body = Fixture::new()
        .i32(900)
        .i32(20)
        .i32(3)
        .wide_text("Spiel")
        .end()
        .build();
    let header = parse_bytes(envelope(body, 0), &ParseOptions::default()).expect("header");
    assert_eq!(header.game_type, "Spiel");
    assert!(header.properties.is_empty());
}

#[test]
fn truncated_files_are_out_of_bounds() {
    let full = sample_replay();
    for cut in [0, 3, 7, 20, full.len() / 2, full.len() - 1] {
        let result = parse_bytes(full[..cut].to_vec(), &ParseOptions::default());
        assert!(
            matches!(result, Err(PropbagError::OutOfBounds { .. })),
            "cut at {} gave {:?}",
            cut,
            result
        );
    }
}
