use bacwire_core::apdu::ApduType;
use bacwire_core::encoding::reader::Reader;
use bacwire_core::npdu::Npdu;
use bacwire_core::value_codec::ApplicationValues;
use std::fs;
use std::path::PathBuf;

/// What each fixture in `fixtures/golden` is expected to contain.
struct Expect {
    file: &'static str,
    network_message: Option<u8>,
    apdu: Option<ApduType>,
    values: usize,
}

const CORPUS: &[Expect] = &[
    Expect {
        file: "i_am_local_broadcast.hex",
        network_message: None,
        apdu: Some(ApduType::UnconfirmedRequest),
        values: 4,
    },
    Expect {
        file: "i_am_routed_source.hex",
        network_message: None,
        apdu: Some(ApduType::UnconfirmedRequest),
        values: 4,
    },
    Expect {
        file: "read_property_routed.hex",
        network_message: None,
        apdu: Some(ApduType::ConfirmedRequest),
        values: 0,
    },
    Expect {
        file: "vendor_network_message.hex",
        network_message: Some(0x80),
        apdu: None,
        values: 0,
    },
    Expect {
        file: "who_is_router_to_network.hex",
        network_message: Some(0x00),
        apdu: None,
        values: 0,
    },
];

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/golden")
}

/// Hex octets separated by whitespace; `#` starts a comment line.
fn load(file: &str) -> Vec<u8> {
    let path = fixture_dir().join(file);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(|tok| u8::from_str_radix(tok, 16).unwrap_or_else(|_| panic!("{file}: bad token {tok}")))
        .collect()
}

#[test]
fn every_fixture_on_disk_is_listed() {
    let mut on_disk = fs::read_dir(fixture_dir())
        .expect("fixtures directory should exist")
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".hex"))
        .collect::<Vec<_>>();
    on_disk.sort();
    let listed = CORPUS.iter().map(|e| e.file).collect::<Vec<_>>();
    assert_eq!(on_disk, listed);
}

#[test]
fn golden_corpus_decodes_as_expected() {
    for expect in CORPUS {
        let bytes = load(expect.file);
        let mut r = Reader::new(&bytes);
        let npdu = Npdu::decode(&mut r)
            .unwrap_or_else(|e| panic!("{}: npdu decode failed: {e}", expect.file));

        let network_message = npdu
            .header
            .network_layer_message
            .then_some(npdu.header.network_message_type);
        assert_eq!(network_message, expect.network_message, "{}", expect.file);

        if expect.apdu.is_none() {
            assert!(r.is_empty(), "{}: trailing octets", expect.file);
            continue;
        }

        let first = r.read_u8().expect("apdu type octet");
        assert_eq!(ApduType::of_first_octet(first), expect.apdu, "{}", expect.file);
        if expect.apdu != Some(ApduType::UnconfirmedRequest) {
            continue;
        }

        r.read_u8().expect("service choice");
        let values = ApplicationValues::new(&mut r)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| panic!("{}: value decode failed: {e}", expect.file));
        assert_eq!(values.len(), expect.values, "{}", expect.file);
        assert!(r.is_empty());
    }
}
