#![no_main]
use libfuzzer_sys::fuzz_target;
use xesbridge_log::{Classifier, TraceParser};
use xesbridge_xes::{XesError, XesWriter, read_log};

fuzz_target!(|data: &[u8]| {
    // Lossy conversion keeps inputs that are "almost" text in play.
    let s = String::from_utf8_lossy(data);
    let records = TraceParser::new().parse(&s);
    let lines = records.len();

    // One record per line means labels and traces always pair up.
    let partition = Classifier::default()
        .partition(records)
        .expect("parser produced misaligned records");
    assert_eq!(partition.len(), lines);

    let writer = XesWriter::new();
    for log in [&partition.positive, &partition.negative] {
        let xml = match writer.to_string(log) {
            Ok(xml) => xml,
            // Names XML cannot carry are refused up front.
            Err(XesError::InvalidCharacter { .. }) => continue,
            Err(err) => panic!("serialization failed: {err}"),
        };
        let reread = read_log(&xml).expect("writer produced unreadable XES");
        assert_eq!(&reread, log);
    }
});
