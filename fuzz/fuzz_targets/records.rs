#![no_main]

use libfuzzer_sys::fuzz_target;
use bamlscope::{baml::deferred::DeferredSection, baml::records::RecordType, BamlReader};

fuzz_target!(|data: &[u8]| {
    let Ok(mut reader) = BamlReader::new(data) else {
        return;
    };

    while let Ok(Some(kind)) = reader.peek_record_type() {
        if kind == RecordType::DeferableContentStart {
            let mut section = DeferredSection::new();
            if section.open(&mut reader).is_err() || section.scan_keys(&mut reader).is_err() {
                return;
            }
            for index in 0..section.keys().len() {
                let _ = section.value(&mut reader, index);
            }
            if section.close(&mut reader).is_err() {
                return;
            }
            continue;
        }

        match reader.next_record() {
            Ok(Some(record)) => {
                reader.release(record);
            }
            _ => return,
        }
    }
});
