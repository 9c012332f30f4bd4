use hickory_proto::rr::RecordType;
use dns_models::rr::{ProviderHandle, RecordConfig, RecordKey, Records};
use dns_models::{Correction, DNSConfig, DomainConfig, ModelError};

mod support;
use support::{example_config, subscribe};

static_assertions::assert_impl_all!(RecordConfig: Send, Sync, Clone);
static_assertions::assert_impl_all!(DomainConfig: Send, Sync, Clone);
static_assertions::assert_impl_all!(DNSConfig: Send, Sync);
static_assertions::assert_impl_all!(Correction: Send);
static_assertions::assert_not_impl_any!(Correction: Clone);

#[test]
fn convert_every_record() {
    subscribe();
    let config = example_config();
    let com = config.find_domain("example.com").unwrap();

    let converted: Vec<_> = com
        .records()
        .iter()
        .map(|record| record.to_resource_record())
        .collect::<Result<_, _>>()
        .unwrap();

    let types: Vec<RecordType> = converted.iter().map(|rr| rr.record_type()).collect();
    assert_eq!(
        types,
        [
            RecordType::A,
            RecordType::A,
            RecordType::A,
            RecordType::MX,
            RecordType::MX,
            RecordType::TXT,
            RecordType::CNAME,
            RecordType::SRV,
        ]
    );

    let txt = converted[5].data().as_txt().unwrap();
    assert_eq!(
        &*txt.txt_data()[0],
        b"v=spf1 include:\"_spf.example.net\" -all".as_slice()
    );

    let mx = converted[4].data().as_mx().unwrap();
    assert_eq!(mx.preference(), 20);
    assert_eq!(mx.exchange().to_string(), "backup.example.net.");

    let srv = converted[7].data().as_srv().unwrap();
    assert_eq!(srv.port(), 5060);
    assert_eq!(converted[7].name().to_string(), "_sip._tcp.example.com.");
}

#[test]
fn one_bad_record_does_not_stop_the_rest() {
    subscribe();
    let config = example_config();
    let org = config.find_domain("example.org").unwrap();

    let results: Vec<_> = org
        .records()
        .iter()
        .map(RecordConfig::to_resource_record)
        .collect();

    assert!(results[0].is_ok());
    assert!(matches!(
        &results[1],
        Err(ModelError::InvalidRecordType { record_type }) if record_type == "SPELLING"
    ));
}

#[test]
fn group_desired_records() {
    subscribe();
    let config = example_config();
    let com = config.find_domain("example.com").unwrap();

    let groups = com.records().grouped();
    assert_eq!(groups.len(), 6);

    let total: usize = groups.values().map(Vec::len).sum();
    assert_eq!(total, com.records().len());

    let www: Vec<&str> = groups[&RecordKey::new("A", "www")]
        .iter()
        .map(|record| record.target())
        .collect();
    assert_eq!(www, ["192.0.2.1", "192.0.2.2"]);

    let listing: Vec<String> = com
        .records()
        .grouped_ordered()
        .keys()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        listing,
        [
            "@ A",
            "www A",
            "docs CNAME",
            "@ MX",
            "_sip._tcp SRV",
            "@ TXT",
        ]
    );
}

#[test]
fn copy_before_planning() {
    subscribe();
    let config = example_config();
    let desired = config.find_domain("example.com").unwrap();

    let mut current = desired.copy().unwrap();
    assert_eq!(&current, desired);

    for record in current.records_mut().iter_mut() {
        record.set_original(Some(ProviderHandle::new("bind", record.to_string())));
        record.inline_mx_priority();
    }
    current.records_mut().retain(|record| record.record_type() != "CNAME");

    assert_eq!(desired.records().len(), 8);
    assert!(desired.records().iter().all(|record| record.original().is_none()));
    assert_eq!(desired.records()[3].target(), "mail.example.com.");
    assert_eq!(desired.records()[3].priority(), 10);

    assert_eq!(current.records()[3].target(), "10 mail.example.com.");
    assert_eq!(current.records()[3].priority(), 0);
}

#[test]
fn copy_record_between_plans() {
    subscribe();
    let config = example_config();
    let com = config.find_domain("example.com").unwrap();

    let mut record = com.records()[1].copy().unwrap();
    record.set_ttl(3600);
    record.set_name("api").unwrap();

    assert_eq!(record.fqdn(), "api.example.com");
    assert_eq!(com.records()[1].fqdn(), "www.example.com");
    assert_eq!(com.records()[1].ttl().as_secs(), 120);
}

#[test]
fn records_collect_and_group_owned() {
    subscribe();
    let config = example_config();
    let com = config.find_domain("example.com").unwrap();

    let records: Records = com
        .records()
        .iter()
        .filter(|record| record.record_type() == "MX")
        .cloned()
        .collect();

    let groups = records.into_grouped();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[&RecordKey::new("MX", "@")].len(), 2);
}

#[test]
fn corrections_wait_for_the_engine() {
    subscribe();
    let config = example_config();
    let com = config.find_domain("example.com").unwrap();

    let (tx, rx) = std::sync::mpsc::channel();
    let mut corrections: Vec<Correction> = com
        .records()
        .iter()
        .map(|record| {
            let tx = tx.clone();
            let line = record.to_string();
            Correction::new(format!("CREATE {line}"), move || {
                tx.send(line.clone()).map_err(dns_models::CorrectionError::new)
            })
        })
        .collect();

    assert!(rx.try_recv().is_err());

    for correction in &mut corrections {
        correction.run().unwrap();
    }
    assert_eq!(rx.try_iter().count(), com.records().len());
}
