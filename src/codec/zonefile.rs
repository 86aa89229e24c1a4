//! Zone-file codec on top of the `domain` crate.
//!
//! Scanning is done by `domain`'s in-place zone-file reader; this module only
//! maps its records into [`Zone`] and back. Names in the model are kept
//! relative to the zone apex (the SOA owner, or the configured origin when
//! the zone has no SOA): `@` for the apex itself, a relative name below it,
//! and an absolute name with a trailing dot anywhere else.
//!
//! Written text always carries an explicit owner, TTL and class on every
//! line, so no line depends on the one before it.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use bytes::Bytes;
use domain::base::name::{Label, Name, ToLabelIter, ToName, UncertainName};
use domain::rdata::{Txt, ZoneRecordData};
use domain::zonefile::inplace::{Entry, ScannedRecord, Zonefile};

use super::{CodecError, ZoneCodec};
use crate::models::{Record, RecordData, RecordType, Soa, Zone, APEX};

/// TTL written for records when neither they nor the zone carry one.
pub const DEFAULT_TTL: u32 = 3600;

#[derive(Debug, Clone)]
pub struct ZoneFileCodec {
    origin: Name<Bytes>,
}

impl ZoneFileCodec {
    /// `origin` resolves relative names in zone text that has no `$ORIGIN`.
    pub fn new(origin: &str) -> Result<Self, CodecError> {
        let origin = Name::<Bytes>::from_str(origin).map_err(|e| unrepresentable(origin, e))?;
        Ok(Self { origin })
    }
}

impl ZoneCodec for ZoneFileCodec {
    fn parse(&self, text: &str) -> Result<Zone, CodecError> {
        let mut reader = Zonefile::from(text);
        reader.set_origin(self.origin.clone());

        let mut scanned = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .map_err(|e| CodecError::Syntax(e.to_string()))?
        {
            match entry {
                Entry::Record(record) => scanned.push(record),
                Entry::Include { path, .. } => {
                    return Err(CodecError::Include(path.to_string()))
                }
            }
        }

        let soa_record = scanned
            .iter()
            .find(|record| matches!(record.data(), ZoneRecordData::Soa(_)));
        let apex = match soa_record {
            Some(record) => record.owner().to_bytes(),
            None => self.origin.clone(),
        };

        let mut zone = Zone::new();
        zone.origin = Some(absolute_text(&apex));
        zone.ttl = soa_record
            .or(scanned.first())
            .map(|record| record.ttl().as_secs());

        for record in &scanned {
            read_record(&mut zone, record, &apex)?;
        }
        Ok(zone)
    }

    fn serialize(&self, zone: &Zone) -> Result<String, CodecError> {
        let origin = match &zone.origin {
            Some(origin) => origin_text(origin)?,
            None => absolute_text(&self.origin),
        };
        let default_ttl = zone.ttl.unwrap_or(DEFAULT_TTL);

        let mut out = format!("$ORIGIN {}\n$TTL {}\n", origin, default_ttl);

        if let Some(soa) = &zone.soa {
            out.push_str("\n; SOA Record\n");
            out.push_str(&format!(
                "{}\t{}\tIN\tSOA\t{} {} ( {} {} {} {} {} )\n",
                owner_text(soa.name.as_deref())?,
                soa.ttl.unwrap_or(default_ttl),
                target_name(&soa.mname, &origin)?,
                target_name(&soa.rname, &origin)?,
                soa.serial,
                soa.refresh,
                soa.retry,
                soa.expire,
                soa.minimum,
            ));
        }

        for record_type in RecordType::ALL {
            let records = zone.records(record_type);
            if records.is_empty() {
                continue;
            }
            out.push_str(&format!("\n; {} Records\n", record_type));
            for record in records {
                out.push_str(&format!(
                    "{}\t{}\tIN\t{}\t{}\n",
                    owner_text(record.name.as_deref())?,
                    record.ttl.unwrap_or(default_ttl),
                    record_type,
                    rdata_text(&record.data, &origin)?,
                ));
            }
        }

        Ok(out)
    }
}

fn read_record(zone: &mut Zone, record: &ScannedRecord, apex: &Name<Bytes>) -> Result<(), CodecError> {
    let name = Some(model_name(record.owner(), apex));
    let ttl = Some(record.ttl().as_secs()).filter(|ttl| Some(*ttl) != zone.ttl);

    let data = match record.data() {
        ZoneRecordData::Soa(soa) => {
            if zone.soa.is_some() {
                return Err(CodecError::DuplicateSoa);
            }
            zone.soa = Some(Soa {
                name,
                ttl,
                mname: model_name(soa.mname(), apex),
                rname: model_name(soa.rname(), apex),
                serial: soa.serial().into_int(),
                refresh: soa.refresh().as_secs(),
                retry: soa.retry().as_secs(),
                expire: soa.expire().as_secs(),
                minimum: soa.minimum().as_secs(),
            });
            return Ok(());
        }
        ZoneRecordData::Ns(ns) => RecordData::Ns {
            host: model_name(ns.nsdname(), apex),
        },
        ZoneRecordData::A(a) => RecordData::A {
            ip: a.addr().to_string(),
        },
        ZoneRecordData::Aaaa(aaaa) => RecordData::Aaaa {
            ip: aaaa.addr().to_string(),
        },
        ZoneRecordData::Cname(cname) => RecordData::Cname {
            alias: model_name(cname.cname(), apex),
        },
        ZoneRecordData::Mx(mx) => RecordData::Mx {
            preference: mx.preference(),
            host: model_name(mx.exchange(), apex),
        },
        ZoneRecordData::Txt(txt) => {
            let bytes: Vec<u8> = txt.iter().flatten().copied().collect();
            RecordData::Txt {
                txt: String::from_utf8_lossy(&bytes).into_owned(),
            }
        }
        ZoneRecordData::Srv(srv) => RecordData::Srv {
            value: format!(
                "{} {} {} {}",
                srv.priority(),
                srv.weight(),
                srv.port(),
                model_name(srv.target(), apex)
            ),
        },
        _ => return Err(CodecError::UnsupportedType(record.rtype().to_string())),
    };

    zone.push(Record::new(name, ttl, data));
    Ok(())
}

fn rdata_text(data: &RecordData, origin: &str) -> Result<String, CodecError> {
    let text = match data {
        RecordData::Ns { host } => target_name(host, origin)?,
        RecordData::A { ip } => Ipv4Addr::from_str(ip)
            .map_err(|e| unrepresentable(ip, e))?
            .to_string(),
        RecordData::Aaaa { ip } => Ipv6Addr::from_str(ip)
            .map_err(|e| unrepresentable(ip, e))?
            .to_string(),
        RecordData::Cname { alias } => target_name(alias, origin)?,
        RecordData::Mx { preference, host } => format!("{}\t{}", preference, target_name(host, origin)?),
        RecordData::Txt { txt } => Txt::<Vec<u8>>::build_from_slice(txt.as_bytes())
            .map_err(|e| unrepresentable(txt, e))?
            .to_string(),
        RecordData::Srv { value } => srv_text(value, origin)?,
    };
    Ok(text)
}

/// SRV rdata is kept as one string: priority, weight, port and target.
fn srv_text(value: &str, origin: &str) -> Result<String, CodecError> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    let [priority, weight, port, target] = fields.as_slice() else {
        return Err(unrepresentable(value, "expected priority, weight, port and target"));
    };
    let number = |field: &str| u16::from_str(field).map_err(|e| unrepresentable(value, e));
    Ok(format!(
        "{} {} {} {}",
        number(*priority)?,
        number(*weight)?,
        number(*port)?,
        target_name(target, origin)?
    ))
}

fn owner_text(name: Option<&str>) -> Result<String, CodecError> {
    match name {
        None => Ok(APEX.to_string()),
        Some(name) => zone_file_name(name),
    }
}

/// Names inside rdata: the scanner reads `@` there as a plain label, so the
/// apex is spelled out as the origin.
fn target_name(name: &str, origin: &str) -> Result<String, CodecError> {
    if name == APEX {
        Ok(origin.to_string())
    } else {
        zone_file_name(name)
    }
}

fn origin_text(origin: &str) -> Result<String, CodecError> {
    let mut text = zone_file_name(origin)?;
    if text == APEX {
        return Err(unrepresentable(origin, "not a domain name"));
    }
    if !text.ends_with('.') {
        text.push('.');
    }
    Ok(text)
}

/// Name as the model holds it, relative to `apex` where possible.
fn model_name<N: ToLabelIter + ?Sized>(name: &N, apex: &Name<Bytes>) -> String {
    let labels: Vec<&Label> = name.iter_labels().filter(|label| !label.is_root()).collect();
    if !name.ends_with(apex) {
        return format!("{}.", join_labels(&labels, |label| label.to_string()));
    }

    let apex_len = apex.iter().filter(|label| !label.is_root()).count();
    let keep = labels.len().saturating_sub(apex_len);
    if keep == 0 {
        APEX.to_string()
    } else {
        join_labels(&labels[..keep], |label| label.to_string())
    }
}

/// A model name written for the zone-file scanner.
fn zone_file_name(name: &str) -> Result<String, CodecError> {
    if name == APEX {
        return Ok(APEX.to_string());
    }
    let parsed = UncertainName::<Vec<u8>>::from_chars(name.chars()).map_err(|e| unrepresentable(name, e))?;
    match parsed {
        UncertainName::Absolute(absolute) => {
            let labels: Vec<&Label> = absolute.iter().filter(|label| !label.is_root()).collect();
            Ok(format!("{}.", join_labels(&labels, escaped_label)))
        }
        UncertainName::Relative(relative) => {
            let labels: Vec<&Label> = relative.iter().collect();
            if labels.is_empty() {
                return Err(unrepresentable(name, "empty name"));
            }
            Ok(join_labels(&labels, escaped_label))
        }
    }
}

fn absolute_text(name: &Name<Bytes>) -> String {
    let labels: Vec<&Label> = name.iter().filter(|label| !label.is_root()).collect();
    format!("{}.", join_labels(&labels, escaped_label))
}

fn join_labels(labels: &[&Label], show: impl Fn(&Label) -> String) -> String {
    labels.iter().map(|label| show(label)).collect::<Vec<_>>().join(".")
}

/// Only letters, digits, `-`, `_` and `*` are written as-is; every other
/// octet becomes `\DDD` so that `;`, quotes, parentheses and a leading `$`
/// reach the scanner as label text.
fn escaped_label(label: &Label) -> String {
    label
        .as_slice()
        .iter()
        .map(|&octet| match octet {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'*' => char::from(octet).to_string(),
            _ => format!("\\{:03}", octet),
        })
        .collect()
}

fn unrepresentable(value: &str, reason: impl std::fmt::Display) -> CodecError {
    CodecError::Unrepresentable {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"$ORIGIN user.example.com.
$TTL 3600

@   IN  SOA ns1.example.com. admin.example.com. (
        2024010101 ; serial
        3600       ; refresh
        600        ; retry
        604800     ; expire
        300 )      ; minimum

    IN  NS  ns1
@   IN  NS  ns2.other.net.
ns1 IN  A   1.2.3.4
www 300 IN  A   5.6.7.8
v6  IN  AAAA 2001:db8::1
ftp IN  CNAME www
@   IN  MX  10 mail
@   IN  TXT "v=spf1 -all" ; policy
_sip._tcp IN SRV 10 5 5060 sip
"#;

    fn codec() -> ZoneFileCodec {
        ZoneFileCodec::new("user.example.com.").unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let zone = codec().parse(SAMPLE).unwrap();

        assert_eq!(zone.origin.as_deref(), Some("user.example.com."));
        assert_eq!(zone.ttl, Some(3600));

        let soa = zone.soa.as_ref().unwrap();
        assert_eq!(soa.name.as_deref(), Some("@"));
        assert_eq!(soa.mname, "ns1.example.com.");
        assert_eq!(soa.serial, 2024010101);
        assert_eq!(soa.expire, 604_800);
        assert_eq!(soa.minimum, 300);

        // The indented NS line belongs to the SOA owner before it.
        let ns = zone.records(RecordType::NS);
        assert_eq!(ns.len(), 2);
        assert_eq!(ns[0].name.as_deref(), Some("@"));
        assert_eq!(ns[0].data, RecordData::Ns { host: "ns1".to_string() });
        assert_eq!(ns[1].data, RecordData::Ns { host: "ns2.other.net.".to_string() });

        let a = zone.records(RecordType::A);
        assert_eq!(a[0].ttl, None);
        assert_eq!(a[1].name.as_deref(), Some("www"));
        assert_eq!(a[1].ttl, Some(300));

        assert_eq!(
            zone.records(RecordType::MX)[0].data,
            RecordData::Mx { preference: 10, host: "mail".to_string() }
        );
        assert_eq!(
            zone.records(RecordType::TXT)[0].data,
            RecordData::Txt { txt: "v=spf1 -all".to_string() }
        );
        assert_eq!(
            zone.records(RecordType::SRV)[0].data,
            RecordData::Srv { value: "10 5 5060 sip".to_string() }
        );
        assert_eq!(zone.len(), 8);
    }

    #[test]
    fn test_serialized_text_parses_back_to_same_model() {
        let codec = codec();
        let mut zone = codec.parse(SAMPLE).unwrap();
        zone.push(Record::new(
            Some("quote".to_string()),
            Some(120),
            RecordData::Txt { txt: r#"say "hi"; \o/ café"#.to_string() },
        ));
        zone.remove(RecordType::CNAME, 0);

        let text = codec.serialize(&zone).unwrap();
        assert_eq!(codec.parse(&text).unwrap(), zone);
    }

    #[test]
    fn test_every_line_has_explicit_owner_and_ttl() {
        let codec = codec();
        let mut zone = codec.parse(SAMPLE).unwrap();
        zone.push(Record::new(None, None, RecordData::Ns { host: "ns3".to_string() }));

        let text = codec.serialize(&zone).unwrap();
        for line in text.lines().filter(|l| !l.is_empty() && !l.starts_with(['$', ';'])) {
            assert!(!line.starts_with(char::is_whitespace), "blank owner in {line:?}");
            assert!(line.split('\t').nth(1).unwrap().parse::<u32>().is_ok());
        }
        assert!(text.contains("@\t3600\tIN\tNS\tns3\n"));
    }

    #[test]
    fn test_apex_record_after_other_owner_stays_at_apex() {
        let codec = codec();
        let mut zone = codec.parse(SAMPLE).unwrap();
        zone.push(Record::new(
            Some("sub".to_string()),
            None,
            RecordData::Ns { host: "ns.other.net.".to_string() },
        ));
        zone.push(Record::new(None, None, RecordData::Ns { host: "ns4".to_string() }));

        let parsed = codec.parse(&codec.serialize(&zone).unwrap()).unwrap();
        let ns = parsed.records(RecordType::NS);
        assert_eq!(ns[2].name.as_deref(), Some("sub"));
        assert_eq!(ns[3].name.as_deref(), Some("@"));
        assert_eq!(ns[3].data, RecordData::Ns { host: "ns4".to_string() });
    }

    #[test]
    fn test_apex_target_is_written_as_origin() {
        let codec = codec();
        let mut zone = codec.parse(SAMPLE).unwrap();
        zone.push(Record::new(
            Some("web".to_string()),
            None,
            RecordData::Cname { alias: "@".to_string() },
        ));

        let text = codec.serialize(&zone).unwrap();
        assert!(text.contains("web\t3600\tIN\tCNAME\tuser.example.com.\n"));
        assert_eq!(codec.parse(&text).unwrap(), zone);
    }

    #[test]
    fn test_zone_file_syntax_characters_are_escaped() {
        let codec = codec();
        let mut zone = codec.parse(SAMPLE).unwrap();
        zone.push(Record::new(
            Some("$www".to_string()),
            None,
            RecordData::Cname { alias: "a;b".to_string() },
        ));
        zone.push(Record::new(
            Some("w(w".to_string()),
            None,
            RecordData::A { ip: "9.9.9.9".to_string() },
        ));

        let text = codec.serialize(&zone).unwrap();
        assert!(text.contains("\\036www\t3600\tIN\tCNAME\ta\\059b\n"));
        assert!(text.contains("w\\040w\t"));

        let parsed = codec.parse(&text).unwrap();
        assert_eq!(parsed, zone);
        assert_eq!(
            parsed.records(RecordType::CNAME)[1].data,
            RecordData::Cname { alias: "a;b".to_string() }
        );
    }

    #[test]
    fn test_names_are_relative_to_apex() {
        let codec = codec();
        let zone = codec
            .parse(
                "$TTL 600\n\
                 @ IN SOA ns1 admin ( 1 2 3 4 5 )\n\
                 mail.user.example.com. IN A 1.2.3.4\n\
                 user.example.com. IN MX 5 mail.user.example.com.\n",
            )
            .unwrap();

        let soa = zone.soa.as_ref().unwrap();
        assert_eq!(soa.mname, "ns1");
        assert_eq!(soa.primary_label(), "ns1");
        assert_eq!(zone.records(RecordType::A)[0].name.as_deref(), Some("mail"));
        assert_eq!(zone.records(RecordType::MX)[0].name.as_deref(), Some("@"));
        assert_eq!(
            zone.records(RecordType::MX)[0].data,
            RecordData::Mx { preference: 5, host: "mail".to_string() }
        );
    }

    #[test]
    fn test_unsupported_type_is_named() {
        let err = codec()
            .parse("$TTL 300\nhost IN PTR target.\n")
            .unwrap_err();
        assert_eq!(err, CodecError::UnsupportedType("PTR".to_string()));
    }

    #[test]
    fn test_syntax_errors_come_from_the_scanner() {
        let err = codec()
            .parse("$TTL 300\n@ IN SOA ns1. admin. (\n 1 2 3 4 5\n")
            .unwrap_err();
        assert!(matches!(err, CodecError::Syntax(_)));

        let err = codec().parse("$BOGUS 1\n").unwrap_err();
        assert!(matches!(err, CodecError::Syntax(_)));
    }

    #[test]
    fn test_unwritable_values_are_reported() {
        let codec = codec();
        let mut zone = Zone::new();
        zone.push(Record::new(
            Some("www".to_string()),
            None,
            RecordData::A { ip: "1.2.3".to_string() },
        ));
        assert!(matches!(
            codec.serialize(&zone),
            Err(CodecError::Unrepresentable { .. })
        ));

        let mut zone = Zone::new();
        zone.push(Record::new(
            Some("_sip._tcp".to_string()),
            None,
            RecordData::Srv { value: "10 5 sip".to_string() },
        ));
        assert!(matches!(
            codec.serialize(&zone),
            Err(CodecError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_zone_without_soa_uses_configured_origin() {
        let codec = codec();
        let mut zone = Zone::new();
        zone.push(Record::new(
            Some("www".to_string()),
            None,
            RecordData::A { ip: "5.6.7.8".to_string() },
        ));

        let text = codec.serialize(&zone).unwrap();
        assert!(text.starts_with("$ORIGIN user.example.com.\n$TTL 3600\n"));

        let parsed = codec.parse(&text).unwrap();
        assert_eq!(parsed.origin.as_deref(), Some("user.example.com."));
        assert_eq!(parsed.ttl, Some(DEFAULT_TTL));
        assert_eq!(parsed.records(RecordType::A)[0].name.as_deref(), Some("www"));
    }

    #[test]
    fn test_escaped_label() {
        let name = Name::<Vec<u8>>::from_chars("a\\;b.x-y_z.".chars()).unwrap();
        let labels: Vec<String> = name.iter().map(escaped_label).collect();
        assert_eq!(labels, vec!["a\\059b", "x-y_z", ""]);
    }
}
