use super::zone::{Record, RecordData, Soa};

/// Whether `record` may be removed without breaking the zone's own
/// delegation.
///
/// Two records are protected: the apex NS record naming the primary
/// nameserver, and the A record (glue) for that nameserver. The primary is
/// the first label of the SOA `mname`. Without an SOA nothing is protected.
///
/// Derived from the record and SOA as they are right now; callers must not
/// cache the answer across renders.
pub fn is_deletable(record: &Record, soa: Option<&Soa>) -> bool {
    let Some(soa) = soa else {
        return true;
    };
    let primary = soa.primary_label();

    match &record.data {
        RecordData::Ns { host } => !(record.is_apex() && host == primary),
        RecordData::A { .. } => record.name.as_deref() != Some(primary),
        _ => true,
    }
}
