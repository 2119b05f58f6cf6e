use super::cached_record::{now_millis, CachedAnswer, CachedRecord, RecordPayload};
use super::{RecordData, RecordType};
use serde::{Deserialize, Serialize};

/// Up to one [`CachedRecord`] per cacheable type for a single name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    a: Option<CachedRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aaaa: Option<CachedRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ns: Option<CachedRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ptr: Option<CachedRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, record_type: RecordType) -> Option<&CachedRecord> {
        match record_type {
            RecordType::A => self.a.as_ref(),
            RecordType::AAAA => self.aaaa.as_ref(),
            RecordType::NS => self.ns.as_ref(),
            RecordType::PTR => self.ptr.as_ref(),
        }
    }

    fn slot_mut(&mut self, record_type: RecordType) -> &mut Option<CachedRecord> {
        match record_type {
            RecordType::A => &mut self.a,
            RecordType::AAAA => &mut self.aaaa,
            RecordType::NS => &mut self.ns,
            RecordType::PTR => &mut self.ptr,
        }
    }

    /// Applies one learned record.
    ///
    /// A, AAAA and NS: the slot is created with `ttl` if absent, then the
    /// value is appended (a freshly created slot included). PTR: the slot is
    /// only created if absent; an existing PTR, expired or not, wins and the
    /// incoming target is dropped.
    pub fn learn_at(&mut self, ttl: u32, data: &RecordData, now_ms: u64) {
        let slot = self.slot_mut(data.record_type());

        if let RecordData::Ptr(_) = data {
            if slot.is_none() {
                *slot = Some(CachedRecord::new_at(
                    ttl,
                    RecordPayload::seeded_from(data),
                    now_ms,
                ));
            }
            return;
        }

        let record = slot.get_or_insert_with(|| {
            CachedRecord::new_at(ttl, RecordPayload::seeded_from(data), now_ms)
        });
        record.payload_mut().append(data);
    }

    pub fn learn(&mut self, ttl: u32, data: &RecordData) {
        self.learn_at(ttl, data, now_millis());
    }

    /// Clears every slot whose record has expired. Returns how many slots
    /// were cleared.
    pub fn delete_expired_records_at(&mut self, now_ms: u64) -> usize {
        let mut removed = 0;
        for record_type in RecordType::ALL {
            let slot = self.slot_mut(record_type);
            if slot.as_ref().is_some_and(|r| r.is_expired_at(now_ms)) {
                *slot = None;
                removed += 1;
            }
        }
        removed
    }

    pub fn delete_expired_records(&mut self) -> usize {
        self.delete_expired_records_at(now_millis())
    }

    /// Lazy read path: purge expired slots, then answer from the requested
    /// slot if it survived.
    pub fn answer_at(&mut self, record_type: RecordType, now_ms: u64) -> Option<CachedAnswer> {
        self.delete_expired_records_at(now_ms);
        self.slot(record_type).map(|record| record.answer_at(now_ms))
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_none() && self.aaaa.is_none() && self.ns.is_none() && self.ptr.is_none()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        [&self.a, &self.aaaa, &self.ns, &self.ptr]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}
