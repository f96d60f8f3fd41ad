//! Record instance reuse caches.
//!
//! Reading and writing touch the same few record kinds over and over, so both directions keep
//! one instance per [`RecordType`] around instead of allocating a fresh record every time.
//!
//! - [`RecordCache`] backs the read path. A record handed out by [`RecordCache::acquire`] is
//!   owned by the caller; giving it back with [`RecordCache::release`] makes it available for
//!   the next record of that kind, unless it is pinned. Pinned records stay with the caller.
//! - [`WriteCache`] backs the write path. Each kind can be checked out at most once at a time,
//!   so a second checkout before the matching release is a protocol violation.
//!
//! # Examples
//!
//! ```rust
//! use bamlscope::baml::{cache::RecordCache, records::RecordType};
//!
//! let mut cache = RecordCache::new();
//! let mut record = cache.acquire(RecordType::Text)?;
//! record.pin()?;
//! assert_eq!(record.pin_count(), 1);
//!
//! // pinned records are not recycled
//! assert!(!cache.release(record));
//! # Ok::<(), bamlscope::Error>(())
//! ```

use strum::EnumCount;

use crate::{
    baml::{
        flags::PIN_SECTION,
        records::{clone_record, Record, RecordType},
    },
    Result,
};

impl Record {
    /// Adds a pin, keeping the record out of the read cache.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidOperation`] if the record already carries the maximum
    /// number of pins.
    pub fn pin(&mut self) -> Result<()> {
        let count = self.pin_count();
        if count >= PIN_SECTION.mask() {
            return Err(invalid_operation!(
                "{} record is already pinned {} times",
                self.record_type(),
                count
            ));
        }

        self.set_pin_count(count + 1);
        Ok(())
    }

    /// Removes a pin.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidOperation`] if the record is not pinned.
    pub fn unpin(&mut self) -> Result<()> {
        let count = self.pin_count();
        if count == 0 {
            return Err(invalid_operation!(
                "{} record is not pinned",
                self.record_type()
            ));
        }

        self.set_pin_count(count - 1);
        Ok(())
    }

    /// `true` while at least one pin is outstanding.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pin_count() > 0
    }
}

/// Read-side reuse cache with one slot per record tag.
#[derive(Debug)]
pub struct RecordCache {
    slots: Vec<Option<Record>>,
}

impl RecordCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        RecordCache {
            slots: vec![None; RecordType::COUNT],
        }
    }

    /// Hands out the cached instance of `record_type`, or a new one if the slot is empty.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] for legacy kinds.
    pub fn acquire(&mut self, record_type: RecordType) -> Result<Record> {
        match self.slots[usize::from(record_type.tag())].take() {
            Some(record) => Ok(record),
            None => Record::empty(record_type),
        }
    }

    /// Returns a record to its slot. Pinned records are not recycled; `false` is returned for
    /// them and the record is dropped from the cache's point of view.
    pub fn release(&mut self, record: Record) -> bool {
        if record.is_pinned() {
            log::warn!(
                "Not recycling {} record with {} outstanding pins",
                record.record_type(),
                record.pin_count()
            );
            return false;
        }

        let slot = usize::from(record.record_type().tag());
        self.slots[slot] = Some(record);
        true
    }

    /// Copies a pinned record into a fresh, unpinned instance so the original can be released.
    #[must_use]
    pub fn detach(&self, record: &Record) -> Record {
        clone_record(record)
    }

    /// Number of kinds with an instance ready for reuse.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Write-side cache; every kind is either available or checked out.
#[derive(Debug)]
pub struct WriteCache {
    slots: Vec<Option<Record>>,
    checked_out: u64,
}

impl WriteCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        WriteCache {
            slots: vec![None; RecordType::COUNT],
            checked_out: 0,
        }
    }

    /// Checks out the instance of `record_type`.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] if the kind is already checked out
    /// - [`crate::Error::NotSupported`] for legacy kinds
    pub fn checkout(&mut self, record_type: RecordType) -> Result<Record> {
        let bit = 1_u64 << record_type.tag();
        if self.checked_out & bit != 0 {
            return Err(invalid_operation!(
                "{} record is already checked out of the write cache",
                record_type
            ));
        }

        let record = match self.slots[usize::from(record_type.tag())].take() {
            Some(record) => record,
            None => Record::empty(record_type)?,
        };
        self.checked_out |= bit;
        Ok(record)
    }

    /// Returns a checked out record.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidOperation`] if the kind was not checked out.
    pub fn release(&mut self, mut record: Record) -> Result<()> {
        let record_type = record.record_type();
        let bit = 1_u64 << record_type.tag();
        if self.checked_out & bit == 0 {
            return Err(invalid_operation!(
                "{} record was not checked out of the write cache",
                record_type
            ));
        }

        record.set_pin_count(0);
        self.checked_out &= !bit;
        self.slots[usize::from(record_type.tag())] = Some(record);
        Ok(())
    }

    /// `true` if `record_type` is currently checked out.
    #[must_use]
    pub fn is_checked_out(&self, record_type: RecordType) -> bool {
        self.checked_out & (1_u64 << record_type.tag()) != 0
    }
}

impl Default for WriteCache {
    fn default() -> Self {
        Self::new()
    }
}
