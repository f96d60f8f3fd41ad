//! Bit-section packed flag words.
//!
//! Records keep several small fields (the pin count, both bytes of a 16-bit id, boolean
//! toggles) in one 32-bit word. A [`Section`] names a contiguous run of bits inside that word,
//! sized to hold values up to a declared maximum. Sections are allocated strictly in order: each
//! one starts at the first bit after the section it is derived from, so the layout of a record
//! kind is the chain of its section declarations, base first.
//!
//! ```rust
//! use bamlscope::baml::flags::{BitFlagsWord, Section};
//!
//! const PIN: Section = Section::first(3);
//! const LOW: Section = PIN.after(0xFF);
//! const HIGH: Section = LOW.after(0xFF);
//!
//! let mut word = BitFlagsWord::default();
//! word.set(LOW, 0x34);
//! word.set(HIGH, 0x12);
//! assert_eq!(LOW.offset(), 2);
//! assert_eq!(word.bits(), 0x12 << 10 | 0x34 << 2);
//! ```

/// A contiguous run of bits within a [`BitFlagsWord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Section {
    mask: u32,
    offset: u32,
}

const fn mask_for(max: u32) -> u32 {
    assert!(max > 0, "a flag section must hold at least the value 1");
    u32::MAX >> max.leading_zeros()
}

impl Section {
    /// The first section of a word, starting at bit 0.
    #[must_use]
    pub const fn first(max: u32) -> Section {
        Section {
            mask: mask_for(max),
            offset: 0,
        }
    }

    /// The section that immediately follows `self`, wide enough to hold `max`.
    ///
    /// # Panics
    /// Panics (at compile time when used in a `const`) if the word has no room left.
    #[must_use]
    pub const fn after(self, max: u32) -> Section {
        let mask = mask_for(max);
        let offset = self.offset + self.width();
        assert!(
            offset + (32 - mask.leading_zeros()) <= 32,
            "flag sections exceed 32 bits"
        );
        Section { mask, offset }
    }

    /// Mask of the section, not shifted to its offset.
    #[must_use]
    pub const fn mask(self) -> u32 {
        self.mask
    }

    /// Bit offset of the section within the word.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Number of bits the section occupies.
    #[must_use]
    pub const fn width(self) -> u32 {
        32 - self.mask.leading_zeros()
    }

    /// First bit offset after this section.
    #[must_use]
    pub const fn end(self) -> u32 {
        self.offset + self.width()
    }
}

/// Pin count of a record, shared by every record kind.
pub const PIN_SECTION: Section = Section::first(3);

/// A 32-bit word carved into [`Section`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BitFlagsWord(u32);

impl BitFlagsWord {
    /// Wrap raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        BitFlagsWord(bits)
    }

    /// The raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Value stored in `section`.
    #[must_use]
    pub const fn get(self, section: Section) -> u32 {
        (self.0 >> section.offset) & section.mask
    }

    /// Store `value` in `section`. Bits of `value` that do not fit the section are discarded.
    pub fn set(&mut self, section: Section, value: u32) {
        self.0 &= !(section.mask << section.offset);
        self.0 |= (value & section.mask) << section.offset;
    }

    /// `true` if the section holds a non-zero value.
    #[must_use]
    pub const fn get_bool(self, section: Section) -> bool {
        self.get(section) != 0
    }

    /// Store a boolean in `section`.
    pub fn set_bool(&mut self, section: Section, value: bool) {
        self.set(section, u32::from(value));
    }

    /// Reassemble a 16-bit id stored as a low byte and a high byte section.
    ///
    /// Known ids are negative, so the 16 bits are reinterpreted as `i16`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn get_split_id(self, low: Section, high: Section) -> i16 {
        (self.get(low) | (self.get(high) << 8)) as u16 as i16
    }

    /// Store a 16-bit id as a low byte and a high byte section.
    #[allow(clippy::cast_sign_loss)]
    pub fn set_split_id(&mut self, low: Section, high: Section, id: i16) {
        let raw = u32::from(id as u16);
        self.set(low, raw & 0xFF);
        self.set(high, raw >> 8);
    }

    /// The record pin count.
    #[must_use]
    pub const fn pin_count(self) -> u32 {
        self.get(PIN_SECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW: Section = PIN_SECTION.after(0xFF);
    const HIGH: Section = LOW.after(0xFF);
    const TOGGLE: Section = HIGH.after(1);
    const TAIL: Section = TOGGLE.after(1);

    #[test]
    fn sections_are_contiguous() {
        assert_eq!(PIN_SECTION.offset(), 0);
        assert_eq!(PIN_SECTION.width(), 2);
        assert_eq!(LOW.offset(), 2);
        assert_eq!(HIGH.offset(), 10);
        assert_eq!(TOGGLE.offset(), 18);
        assert_eq!(TAIL.offset(), 19);
        assert_eq!(TAIL.end(), 20);

        // non power of two maxima round up to the covering width
        assert_eq!(Section::first(5).width(), 3);
        assert_eq!(Section::first(8).width(), 4);
    }

    #[test]
    fn set_does_not_touch_neighbours() {
        let mut word = BitFlagsWord::default();
        word.set(PIN_SECTION, 3);
        word.set_bool(TOGGLE, true);
        word.set(LOW, 0x1FF);

        assert_eq!(word.get(PIN_SECTION), 3);
        assert_eq!(word.get(LOW), 0xFF);
        assert_eq!(word.get(HIGH), 0);
        assert!(word.get_bool(TOGGLE));
        assert!(!word.get_bool(TAIL));

        word.set(LOW, 0);
        assert_eq!(word.bits(), 3 | 1 << 18);
    }

    #[test]
    fn split_ids_keep_sign() {
        for id in [0_i16, 1, 0x7F, 0x80, 0x1234, i16::MAX, -1, -2, -759, i16::MIN] {
            let mut word = BitFlagsWord::default();
            word.set(PIN_SECTION, 2);
            word.set_split_id(LOW, HIGH, id);
            assert_eq!(word.get_split_id(LOW, HIGH), id);
            assert_eq!(word.pin_count(), 2);
        }
    }
}
