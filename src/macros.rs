#![allow(unused_macros)]

/// Helper macro for locking items, mapping a poisoned lock to [`crate::Error::LockError`]
///
/// ```rust, ignore
///  let mut state = lock!(self.shared.state)?;
///  state.write_watermark += 42;
/// ```
macro_rules! lock {
    ($lock:expr) => {
        $lock.lock().map_err(|_| crate::Error::LockError)
    };
}

/// Helper macro for reading the value of a locked item through a closure
///
/// ```rust, ignore
///  let written = with_lock!(self.shared.state, |state| state.write_watermark)?;
/// ```
macro_rules! with_lock {
    ($lock:expr, $closure:expr) => {{
        match $lock.lock() {
            Ok(guard) => Ok($closure(&*guard)),
            Err(_) => Err(crate::Error::LockError),
        }
    }};
}

/// Declares the bit-flag sections of a record kind in base-to-derived order.
///
/// Every section starts right after the previous one, which reproduces the layout the
/// original record hierarchy derived from chained `LastFlagsSection` values.
///
/// ```rust, ignore
/// flag_sections! {
///     after PIN_SECTION;
///     TYPE_ID_LOW = 0xFF;
///     TYPE_ID_HIGH = 0xFF;
/// }
/// ```
macro_rules! flag_sections {
    (after $base:expr; $first:ident = $first_max:expr; $($name:ident = $max:expr;)*) => {
        pub(crate) const $first: crate::baml::flags::Section = $base.after($first_max);
        flag_sections!(@chain $first; $($name = $max;)*);
    };
    (@chain $prev:ident; $name:ident = $max:expr; $($rest:ident = $rest_max:expr;)*) => {
        pub(crate) const $name: crate::baml::flags::Section = $prev.after($max);
        flag_sections!(@chain $name; $($rest = $rest_max;)*);
    };
    (@chain $prev:ident;) => {};
}
