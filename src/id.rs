//! Identifier generation and the drop-zone id conventions shared with the UI.
//!
//! Rows, columns and fields are addressed by opaque strings. The UI wires its
//! drop targets with a few derived ids as well:
//!
//! - `row-<rowId>` is the "insert into this row" target of a row, distinct from
//!   the id the row itself is dragged by.
//! - `available-fields` is the drop target of the available fields panel.
//! - `available-<index>` names the seed fields created at startup.

use chrono::Utc;
use rand::Rng;

/// Drop target id of the available fields panel.
pub const AVAILABLE_DROP_ZONE_ID: &str = "available-fields";

/// Prefix that turns a row id into the row's drop-zone id.
pub const ROW_DROP_ZONE_PREFIX: &str = "row-";

const SEED_PREFIX: &str = "available-";
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Source of fresh identifiers for rows, columns and re-minted fields.
///
/// The only requirement is uniqueness within a session; callers must not
/// parse the returned strings.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Default generator producing `id-<unix millis>-<random base36>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampIdGenerator;

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        format!("id-{}-{}", Utc::now().timestamp_millis(), suffix)
    }
}

/// Deterministic generator producing `id-1`, `id-2`, ...
///
/// Useful for tests and for hosts that want reproducible layouts.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `last`, e.g. to continue a previously built layout.
    pub fn starting_after(last: u64) -> Self {
        Self { next: last }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("id-{}", self.next)
    }
}

/// Id of the seed field at `index` in the initial available pool.
pub fn available_seed_id(index: usize) -> String {
    format!("{SEED_PREFIX}{index}")
}

/// Drop-zone id for the row with the given id.
pub fn row_drop_zone_id(row_id: &str) -> String {
    format!("{ROW_DROP_ZONE_PREFIX}{row_id}")
}

/// Strip the drop-zone prefix, returning the row id it refers to.
pub fn parse_row_drop_zone(id: &str) -> Option<&str> {
    id.strip_prefix(ROW_DROP_ZONE_PREFIX).filter(|rest| !rest.is_empty())
}
