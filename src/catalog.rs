//! Built-in diagram catalog.
//!
//! Sequence and state diagrams documenting the CPU pipeline's fetch, decode,
//! execute and memory-access timing. Sources live in `diagrams/*.mmd` and are
//! compiled into the binary.

use crate::config::DiagramEntry;

/// `(name, source)` pairs in render order.
const BUILTIN: &[(&str, &str)] = &[
    (
        "01_lw_main_timing",
        include_str!("../diagrams/01_lw_main_timing.mmd"),
    ),
    (
        "02_icache_miss_timing",
        include_str!("../diagrams/02_icache_miss_timing.mmd"),
    ),
    (
        "03_exu_state_machine",
        include_str!("../diagrams/03_exu_state_machine.mmd"),
    ),
    (
        "04_icache_state_machine",
        include_str!("../diagrams/04_icache_state_machine.mmd"),
    ),
    (
        "05_ifu_state_machine",
        include_str!("../diagrams/05_ifu_state_machine.mmd"),
    ),
    (
        "06_arbiter_state_machine",
        include_str!("../diagrams/06_arbiter_state_machine.mmd"),
    ),
    (
        "07_axi_read_timing",
        include_str!("../diagrams/07_axi_read_timing.mmd"),
    ),
    (
        "icache_miss_detailed",
        include_str!("../diagrams/icache_miss_detailed.mmd"),
    ),
];

/// The built-in entries, in render order.
pub fn builtin_entries() -> Vec<DiagramEntry> {
    BUILTIN
        .iter()
        .map(|(name, source)| DiagramEntry::new(*name, *source))
        .collect()
}
