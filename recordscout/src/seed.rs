//! Deterministic synthetic records used to populate a fresh store.

use crate::record::Record;

/// Number of records seeded when nothing else is configured
pub const DEFAULT_SEED_COUNT: usize = 100;

const FIRST_NAMES: [&str; 10] = [
    "Juan", "María", "Carlos", "Ana", "Luis", "Lucía", "Jorge", "Elena", "Pedro", "Sofía",
];

const SURNAMES: [&str; 10] = [
    "García",
    "López",
    "Martínez",
    "Rodríguez",
    "Fernández",
    "González",
    "Pérez",
    "Sánchez",
    "Ramírez",
    "Torres",
];

/// Generates `count` records with ids `1..=count`.
///
/// The same count always yields the same records. Names cycle through the
/// first-name table fastest, then the surname table.
pub fn seed_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let id = i as u64 + 1;
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let surname = SURNAMES[(i / FIRST_NAMES.len()) % SURNAMES.len()];
            Record::new(
                id,
                format!("{} {}", first, surname),
                format!("user{}@example.com", id),
            )
        })
        .collect()
}
