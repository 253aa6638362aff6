//! Formal invariants for object table verification
//!
//! Runtime-checkable properties of an `IdAllocator`. They are used for:
//! 1. Runtime assertion checking in tests and debug builds
//! 2. Formal verification with Kani
//!
//! # Invariants
//!
//! 1. **Slot Bound**: A table never has more slots than an id can index
//! 2. **Live Generation**: Every non-free slot carries a generation in 1..=MAX_GENERATION
//! 3. **Unique Names**: No two non-free slots share a name
//! 4. **Handle Presence**: A slot holds a native handle iff it is valid or being deleted
//! 5. **Usage Count**: The in-use counter equals the number of non-free slots

use alloc::string::String;
use alloc::vec::Vec;

use crate::allocator::{IdAllocator, SlotState};
use crate::types::{MAX_GENERATION, MAX_SLOTS};

/// An invariant violation with details
#[derive(Clone, Debug)]
pub struct InvariantViolation {
    /// Name of the violated invariant
    pub invariant: &'static str,
    /// Description of what went wrong
    pub description: String,
}

/// Check all invariants of one category table.
///
/// Returns a list of violations (empty if all invariants hold).
pub fn check_allocator_invariants<H>(table: &IdAllocator<H>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    violations.extend(check_slot_bound(table));
    violations.extend(check_live_generation(table));
    violations.extend(check_unique_names(table));
    violations.extend(check_handle_presence(table));
    violations.extend(check_usage_count(table));

    violations
}

/// Invariant 1: Slot count fits the index field
fn check_slot_bound<H>(table: &IdAllocator<H>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    if table.slots.len() > MAX_SLOTS {
        violations.push(InvariantViolation {
            invariant: "slot_bound",
            description: alloc::format!(
                "{} table has {} slots, limit is {}",
                table.category,
                table.slots.len(),
                MAX_SLOTS
            ),
        });
    }
    violations
}

/// Invariant 2: Issued generations are never 0
fn check_live_generation<H>(table: &IdAllocator<H>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for (index, slot) in table.slots.iter().enumerate() {
        if slot.state == SlotState::Free {
            continue;
        }
        if slot.generation == 0 || slot.generation > MAX_GENERATION {
            violations.push(InvariantViolation {
                invariant: "live_generation",
                description: alloc::format!(
                    "{} slot {} is {:?} with generation {}",
                    table.category,
                    index,
                    slot.state,
                    slot.generation
                ),
            });
        }
    }
    violations
}

/// Invariant 3: Names are unique among non-free slots
fn check_unique_names<H>(table: &IdAllocator<H>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for (i, a) in table.slots.iter().enumerate() {
        if a.state == SlotState::Free {
            continue;
        }
        for (j, b) in table.slots.iter().enumerate().skip(i + 1) {
            if b.state != SlotState::Free && a.name == b.name {
                violations.push(InvariantViolation {
                    invariant: "unique_names",
                    description: alloc::format!(
                        "{} slots {} and {} are both named '{}'",
                        table.category,
                        i,
                        j,
                        a.name
                    ),
                });
            }
        }
    }
    violations
}

/// Invariant 4: Native handle is present exactly for valid and deleting slots
fn check_handle_presence<H>(table: &IdAllocator<H>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for (index, slot) in table.slots.iter().enumerate() {
        let wants_handle = matches!(slot.state, SlotState::Valid | SlotState::Deleting);
        if wants_handle != slot.handle.is_some() {
            violations.push(InvariantViolation {
                invariant: "handle_presence",
                description: alloc::format!(
                    "{} slot {} is {:?} but handle present = {}",
                    table.category,
                    index,
                    slot.state,
                    slot.handle.is_some()
                ),
            });
        }
    }
    violations
}

/// Invariant 5: in_use tracks the non-free slots
fn check_usage_count<H>(table: &IdAllocator<H>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let actual = table
        .slots
        .iter()
        .filter(|s| s.state != SlotState::Free)
        .count();
    if actual != table.in_use {
        violations.push(InvariantViolation {
            invariant: "usage_count",
            description: alloc::format!(
                "{} table counts {} in use, found {}",
                table.category,
                table.in_use,
                actual
            ),
        });
    }
    violations
}

/// Assert all invariants hold (panic if not)
pub fn assert_invariants<H>(table: &IdAllocator<H>) {
    let violations = check_allocator_invariants(table);
    if let Some(v) = violations.first() {
        panic!("Invariant violated: {} ({})", v.invariant, v.description);
    }
}

// ============================================================================
// Kani proofs for invariants
// ============================================================================

#[cfg(kani)]
mod proofs {
    use super::*;
    use crate::types::{ObjectCategory, ObjectId};

    /// Proof: a create/delete cycle keeps the table consistent
    #[kani::proof]
    #[kani::unwind(4)]
    fn create_delete_maintains_invariants() {
        let mut table: IdAllocator<u8> = IdAllocator::new(ObjectCategory::Mutex, 2);
        let handle: u8 = kani::any();

        let id = match table.allocate("m", ObjectId::UNDEFINED) {
            Ok(id) => id,
            Err(_) => return,
        };
        kani::assert(
            check_allocator_invariants(&table).is_empty(),
            "Reserving a slot should maintain invariants",
        );

        let _ = table.publish(id, handle);
        let _ = table.begin_delete(id);
        let _ = table.release(id);
        kani::assert(
            check_allocator_invariants(&table).is_empty(),
            "Deleting an object should maintain invariants",
        );
    }

    /// Proof: a released id never validates again
    #[kani::proof]
    #[kani::unwind(4)]
    fn released_id_is_stale() {
        let mut table: IdAllocator<u8> = IdAllocator::new(ObjectCategory::Queue, 1);
        let first = match table.allocate("q", ObjectId::UNDEFINED) {
            Ok(id) => id,
            Err(_) => return,
        };
        let _ = table.release(first);
        if let Ok(second) = table.allocate("q", ObjectId::UNDEFINED) {
            let _ = table.publish(second, 1);
            kani::assert(!table.is_valid(first), "Old id must not validate");
        }
    }
}
