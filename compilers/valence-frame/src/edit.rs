//! Edits of a signature to sentence mapping.
//!
//! Each edit rewrites every signature and builds a fresh mapping. When two
//! old signatures rewrite to the same new one their buckets are merged;
//! with `simply_delete` a signature that changed at all is dropped instead.

use std::collections::BTreeMap;
use valence_protocol::{ComplementClass, SentenceId, Signature};

pub type SignatureMap = BTreeMap<Signature, Vec<SentenceId>>;

/// Whether a class filter retains or removes the listed classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassFilter {
    Keep,
    Drop,
}

/// Keeps or removes `classes` from every signature.
pub fn filter_classes(
    old: &SignatureMap,
    classes: &[ComplementClass],
    filter: ClassFilter,
    simply_delete: bool,
) -> SignatureMap {
    rewrite(old, simply_delete, |signature| filtered_signature(signature, classes, filter))
}

/// Caps runs of equal classes in every signature at `max` occurrences.
pub fn cap_multiplicity(old: &SignatureMap, max: usize, simply_delete: bool) -> SignatureMap {
    rewrite(old, simply_delete, |signature| capped_signature(signature, max))
}

pub fn filtered_signature(signature: &Signature, classes: &[ComplementClass], filter: ClassFilter) -> Signature {
    signature
        .iter()
        .copied()
        .filter(|class| classes.contains(class) == (filter == ClassFilter::Keep))
        .collect()
}

pub fn capped_signature(signature: &Signature, max: usize) -> Signature {
    let mut out: Vec<ComplementClass> = Vec::with_capacity(signature.len());
    let mut run = 0;
    for &class in signature {
        run = match out.last() {
            Some(&previous) if previous == class => run + 1,
            _ => 1,
        };
        if run <= max {
            out.push(class);
        }
    }
    Signature::new(out)
}

fn rewrite<F>(old: &SignatureMap, simply_delete: bool, edit: F) -> SignatureMap
where
    F: Fn(&Signature) -> Signature,
{
    let mut new = SignatureMap::new();
    for old_key in old.keys() {
        let new_key = edit(old_key);
        if simply_delete && new_key != *old_key {
            continue;
        }
        merge_bucket(old_key, new_key, old, &mut new);
    }
    new
}

/// Moves the bucket of `old_key` to `new_key` in `new`.
///
/// A rewritten signature that also existed before takes that signature's old
/// bucket along. Landing on an occupied key unions the buckets, sorted and
/// without duplicates; a fresh key takes the bucket unchanged.
pub fn merge_bucket(old_key: &Signature, new_key: Signature, old: &SignatureMap, new: &mut SignatureMap) {
    let moved = old.get(old_key).map(Vec::as_slice).unwrap_or_default();
    let bucket: Vec<SentenceId> = match old.get(&new_key) {
        Some(existing) if new_key != *old_key => existing.iter().chain(moved).copied().collect(),
        _ => moved.to_vec(),
    };

    match new.get_mut(&new_key) {
        Some(present) => {
            present.extend(bucket);
            present.sort();
            present.dedup();
        }
        None => {
            new.insert(new_key, bucket);
        }
    }
}
