//! Greedy seed-only linkage.

use indicatif::ProgressBar;

/// Partition `0..len` with a greedy, seed-only scan.
///
/// Items are visited in order. Each item not yet assigned becomes the seed of
/// a new cluster, and every later unassigned item `j` with `linked(seed, j)`
/// joins it. Candidates are compared with the seed only, never with each
/// other, so two members of one cluster need not be linked and a member
/// linked to a non-seed can land elsewhere. The result is not a transitive
/// closure, and callers rely on that.
///
/// Returns 1-based cluster IDs in seed order, one per item.
pub fn seed_link<F>(len: usize, linked: F) -> Vec<u32>
where
    F: FnMut(usize, usize) -> bool,
{
    seed_link_with_progress(len, linked, None)
}

/// [`seed_link`] that ticks `progress` once per seed.
pub fn seed_link_with_progress<F>(len: usize, mut linked: F, progress: Option<&ProgressBar>) -> Vec<u32>
where
    F: FnMut(usize, usize) -> bool,
{
    let mut ids = vec![0_u32; len];
    let mut assigned = vec![false; len];
    let mut next_id = 0_u32;

    for seed in 0..len {
        if assigned[seed] {
            continue;
        }
        next_id += 1;
        ids[seed] = next_id;
        assigned[seed] = true;
        let mut joined = 1_u64;

        for candidate in seed + 1..len {
            if !assigned[candidate] && linked(seed, candidate) {
                ids[candidate] = next_id;
                assigned[candidate] = true;
                joined += 1;
            }
        }

        if let Some(pb) = progress {
            pb.inc(joined);
        }
    }

    ids
}
