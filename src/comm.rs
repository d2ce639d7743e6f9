use std::collections::HashMap;
use std::sync::{Arc, Barrier, Mutex};

/// A worker group: the collective-communication abstraction the search tree
/// is distributed over. `rank`/`size` mirror an MPI communicator; `split`
/// partitions the group into sub-groups so different workers can search
/// different root moves cooperatively; the `all_reduce_*` pair is the only
/// place workers actually exchange data, combining each member's local best
/// `(score, move_bits)` into the group-wide best.
///
/// Every member of a group must call `split`/`all_reduce_*` in the same
/// order with the same arguments — the usual SPMD discipline for collective
/// operations. Because board state is fully replicated and move generation
/// is deterministic, every member computes the same `group_index` and move
/// partition on its own; no handshake is needed to agree on group membership,
/// only on the reduction itself.
pub trait Group: Send + Sync {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;

    /// Which of `num_groups` sub-groups this member belongs to, were `self`
    /// split into that many pieces.
    fn group_index(&self, num_groups: usize) -> usize;

    /// Partitions `self` into `num_groups` contiguous, near-equal-size
    /// sub-groups (remainder ranks land in the first few groups) and returns
    /// the one named by `group_index`. If `num_groups` exceeds `self.size()`,
    /// it is clamped to `self.size()` — each worker becomes its own
    /// single-member group and the caller is responsible for looping over
    /// whatever logical units it owns sequentially.
    fn split(&self, num_groups: usize, group_index: usize) -> Arc<dyn Group>;

    fn all_reduce_argmax(&self, value: (f64, i32)) -> (f64, i32);
    fn all_reduce_argmin(&self, value: (f64, i32)) -> (f64, i32);
}

/// A group of exactly one worker: every collective is a no-op identity.
/// This is both the base case `ThreadGroup::split` bottoms out at and the
/// whole world when the engine is configured to run single-threaded.
pub struct SerialGroup;

impl Group for SerialGroup {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn group_index(&self, _num_groups: usize) -> usize {
        0
    }

    fn split(&self, _num_groups: usize, _group_index: usize) -> Arc<dyn Group> {
        Arc::new(SerialGroup)
    }

    fn all_reduce_argmax(&self, value: (f64, i32)) -> (f64, i32) {
        value
    }

    fn all_reduce_argmin(&self, value: (f64, i32)) -> (f64, i32) {
        value
    }
}

/// Near-equal contiguous partition of `total` ranks into `num_groups` blocks;
/// the first `total % num_groups` blocks get one extra member. Returns
/// `(block_start, block_size)` for every block, in rank order.
fn partition(total: usize, num_groups: usize) -> Vec<(usize, usize)> {
    let num_groups = num_groups.max(1).min(total.max(1));
    let base = total / num_groups;
    let remainder = total % num_groups;
    let mut blocks = Vec::with_capacity(num_groups);
    let mut start = 0;
    for i in 0..num_groups {
        let size = base + usize::from(i < remainder);
        blocks.push((start, size));
        start += size;
    }
    blocks
}

fn block_containing(blocks: &[(usize, usize)], rank: usize) -> usize {
    blocks
        .iter()
        .position(|&(start, size)| rank >= start && rank < start + size)
        .expect("rank must fall in exactly one partition block")
}

/// Shared rendezvous point for one sub-group's collectives. A `Barrier` can
/// be waited on repeatedly, so one `ReduceState` serves every reduce call
/// ever made by that sub-group, not just the first.
pub struct ReduceState {
    barrier: Barrier,
    slots: Mutex<Vec<Option<(f64, i32)>>>,
}

impl ReduceState {
    fn new(size: usize) -> Self {
        ReduceState { barrier: Barrier::new(size), slots: Mutex::new(vec![None; size]) }
    }

    fn reduce(&self, rank: usize, value: (f64, i32), pick: impl Fn(&[(f64, i32)]) -> (f64, i32)) -> (f64, i32) {
        {
            let mut slots = self.slots.lock().unwrap();
            slots[rank] = Some(value);
        }
        self.barrier.wait();
        let snapshot: Vec<(f64, i32)> = {
            let slots = self.slots.lock().unwrap();
            slots.iter().map(|s| s.expect("every member must submit before reducing")).collect()
        };
        let result = pick(&snapshot);
        self.barrier.wait();
        result
    }
}

/// Identifies a sub-group by the full sequence of splits that produced it.
/// Two `split` calls made by different members of the same parent group
/// land on the same key if and only if they requested the same partition at
/// the same point in the (deterministic, replicated) search — which is
/// exactly when they ought to share a `ReduceState`.
type GroupPath = Vec<(usize, usize)>;

/// A persistent SPMD pool of OS threads realizing `Group` over plain
/// `std::sync` primitives. There is no real message-passing substrate in
/// this corpus to bind to, so the collective is built the way the rest of
/// the engine builds concurrency: threads, a shared registry behind a
/// `Mutex`, and `Barrier` for rendezvous.
pub struct ThreadGroup {
    rank: usize,
    size: usize,
    path: GroupPath,
    registry: Arc<Mutex<HashMap<(GroupPath, usize), Arc<ReduceState>>>>,
}

impl ThreadGroup {
    /// Builds the `size`-member world group for thread `rank`. Call once per
    /// spawned worker thread, sharing one registry across all of them.
    pub fn world_member(rank: usize, size: usize, registry: Arc<Mutex<HashMap<(GroupPath, usize), Arc<ReduceState>>>>) -> Self {
        ThreadGroup { rank, size, path: Vec::new(), registry }
    }

    /// A fresh, empty registry for a new world group of worker threads.
    pub fn new_registry() -> Arc<Mutex<HashMap<(GroupPath, usize), Arc<ReduceState>>>> {
        Arc::new(Mutex::new(HashMap::new()))
    }

    fn blocks(&self, num_groups: usize) -> Vec<(usize, usize)> {
        partition(self.size, num_groups)
    }

    fn reduce_state(&self, new_path: GroupPath, new_size: usize) -> Arc<ReduceState> {
        let mut registry = self.registry.lock().unwrap();
        registry
            .entry((new_path, new_size))
            .or_insert_with(|| Arc::new(ReduceState::new(new_size)))
            .clone()
    }
}

impl Group for ThreadGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn group_index(&self, num_groups: usize) -> usize {
        let blocks = self.blocks(num_groups);
        block_containing(&blocks, self.rank)
    }

    fn split(&self, num_groups: usize, group_index: usize) -> Arc<dyn Group> {
        let blocks = self.blocks(num_groups);
        let (start, size) = blocks[group_index];
        let new_rank = self.rank - start;

        if size == 1 {
            return Arc::new(SerialGroup);
        }

        let mut new_path = self.path.clone();
        new_path.push((blocks.len(), group_index));

        Arc::new(ThreadGroup {
            rank: new_rank,
            size,
            path: new_path,
            registry: self.registry.clone(),
        })
    }

    fn all_reduce_argmax(&self, value: (f64, i32)) -> (f64, i32) {
        let state = self.reduce_state(self.path.clone(), self.size);
        state.reduce(self.rank, value, |values| {
            values.iter().copied().fold(values[0], |best, cur| {
                if cur.0 > best.0 || (cur.0 == best.0 && cur.1 < best.1) { cur } else { best }
            })
        })
    }

    fn all_reduce_argmin(&self, value: (f64, i32)) -> (f64, i32) {
        let state = self.reduce_state(self.path.clone(), self.size);
        state.reduce(self.rank, value, |values| {
            values.iter().copied().fold(values[0], |best, cur| {
                if cur.0 < best.0 || (cur.0 == best.0 && cur.1 < best.1) { cur } else { best }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn serial_group_is_identity() {
        let group = SerialGroup;
        assert_eq!(group.all_reduce_argmax((3.5, 7)), (3.5, 7));
        assert_eq!(group.all_reduce_argmin((3.5, 7)), (3.5, 7));
        assert_eq!(group.group_index(4), 0);
    }

    #[test]
    fn partition_covers_every_rank_exactly_once() {
        for total in [1, 2, 3, 5, 8] {
            for num_groups in [1, 2, 3, 4] {
                let blocks = partition(total, num_groups);
                let covered: usize = blocks.iter().map(|&(_, size)| size).sum();
                assert_eq!(covered, total);
                for rank in 0..total {
                    block_containing(&blocks, rank); // panics if not covered
                }
            }
        }
    }

    #[test]
    fn thread_group_all_reduce_argmax_agrees_across_threads() {
        let registry = ThreadGroup::new_registry();
        let size = 4;
        let handles: Vec<_> = (0..size)
            .map(|rank| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let group = ThreadGroup::world_member(rank, size, registry);
                    group.all_reduce_argmax((rank as f64, rank as i32))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results {
            assert_eq!(*r, (3.0, 3));
        }
    }

    #[test]
    fn thread_group_split_cooperates_within_subgroup_only() {
        let registry = ThreadGroup::new_registry();
        let size = 4;
        let handles: Vec<_> = (0..size)
            .map(|rank| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let group = ThreadGroup::world_member(rank, size, registry);
                    let my_group = group.group_index(2);
                    let sub = group.split(2, my_group);
                    let reduced = sub.all_reduce_argmax((rank as f64, rank as i32));
                    (my_group, reduced)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (group_index, (score, _)) in results {
            let expected = if group_index == 0 { 1.0 } else { 3.0 };
            assert_eq!(score, expected);
        }
    }

    #[test]
    fn thread_group_reused_across_repeated_reduces() {
        let registry = ThreadGroup::new_registry();
        let size = 3;
        let handles: Vec<_> = (0..size)
            .map(|rank| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let group = ThreadGroup::world_member(rank, size, registry);
                    let first = group.all_reduce_argmax((rank as f64, rank as i32));
                    let second = group.all_reduce_argmin((rank as f64, rank as i32));
                    (first, second)
                })
            })
            .collect();

        for h in handles {
            let (first, second) = h.join().unwrap();
            assert_eq!(first, (2.0, 2));
            assert_eq!(second, (0.0, 0));
        }
    }
}
