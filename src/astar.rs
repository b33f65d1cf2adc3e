//! This module implements A* in the shape of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! with two differences: ties between equal estimates are broken by insertion order, and what
//! happens to a node improved while it is still on the frontier is chosen by a
//! [FrontierPolicy].
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::ControlFlow;

use crate::error::{Error, Result};
use crate::trace::SearchObserver;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

/// Treatment of a node whose cost improves while it is still waiting on the frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrontierPolicy {
    /// The node keeps the entry it was queued with; only its recorded scores change. It is
    /// therefore popped at its old, larger estimate, and the goal can be reached through a
    /// longer path first. Returned costs are valid path lengths but not always minimal.
    #[default]
    KeepEntry,
    /// A fresh entry with the improved estimate is queued and outdated entries are dropped
    /// when popped. With an admissible heuristic the returned cost is minimal.
    Reprioritize,
}

/// Best known bookkeeping for a discovered node.
#[derive(Clone, Copy, Debug)]
struct NodeRecord<C> {
    parent: usize,
    g_score: C,
    f_score: C,
    open: bool,
}

struct FrontierEntry<C> {
    f_score: C,
    sequence: u64,
    index: usize,
}

impl<C: PartialEq> Eq for FrontierEntry<C> {}

impl<C: PartialEq> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score.eq(&other.f_score) && self.sequence == other.sequence
    }
}

impl<C: Ord> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: smallest estimate first, then earliest insertion
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Outcome of a completed search: the path from start to goal (both included) with its
/// cost, if one exists, and the number of nodes expanded on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AstarRun<N, C> {
    pub solution: Option<(Vec<N>, C)>,
    pub expanded: usize,
}

/// Per-invocation search state. Node records live in an insertion-ordered map so that the
/// frontier and parent links can refer to nodes by index.
pub(crate) struct SearchState<N, C> {
    frontier: BinaryHeap<FrontierEntry<C>>,
    nodes: FxIndexMap<N, NodeRecord<C>>,
    sequence: u64,
    expanded: usize,
    policy: FrontierPolicy,
}

impl<N, C> SearchState<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub(crate) fn new(policy: FrontierPolicy) -> SearchState<N, C> {
        SearchState {
            frontier: BinaryHeap::new(),
            nodes: FxIndexMap::default(),
            sequence: 0,
            expanded: 0,
            policy,
        }
    }

    fn push(&mut self, index: usize, f_score: C) {
        self.frontier.push(FrontierEntry {
            f_score,
            sequence: self.sequence,
            index,
        });
        self.nodes[index].open = true;
    }

    fn reprioritizes(&self) -> bool {
        self.policy == FrontierPolicy::Reprioritize
    }

    fn node(&self, index: usize) -> &N {
        // Indices only ever come from insertions into `nodes`
        self.nodes
            .get_index(index)
            .map(|(node, _)| node)
            .unwrap_or_else(|| unreachable!("stale node index {}", index))
    }

    /// Follows parent links from `goal` back to the start, yielding the path in start to
    /// goal order.
    fn reverse_path(&self, goal: usize) -> Vec<N> {
        let mut path: Vec<N> = std::iter::successors(Some(goal), |&ix| {
            let parent = self.nodes[ix].parent;
            (parent != NO_PARENT).then_some(parent)
        })
        .map(|ix| self.node(ix).clone())
        .collect();
        path.reverse();
        path
    }

    pub(crate) fn run<FN, IN, FH, FS, O>(
        mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
        observer: &mut O,
    ) -> Result<AstarRun<N, C>>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
        O: SearchObserver<N> + ?Sized,
    {
        let h = heuristic(start);
        self.nodes.insert(
            start.clone(),
            NodeRecord {
                parent: NO_PARENT,
                g_score: Zero::zero(),
                f_score: h,
                open: false,
            },
        );
        self.push(0, h);

        while let Some(FrontierEntry { f_score, index, .. }) = self.frontier.pop() {
            let record = self.nodes[index];
            // Superseded by a later entry for the same node
            if !record.open || (self.reprioritizes() && f_score != record.f_score) {
                continue;
            }
            self.nodes[index].open = false;
            let current = self.node(index).clone();
            if success(&current) {
                let cost = self.nodes[index].g_score;
                let path = self.reverse_path(index);
                if path.len() > 2 {
                    for node in path[1..path.len() - 1].iter().rev() {
                        observer.on_path(node);
                    }
                }
                return Ok(AstarRun {
                    solution: Some((path, cost)),
                    expanded: self.expanded,
                });
            }

            let g_current = self.nodes[index].g_score;
            for (successor, move_cost) in successors(&current) {
                let tentative_g = g_current + move_cost;
                let h; // heuristic(&successor)
                let n; // index for successor
                match self.nodes.entry(successor) {
                    Vacant(e) => {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert(NodeRecord {
                            parent: index,
                            g_score: tentative_g,
                            f_score: tentative_g + h,
                            open: false,
                        });
                    }
                    Occupied(mut e) => {
                        if tentative_g < e.get().g_score {
                            h = heuristic(e.key());
                            n = e.index();
                            let record = e.get_mut();
                            record.parent = index;
                            record.g_score = tentative_g;
                            record.f_score = tentative_g + h;
                        } else {
                            continue;
                        }
                    }
                }
                let was_open = self.nodes[n].open;
                if !was_open || self.reprioritizes() {
                    self.sequence += 1;
                    let f = self.nodes[n].f_score;
                    self.push(n, f);
                }
                if !was_open {
                    observer.on_open(self.node(n));
                }
            }

            self.expanded += 1;
            if let ControlFlow::Break(()) = observer.on_expand(&current) {
                return Err(Error::Interrupted {
                    expanded: self.expanded,
                });
            }
            if index != 0 {
                observer.on_close(&current);
            }
        }
        Ok(AstarRun {
            solution: None,
            expanded: self.expanded,
        })
    }
}

/// Runs A* from `start` until `success` accepts a popped node or the frontier is exhausted,
/// using [FrontierPolicy::KeepEntry]. `successors` yields neighbours with their move cost.
pub fn astar<N, C, FN, IN, FH, FS, O>(
    start: &N,
    successors: FN,
    heuristic: FH,
    success: FS,
    observer: &mut O,
) -> Result<AstarRun<N, C>>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
    O: SearchObserver<N> + ?Sized,
{
    astar_with_policy(
        start,
        successors,
        heuristic,
        success,
        observer,
        FrontierPolicy::default(),
    )
}

/// Like [astar] with an explicit [FrontierPolicy]. Under [FrontierPolicy::Reprioritize]
/// the returned cost is optimal as long as `heuristic` never overestimates.
pub fn astar_with_policy<N, C, FN, IN, FH, FS, O>(
    start: &N,
    successors: FN,
    heuristic: FH,
    success: FS,
    observer: &mut O,
    policy: FrontierPolicy,
) -> Result<AstarRun<N, C>>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
    O: SearchObserver<N> + ?Sized,
{
    SearchState::new(policy).run(start, successors, heuristic, success, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Mark, SearchTrace};

    fn line_successors(n: &i32) -> Vec<(i32, u32)> {
        [n - 1, n + 1]
            .into_iter()
            .filter(|x| (0..10).contains(x))
            .map(|x| (x, 1))
            .collect()
    }

    #[test]
    fn finds_path_on_a_line() {
        let run = astar(
            &2,
            line_successors,
            |n: &i32| n.abs_diff(7),
            |n| *n == 7,
            &mut (),
        )
        .unwrap();
        assert_eq!(run.solution, Some((vec![2, 3, 4, 5, 6, 7], 5)));
        // Guided straight at the goal
        assert_eq!(run.expanded, 5);
    }

    #[test]
    fn exhausts_when_goal_missing() {
        let run = astar(&0, line_successors, |_| 0u32, |n| *n == 42, &mut ()).unwrap();
        assert!(run.solution.is_none());
        assert_eq!(run.expanded, 10);
    }

    #[test]
    fn start_is_goal() {
        let mut trace = SearchTrace::default();
        let run = astar(&3, line_successors, |_| 0u32, |n| *n == 3, &mut trace).unwrap();
        assert_eq!(run.solution, Some((vec![3], 0)));
        assert_eq!(run.expanded, 0);
        assert!(trace.events().is_empty());
    }

    #[test]
    fn equal_estimates_expand_in_insertion_order() {
        // Zero heuristic with unit costs: every node at depth 1 ties on f = 1
        let successors = |n: &u8| -> Vec<(u8, u32)> {
            match n {
                0 => vec![(10, 1), (20, 1), (30, 1)],
                _ => vec![],
            }
        };
        let mut recorder = ExpandOrder(Vec::new());
        let run = astar(&0u8, successors, |_| 0, |_| false, &mut recorder).unwrap();
        assert!(run.solution.is_none());
        assert_eq!(recorder.0, vec![0, 10, 20, 30]);
    }

    struct ExpandOrder(Vec<u8>);

    impl SearchObserver<u8> for ExpandOrder {
        fn on_expand(&mut self, node: &u8) -> ControlFlow<()> {
            self.0.push(*node);
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn improved_open_node_keeps_frontier_entry() {
        // 0 -> 1 (cost 5), 0 -> 2 (cost 1), 2 -> 1 (cost 1), 1 -> 3 (cost 1)
        let successors = |n: &u8| -> Vec<(u8, u32)> {
            match n {
                0 => vec![(1, 5), (2, 1)],
                2 => vec![(1, 1)],
                1 => vec![(3, 1)],
                _ => vec![],
            }
        };
        let mut trace = SearchTrace::default();
        let run = astar(&0u8, successors, |_| 0, |n| *n == 3, &mut trace).unwrap();
        assert_eq!(run.solution, Some((vec![0, 2, 1, 3], 3)));
        let opened: Vec<u8> = trace
            .events()
            .iter()
            .filter(|(_, mark)| *mark == Mark::Open)
            .map(|(n, _)| *n)
            .collect();
        // Node 1 is opened once even though its cost improved while open
        assert_eq!(opened, vec![1, 2, 3]);
    }

    // 0 -> 1 (cost 5), 0 -> 2 (cost 1), 0 -> 3 (cost 4), 2 -> 1 (cost 1), 1 -> 3 (cost 1)
    fn shortcut_successors(n: &u8) -> Vec<(u8, u32)> {
        match n {
            0 => vec![(1, 5), (2, 1), (3, 4)],
            2 => vec![(1, 1)],
            1 => vec![(3, 1)],
            _ => vec![],
        }
    }

    #[test]
    fn kept_entry_can_miss_cheaper_path() {
        // Node 1 improves to g = 2 but stays queued at f = 5, so the goal pops at f = 4 first
        let run = astar(&0u8, shortcut_successors, |_| 0, |n| *n == 3, &mut ()).unwrap();
        assert_eq!(run.solution, Some((vec![0, 3], 4)));
    }

    #[test]
    fn reprioritized_entry_finds_cheapest_path() {
        let mut trace = SearchTrace::default();
        let run = astar_with_policy(
            &0u8,
            shortcut_successors,
            |_| 0,
            |n| *n == 3,
            &mut trace,
            FrontierPolicy::Reprioritize,
        )
        .unwrap();
        assert_eq!(run.solution, Some((vec![0, 2, 1, 3], 3)));
        // Outdated entries are skipped, not expanded
        assert_eq!(run.expanded, 3);
        assert_eq!(trace.count(Mark::Open), 3);
    }

    #[test]
    fn interruption_propagates() {
        struct StopAfter(usize);
        impl SearchObserver<i32> for StopAfter {
            fn on_expand(&mut self, _: &i32) -> ControlFlow<()> {
                self.0 -= 1;
                if self.0 == 0 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        }
        let result = astar(
            &0,
            line_successors,
            |_| 0u32,
            |n| *n == 9,
            &mut StopAfter(3),
        );
        assert_eq!(result, Err(Error::Interrupted { expanded: 3 }));
    }
}
