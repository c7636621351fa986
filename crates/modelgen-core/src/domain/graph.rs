//! Generic graph utilities used for dependency ordering.
//!
//! - [`topological_sort`]: depth-first topological sort with
//!   temporary/permanent marks, failing with [`CycleError`] on a cycle.
//! - [`has_cycle`]: Floyd's tortoise-and-hare for chains where every node
//!   has at most one successor (supertype chains, for instance).
//!
//! Both are pure: the caller supplies the edges as closures and no input is
//! mutated.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

/// The predecessor graph handed to [`topological_sort`] is not a DAG.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot sort topologically: cycle found")]
pub struct CycleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Temporary,
    Permanent,
}

/// Order `nodes` so that every node comes after all of its predecessors.
///
/// `predecessors_of(n)` returns the nodes that must precede `n`. If the
/// closure returns *successors* instead, pass `reverse = true` to get the
/// same forward ordering.
///
/// Every input node appears exactly once in the output. Predecessors that
/// were not part of `nodes` are visited too and appear in the output.
///
/// # Errors
///
/// Returns [`CycleError`] if a node is reached again while it is still
/// being visited. No partial ordering is returned.
pub fn topological_sort<T, I, F>(
    nodes: impl IntoIterator<Item = T>,
    mut predecessors_of: F,
    reverse: bool,
) -> Result<Vec<T>, CycleError>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> I,
{
    let mut marks: HashMap<T, Mark> = HashMap::new();
    let mut ordering = Vec::new();

    for node in nodes {
        visit(node, &mut predecessors_of, &mut marks, &mut ordering)?;
    }

    if reverse {
        ordering.reverse();
    }
    Ok(ordering)
}

fn visit<T, I, F>(
    node: T,
    predecessors_of: &mut F,
    marks: &mut HashMap<T, Mark>,
    ordering: &mut Vec<T>,
) -> Result<(), CycleError>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> I,
{
    match marks.get(&node) {
        Some(Mark::Permanent) => return Ok(()),
        Some(Mark::Temporary) => return Err(CycleError),
        None => {}
    }

    marks.insert(node.clone(), Mark::Temporary);
    for predecessor in predecessors_of(&node) {
        visit(predecessor, predecessors_of, marks, ordering)?;
    }
    marks.insert(node.clone(), Mark::Permanent);
    ordering.push(node);

    Ok(())
}

/// Whether following `successor_of` from `start` ever revisits a node.
///
/// Only meaningful when every node has at most one successor. A chain that
/// reaches a node without successor has no cycle.
pub fn has_cycle<T, F>(start: T, mut successor_of: F) -> bool
where
    T: Clone + PartialEq,
    F: FnMut(&T) -> Option<T>,
{
    let mut tortoise = start.clone();
    let mut hare = start;

    loop {
        let Some(step) = successor_of(&hare) else {
            return false;
        };
        let Some(next_hare) = successor_of(&step) else {
            return false;
        };
        let Some(next_tortoise) = successor_of(&tortoise) else {
            return false;
        };

        hare = next_hare;
        tortoise = next_tortoise;

        if tortoise == hare {
            return true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preds<'a>(edges: &'a [(&'a str, &'a str)]) -> impl FnMut(&&'a str) -> Vec<&'a str> {
        move |node: &&'a str| {
            edges
                .iter()
                .filter(|(to, _)| to == node)
                .map(|(_, from)| *from)
                .collect()
        }
    }

    #[test]
    fn sorts_a_simple_chain() {
        // (node, predecessor)
        let edges = [("B", "A"), ("C", "B")];
        let order = topological_sort(["A", "B", "C"], preds(&edges), false).unwrap();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn input_order_does_not_matter_for_constraints() {
        let edges = [("B", "A"), ("C", "B")];
        let order = topological_sort(["C", "B", "A"], preds(&edges), false).unwrap();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn reverse_flips_the_ordering() {
        let edges = [("B", "A"), ("C", "B")];
        let order = topological_sort(["A", "B", "C"], preds(&edges), true).unwrap();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn successor_function_with_reverse_gives_forward_order() {
        // A -> B -> C expressed as successors
        let successors = |n: &&str| match *n {
            "A" => vec!["B"],
            "B" => vec!["C"],
            _ => vec![],
        };
        let order = topological_sort(["A", "B", "C"], successors, true).unwrap();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn diamond_lists_each_node_once() {
        let edges = [("B", "A"), ("C", "A"), ("D", "B"), ("D", "C")];
        let order = topological_sort(["D", "C", "B", "A"], preds(&edges), false).unwrap();

        assert_eq!(order.len(), 4);
        let pos = |n: &str| order.iter().position(|x| *x == n).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("A") < pos("C"));
        assert!(pos("B") < pos("D"));
        assert!(pos("C") < pos("D"));
    }

    #[test]
    fn predecessors_outside_the_input_are_included() {
        let edges = [("B", "A")];
        let order = topological_sort(["B"], preds(&edges), false).unwrap();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn mutual_predecessors_are_a_cycle() {
        let edges = [("A", "B"), ("B", "A")];
        let result = topological_sort(["A", "B"], preds(&edges), false);
        assert_eq!(result, Err(CycleError));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let edges = [("A", "A")];
        assert!(topological_sort(["A"], preds(&edges), false).is_err());
    }

    #[test]
    fn empty_input_sorts_to_empty() {
        let order = topological_sort(Vec::<u32>::new(), |_| Vec::new(), false).unwrap();
        assert!(order.is_empty());
    }

    #[test]
    fn detects_three_node_loop() {
        let next = |n: &char| match *n {
            'A' => Some('B'),
            'B' => Some('C'),
            'C' => Some('A'),
            _ => None,
        };
        assert!(has_cycle('A', next));
    }

    #[test]
    fn terminating_chain_has_no_cycle() {
        let next = |n: &char| match *n {
            'A' => Some('B'),
            'B' => Some('C'),
            _ => None,
        };
        assert!(!has_cycle('A', next));
    }

    #[test]
    fn self_successor_is_a_cycle() {
        assert!(has_cycle(7u8, |n| Some(*n)));
    }

    #[test]
    fn lone_node_has_no_cycle() {
        assert!(!has_cycle(1u8, |_| None));
    }

    #[test]
    fn tail_leading_into_loop_is_detected() {
        // 0 -> 1 -> 2 -> 3 -> 4 -> 2
        let next = |n: &u8| Some(if *n == 4 { 2 } else { n + 1 });
        assert!(has_cycle(0u8, next));
    }
}
