//! Who reads what: the identifier finder, the dependency graph, and static
//! combinational-cycle detection.

use mvs_common::bits::slices_overlap;
use mvs_common::BitRange;
use mvs_parser::{Assign, Expr, Module};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};

/// Collects the names of all signals read by `expr`.
pub fn find_identifiers(expr: &Expr) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    visit_reads(expr, &mut |name, _| {
        names.insert(name.to_string());
    });
    names
}

/// Collects every signal read in `expr` with its read slice, in source order.
/// A name read twice appears twice.
pub fn find_reads(expr: &Expr) -> Vec<(&str, Option<BitRange>)> {
    let mut reads = Vec::new();
    visit_reads(expr, &mut |name, bits| reads.push((name, bits)));
    reads
}

fn visit_reads<'e>(expr: &'e Expr, f: &mut impl FnMut(&'e str, Option<BitRange>)) {
    match expr {
        Expr::Ident { name, bits, .. } => f(name.as_str(), *bits),
        Expr::Const { .. } => {}
        Expr::Unary { operand, .. } => visit_reads(operand, f),
        Expr::Binary { left, right, .. } => {
            visit_reads(left, f);
            visit_reads(right, f);
        }
    }
}

/// Map from signal name to the indices of the assignments whose right-hand
/// side reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    readers: HashMap<String, Vec<usize>>,
}

impl DependencyGraph {
    /// Builds the graph for every assignment of `module`.
    pub fn build(module: &Module) -> Self {
        let mut readers: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, assign) in module.assigns.iter().enumerate() {
            for name in find_identifiers(&assign.rhs) {
                readers.entry(name).or_default().push(idx);
            }
        }
        Self { readers }
    }

    /// Assignments to re-run when `name` changes, in ascending order.
    pub fn dependents(&self, name: &str) -> &[usize] {
        self.readers.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every signal read by at least one assignment.
    pub fn signals(&self) -> impl Iterator<Item = &str> + '_ {
        self.readers.keys().map(String::as_str)
    }
}

fn feeds(writer: &Assign, reader: &Assign) -> bool {
    find_reads(&reader.rhs)
        .into_iter()
        .any(|(name, bits)| name == writer.target && slices_overlap(writer.target_bits, bits))
}

/// Looks for a combinational feedback loop among the assignments.
///
/// Assignment `a` feeds `b` when `b` reads bits that `a` writes; disjoint
/// slices of the same signal do not feed each other. Returns the sorted,
/// de-duplicated targets of the first loop found (by lowest assignment
/// index), or `None` for an acyclic module.
pub fn find_combinational_cycle(module: &Module) -> Option<Vec<String>> {
    let assigns = &module.assigns;
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(assigns.len(), 0);
    let nodes: Vec<NodeIndex> = (0..assigns.len()).map(|i| graph.add_node(i)).collect();

    let mut by_target: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, assign) in assigns.iter().enumerate() {
        by_target.entry(assign.target.as_str()).or_default().push(idx);
    }
    for (reader_idx, reader) in assigns.iter().enumerate() {
        let read_names = find_identifiers(&reader.rhs);
        for writer_idx in read_names
            .iter()
            .filter_map(|name| by_target.get(name.as_str()))
            .flatten()
        {
            if feeds(&assigns[*writer_idx], reader) {
                graph.update_edge(nodes[*writer_idx], nodes[reader_idx], ());
            }
        }
    }

    tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| match scc.as_slice() {
            [single] => graph.contains_edge(*single, *single),
            _ => true,
        })
        .map(|scc| scc.into_iter().map(|n| graph[n]).collect::<Vec<_>>())
        .min_by_key(|members| members.iter().copied().min())
        .map(|members| {
            let targets: BTreeSet<String> = members
                .into_iter()
                .map(|idx| assigns[idx].target.clone())
                .collect();
            targets.into_iter().collect()
        })
}
