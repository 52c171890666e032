//! Control-flow view of a driver procedure

use petgraph::algo::dominators::{self, Dominators};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::Serialize;

use crate::features::driver_builder::domain::{DriverProcedure, Stmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowEdge {
    Fallthrough,
    /// Guard not taken
    Branch,
    Jump,
}

/// One node per unit, node index == unit index
pub struct DriverCfg {
    graph: DiGraph<usize, FlowEdge>,
    entry: Option<NodeIndex>,
    dominators: Option<Dominators<NodeIndex>>,
}

impl DriverCfg {
    pub fn build(procedure: &DriverProcedure) -> Self {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..procedure.units().len())
            .map(|i| graph.add_node(i))
            .collect();

        for (i, unit) in procedure.units().iter().enumerate() {
            let next = nodes.get(i + 1).copied();
            match &unit.stmt {
                Stmt::ReturnVoid => {}
                Stmt::Goto(target) => {
                    if let Some(t) = procedure.label_index(*target) {
                        graph.add_edge(nodes[i], nodes[t], FlowEdge::Jump);
                    }
                }
                Stmt::Guard { skip_to, .. } => {
                    if let Some(n) = next {
                        graph.add_edge(nodes[i], n, FlowEdge::Fallthrough);
                    }
                    if let Some(t) = procedure.label_index(*skip_to) {
                        graph.add_edge(nodes[i], nodes[t], FlowEdge::Branch);
                    }
                }
                _ => {
                    if let Some(n) = next {
                        graph.add_edge(nodes[i], n, FlowEdge::Fallthrough);
                    }
                }
            }
        }

        let entry = nodes.first().copied();
        let dominators = entry.map(|root| dominators::simple_fast(&graph, root));
        Self {
            graph,
            entry,
            dominators,
        }
    }

    pub fn graph(&self) -> &DiGraph<usize, FlowEdge> {
        &self.graph
    }

    pub fn entry(&self) -> Option<NodeIndex> {
        self.entry
    }

    pub fn node(&self, unit: usize) -> NodeIndex {
        NodeIndex::new(unit)
    }

    /// Unit indices reachable from the entry, in DFS order
    pub fn reachable_units(&self) -> Vec<usize> {
        let Some(entry) = self.entry else {
            return Vec::new();
        };
        let mut dfs = Dfs::new(&self.graph, entry);
        let mut out = Vec::new();
        while let Some(node) = dfs.next(&self.graph) {
            out.push(self.graph[node]);
        }
        out
    }

    /// Every path from the entry to unit `b` passes through unit `a`
    pub fn dominates(&self, a: usize, b: usize) -> bool {
        if a >= self.graph.node_count() || b >= self.graph.node_count() {
            return false;
        }
        let target = self.node(a);
        self.dominators
            .as_ref()
            .and_then(|doms| doms.dominators(self.node(b)))
            .map_or(false, |mut chain| chain.any(|n| n == target))
    }
}

impl DriverProcedure {
    pub fn control_flow_graph(&self) -> DriverCfg {
        DriverCfg::build(self)
    }
}
