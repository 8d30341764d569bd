//! Deterministic topological ordering for the per-day component graph.

use std::collections::HashMap;

use crate::error::FinTrajError;
use crate::FinTrajResult;

/// A node in a dependency graph.
#[derive(Debug, Clone)]
pub struct DagNode {
    pub id: String,
    pub depends_on: Vec<String>,
}

/// Kahn's algorithm with two determinism guarantees: the initial
/// zero-in-degree queue is sorted lexicographically by id, and nodes that
/// become ready later are inserted preserving that order. The same node set
/// therefore always resolves to the same linear order.
pub fn resolve(nodes: &[DagNode]) -> FinTrajResult<Vec<String>> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut in_degree = vec![0usize; nodes.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        for dep in &node.depends_on {
            let Some(&j) = index.get(dep.as_str()) else {
                return Err(FinTrajError::UnknownDependency(dep.clone()));
            };
            in_degree[i] += 1;
            dependents[j].push(i);
        }
    }

    let mut ready: Vec<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    ready.sort_by(|&a, &b| nodes[a].id.cmp(&nodes[b].id));

    let mut order = Vec::with_capacity(nodes.len());
    while !ready.is_empty() {
        let current = ready.remove(0);
        order.push(nodes[current].id.clone());
        for &dep in &dependents[current] {
            in_degree[dep] -= 1;
            if in_degree[dep] == 0 {
                let pos = ready
                    .binary_search_by(|&p| nodes[p].id.cmp(&nodes[dep].id))
                    .unwrap_or_else(|p| p);
                ready.insert(pos, dep);
            }
        }
    }

    if order.len() < nodes.len() {
        return Err(FinTrajError::DependencyCycle);
    }
    Ok(order)
}
