use std::collections::{HashSet, VecDeque};

use itertools::Itertools;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::farm::Farm;
use crate::room::RoomId;

pub(crate) type Capacity = u32;

/// Rooms from start to end, each adjacent to the next.
pub type Path = Vec<RoomId>;

/// Remaining capacity on every arc, as seen by the augmenting path search.
///
/// Each tunnel `from-to` contributes the arc `from -> to` with capacity 1 and the arc `to -> from` with capacity 0.
/// Pushing flow along an arc takes one unit from it and gives one to its reverse, so later paths may cancel earlier ones.
///
/// Arcs are inserted tunnel by tunnel in declaration order, and [`DiGraphMap`] iterates outgoing arcs in insertion order,
/// so the search below expands neighbors in the same order on every run.
pub(crate) struct ResidualGraph {
    arcs: DiGraphMap<RoomId, Capacity>,
}

impl From<&Farm> for ResidualGraph {
    fn from(farm: &Farm) -> Self {
        let mut arcs = DiGraphMap::with_capacity(farm.rooms().len(), 2 * farm.graph.edge_count());
        for id in 0..farm.rooms().len() {
            arcs.add_node(id);
        }
        for (from, to) in farm.tunnels() {
            arcs.add_edge(from, to, 1);
            arcs.add_edge(to, from, 0);
        }

        Self { arcs }
    }
}

impl ResidualGraph {
    /// Remaining capacity on the arc `from -> to`, or 0 if no tunnel joins them.
    pub(crate) fn capacity(&self, from: RoomId, to: RoomId) -> Capacity {
        self.arcs.edge_weight(from, to).copied().unwrap_or(0)
    }

    /// Breadth-first search for the shortest path from `source` to `sink` using only arcs with capacity left.
    ///
    /// Among several shortest paths, the first one reached under declaration order wins.
    pub(crate) fn augmenting_path(&self, source: RoomId, sink: RoomId) -> Option<Path> {
        let mut visited = vec![false; self.arcs.node_count()];
        let mut parent: Vec<Option<RoomId>> = vec![None; self.arcs.node_count()];
        let mut frontier = VecDeque::from([source]);
        *visited.get_mut(source)? = true;

        while let Some(current) = frontier.pop_front() {
            for (_, next, capacity) in self.arcs.edges(current) {
                if *capacity == 0 || visited.get(next).copied().unwrap_or(true) {
                    continue;
                }
                visited[next] = true;
                parent[next] = Some(current);

                if next == sink {
                    let mut path = std::iter::successors(Some(sink), |room| parent[*room]).collect_vec();
                    path.reverse();
                    return Some(path);
                }
                frontier.push_back(next);
            }
        }

        None
    }

    /// Send one unit of flow along `path`.
    pub(crate) fn push_flow(&mut self, path: &[RoomId]) {
        for (&from, &to) in path.iter().tuple_windows() {
            if let Some(forward) = self.arcs.edge_weight_mut(from, to) {
                *forward = forward.saturating_sub(1);
            }
            if let Some(reverse) = self.arcs.edge_weight_mut(to, from) {
                *reverse += 1;
            }
        }
    }

    /// Split the flow left behind by `augmenting` into edge-disjoint start-to-end paths.
    ///
    /// A tunnel carries flow once its reverse arc has capacity; flow only ever runs along a tunnel's declared orientation.
    /// Each walk starts down the first tunnel of the corresponding augmenting path and keeps to that path while its tunnels still carry flow,
    /// otherwise taking the first carrying tunnel in declaration order. Loops are cut out of a walk as soon as they close.
    ///
    /// When no augmenting path cancelled another's flow, this returns `augmenting` unchanged.
    pub(crate) fn decompose(&self, farm: &Farm, augmenting: &[Path]) -> Vec<Path> {
        let mut carrying: HashSet<(RoomId, RoomId)> = farm.tunnels()
            .filter(|&(from, to)| self.capacity(to, from) > 0)
            .collect();

        augmenting.iter()
            .filter_map(|guide| {
                let mut walk = vec![farm.start()];
                let mut current = farm.start();

                while current != farm.end() {
                    let along_guide = guide.iter()
                        .position(|room| *room == current)
                        .and_then(|index| guide.get(index + 1))
                        .copied()
                        .filter(|next| carrying.contains(&(current, *next)));
                    let next = along_guide
                        .or_else(|| farm.neighbors(current).find(|next| carrying.contains(&(current, *next))))?;
                    carrying.remove(&(current, next));

                    match walk.iter().position(|room| *room == next) {
                        Some(seen) => walk.truncate(seen + 1),
                        None => walk.push(next),
                    }
                    current = next;
                }

                Some(walk)
            })
            .collect()
    }
}

fn edmonds_karp(farm: &Farm) -> (ResidualGraph, Vec<Path>) {
    let mut residual = ResidualGraph::from(farm);
    let mut paths = Vec::new();

    while let Some(path) = residual.augmenting_path(farm.start(), farm.end()) {
        debug!(
            index = paths.len(),
            length = path.len() - 1,
            rooms = %path.iter().map(|id| farm.name_of(*id)).join("-"),
            "found augmenting path"
        );
        residual.push_flow(&path);
        paths.push(path);
    }

    (residual, paths)
}

/// Edmonds-Karp over the unit capacity tunnel graph of `farm`.
///
/// Returns one path per unit of maximum flow from start to end, in the order they were found (so shortest first).
/// These are the augmenting paths themselves: a later path may travel a tunnel backwards to cancel flow an earlier one sent.
/// Returns no paths if the end cannot be reached from the start along declared tunnel orientations.
pub(crate) fn augmenting_paths(farm: &Farm) -> Vec<Path> {
    edmonds_karp(farm).1
}

/// A maximum set of edge-disjoint start-to-end paths of `farm`: Edmonds-Karp followed by [`ResidualGraph::decompose`].
pub(crate) fn edge_disjoint_paths(farm: &Farm) -> Vec<Path> {
    let (residual, augmenting) = edmonds_karp(farm);
    let paths = residual.decompose(farm, &augmenting);
    if paths != augmenting {
        debug!(
            paths = ?paths.iter().map(|path| path.iter().map(|id| farm.name_of(*id)).join("-")).collect_vec(),
            "rerouted cancelled flow"
        );
    }

    paths
}
