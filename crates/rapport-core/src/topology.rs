//! Topology: the friendship graph seen as an index-based adjacency.
//!
//! Nodes are population indices. The connectivity pass produces a concrete
//! snapshot; every graph query runs against this trait so the algorithms
//! stay independent of how the snapshot is stored.

use std::collections::VecDeque;

/// Read-only view of an undirected adjacency snapshot.
pub trait Topology {
    /// Number of nodes (population size).
    fn node_count(&self) -> usize;

    /// Neighbors of `node`, in iteration order. Empty for unknown nodes.
    fn neighbors(&self, node: usize) -> &[usize];

    /// Whether `a` and `b` share an edge.
    fn is_connected(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// Undirected edge count: half the sum of degrees.
    fn edge_count(&self) -> usize {
        (0..self.node_count()).map(|n| self.degree(n)).sum::<usize>() / 2
    }
}

impl Topology for Vec<Vec<usize>> {
    fn node_count(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        self.get(node).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Fewest-edges path from `from` to `to`, both inclusive.
///
/// Breadth-first; among equally short paths the first one discovered under
/// neighbor iteration order wins. Returns `None` when either node is out of
/// range or no path exists.
pub fn shortest_path<T: Topology + ?Sized>(topo: &T, from: usize, to: usize) -> Option<Vec<usize>> {
    let n = topo.node_count();
    if from >= n || to >= n {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    visited[from] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for &next in topo.neighbors(current) {
            if next >= n || visited[next] {
                continue;
            }
            visited[next] = true;
            prev[next] = Some(current);
            if next == to {
                let mut path = vec![to];
                let mut cursor = current;
                path.push(cursor);
                while let Some(p) = prev[cursor] {
                    path.push(p);
                    cursor = p;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }
    None
}

/// Hop distance of every node reachable from `source` within `max_hops`,
/// in BFS discovery order. The source itself is not included.
pub fn hop_distances<T: Topology + ?Sized>(
    topo: &T,
    source: usize,
    max_hops: usize,
) -> Vec<(usize, usize)> {
    let n = topo.node_count();
    if source >= n {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    let mut reached = Vec::new();
    visited[source] = true;
    queue.push_back((source, 0usize));

    while let Some((current, hops)) = queue.pop_front() {
        if hops > 0 {
            reached.push((current, hops));
        }
        if hops >= max_hops {
            continue;
        }
        for &next in topo.neighbors(current) {
            if next < n && !visited[next] {
                visited[next] = true;
                queue.push_back((next, hops + 1));
            }
        }
    }
    reached
}

/// Member lists of every connected component, each seeded from its lowest
/// unvisited index and listed in BFS order.
pub fn components<T: Topology + ?Sized>(topo: &T) -> Vec<Vec<usize>> {
    let n = topo.node_count();
    let mut visited = vec![false; n];
    let mut result = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut members = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited[start] = true;
        while let Some(current) = queue.pop_front() {
            members.push(current);
            for &next in topo.neighbors(current) {
                if next < n && !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        result.push(members);
    }
    result
}

/// Number of connected components (isolated nodes count as one each).
pub fn connected_components<T: Topology + ?Sized>(topo: &T) -> usize {
    components(topo).len()
}

/// Number of neighbors `a` and `b` have in common.
pub fn mutual_count<T: Topology + ?Sized>(topo: &T, a: usize, b: usize) -> usize {
    let nb = topo.neighbors(b);
    topo.neighbors(a).iter().filter(|x| nb.contains(x)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); n];
        for &(a, b) in edges {
            adj[a].push(b);
            adj[b].push(a);
        }
        adj
    }

    #[test]
    fn chain_path_is_in_order() {
        let adj = undirected(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(shortest_path(&adj, 0, 3), Some(vec![0, 1, 2, 3]));
        assert_eq!(shortest_path(&adj, 3, 0), Some(vec![3, 2, 1, 0]));
    }

    #[test]
    fn path_to_self_is_single_node() {
        let adj = undirected(2, &[]);
        assert_eq!(shortest_path(&adj, 1, 1), Some(vec![1]));
    }

    #[test]
    fn disconnected_or_out_of_range_has_no_path() {
        let adj = undirected(4, &[(0, 1), (2, 3)]);
        assert_eq!(shortest_path(&adj, 0, 3), None);
        assert_eq!(shortest_path(&adj, 0, 9), None);
    }

    #[test]
    fn bfs_prefers_fewer_edges() {
        // 0-1-2-3-4 plus a shortcut 0-4
        let adj = undirected(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)]);
        assert_eq!(shortest_path(&adj, 0, 3), Some(vec![0, 4, 3]));
    }

    #[test]
    fn equal_length_paths_follow_neighbor_order() {
        // Diamond: 0-1-3 and 0-2-3 are both two edges long. With neighbors
        // in ascending order the path through 1 is discovered first. A
        // different but equivalent neighbor ordering may return 0-2-3.
        let adj = undirected(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let path = shortest_path(&adj, 0, 3).unwrap();
        assert_eq!(path.len(), 3);
        assert!(path.windows(2).all(|w| adj.is_connected(w[0], w[1])));
        assert_eq!(path, vec![0, 1, 3]);

        let reordered = vec![vec![2, 1], vec![0, 3], vec![0, 3], vec![1, 2]];
        assert_eq!(shortest_path(&reordered, 0, 3), Some(vec![0, 2, 3]));
    }

    #[test]
    fn hop_distances_stop_at_limit() {
        let adj = undirected(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
        let reached = hop_distances(&adj, 0, 3);
        assert_eq!(reached, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn component_counts() {
        let empty = undirected(5, &[]);
        assert_eq!(connected_components(&empty), 5);

        let adj = undirected(5, &[(0, 1), (1, 2), (3, 4)]);
        assert_eq!(connected_components(&adj), 2);
        assert_eq!(components(&adj), vec![vec![0, 1, 2], vec![3, 4]]);
        assert_eq!(components(&empty).len(), 5);
        assert!(components(&undirected(0, &[])).is_empty());
        assert_eq!(connected_components(&undirected(0, &[])), 0);
    }

    #[test]
    fn edge_count_halves_degree_sum() {
        let adj = undirected(4, &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(adj.edge_count(), 3);
        assert_eq!(adj.degree(0), 3);
    }

    #[test]
    fn mutual_neighbors() {
        let adj = undirected(4, &[(0, 2), (0, 3), (1, 2), (1, 3)]);
        assert_eq!(mutual_count(&adj, 0, 1), 2);
        assert_eq!(mutual_count(&adj, 0, 2), 0);
    }
}
