//! Weighted union-find (disjoint-set forest) for Kruskal's algorithm, per
//! spec.md §4.7 and `original_source/union_find.h`. Union by size keeps
//! trees shallow without path compression, matching the original's
//! choice to keep `find` side-effect-free so a label can be read mid-walk
//! without mutating the structure concurrently used elsewhere.

use crate::index_map::IndexMap;

pub struct UnionFind<M> {
    index_map: M,
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl<M> UnionFind<M> {
    pub fn new(index_map: M, node_count: usize) -> Self {
        UnionFind {
            index_map,
            parent: (0..node_count).collect(),
            size: vec![1; node_count],
        }
    }
}

impl<M> UnionFind<M> {
    fn find_index(&self, mut idx: usize) -> usize {
        while self.parent[idx] != idx {
            idx = self.parent[idx];
        }
        idx
    }

    /// The representative index of the set containing `handle`.
    pub fn find<H>(&self, handle: &H) -> usize
    where
        M: IndexMap<H>,
    {
        self.find_index(self.index_map.index_of(handle))
    }

    /// Whether `a` and `b` are already in the same set.
    pub fn connected<H>(&self, a: &H, b: &H) -> bool
    where
        M: IndexMap<H>,
    {
        self.find(a) == self.find(b)
    }

    /// Merge the sets containing `a` and `b`. Returns `false` if they
    /// were already connected (the edge would close a cycle).
    pub fn union<H>(&mut self, a: &H, b: &H) -> bool
    where
        M: IndexMap<H>,
    {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (small, big) = if self.size[ra] < self.size[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }

    /// The representative index for every handle's current set, read
    /// without mutating the tree. Supplemented convenience over the bare
    /// `find`/`union` pair: labels every index `0..node_count` by its
    /// root representative in one pass.
    pub fn into_labeling(self) -> Vec<usize> {
        (0..self.parent.len()).map(|i| self.find_index(i)).collect()
    }

    /// The representative index for a single dense index, without going
    /// through a handle/index-map round trip.
    pub fn label_of(&self, index: usize) -> usize {
        self.find_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_map::Identity;

    #[test]
    fn union_merges_disjoint_sets() {
        let mut uf = UnionFind::new(Identity, 4);
        assert!(!uf.connected(&0, &1));
        assert!(uf.union(&0, &1));
        assert!(uf.connected(&0, &1));
        assert!(uf.union(&2, &3));
        assert!(!uf.connected(&1, &2));
        assert!(uf.union(&1, &2));
        assert!(uf.connected(&0, &3));
    }

    #[test]
    fn union_of_already_connected_nodes_is_a_no_op() {
        let mut uf = UnionFind::new(Identity, 3);
        assert!(uf.union(&0, &1));
        assert!(!uf.union(&0, &1));
    }

    #[test]
    fn into_labeling_groups_every_index_by_its_root() {
        let mut uf = UnionFind::new(Identity, 5);
        uf.union(&0, &1);
        uf.union(&1, &2);
        uf.union(&3, &4);
        let labels = uf.into_labeling();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_ne!(labels[0], labels[3]);
    }
}
