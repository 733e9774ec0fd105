use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyTable;

/// Index of a node in its tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    /// `right` is `None` only for the wrapper placed above the sole leaf of a
    /// single-symbol input.
    Internal {
        freq: u64,
        left: NodeId,
        right: Option<NodeId>,
    },
}

impl HuffmanNode {
    pub fn freq(&self) -> u64 {
        match *self {
            HuffmanNode::Leaf { freq, .. } | HuffmanNode::Internal { freq, .. } => freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// A Huffman tree stored as an arena of nodes addressed by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree by repeatedly merging the two lowest-frequency nodes.
    ///
    /// Ties go to the node created first: leaves are created in ascending
    /// symbol order, merged nodes after them in merge order. The first node
    /// taken becomes the left child. Returns `None` for an empty table.
    pub fn build(freqs: &FrequencyTable) -> Option<Self> {
        let mut nodes = Vec::with_capacity(freqs.len() * 2);
        let mut heap = BinaryHeap::with_capacity(freqs.len());

        for (symbol, freq) in freqs.iter() {
            heap.push(Reverse((freq, nodes.len())));
            nodes.push(HuffmanNode::Leaf { symbol, freq });
        }

        if heap.len() == 1 {
            let Reverse((freq, leaf)) = heap.pop()?;
            let root = nodes.len();
            nodes.push(HuffmanNode::Internal {
                freq,
                left: leaf,
                right: None,
            });
            return Some(Self { nodes, root });
        }

        loop {
            let Reverse((left_freq, left)) = heap.pop()?;
            let Some(Reverse((right_freq, right))) = heap.pop() else {
                return Some(Self { nodes, root: left });
            };

            let parent = nodes.len();
            let freq = left_freq + right_freq;
            nodes.push(HuffmanNode::Internal {
                freq,
                left,
                right: Some(right),
            });
            heap.push(Reverse((freq, parent)));
        }
    }

    pub(crate) fn from_parts(nodes: Vec<HuffmanNode>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id]
    }

    /// Total number of nodes, leaves and internal.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                HuffmanNode::Leaf { .. } => max = max.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    if let Some(right) = right {
                        stack.push((right, depth + 1));
                    }
                }
            }
        }
        max
    }
}
