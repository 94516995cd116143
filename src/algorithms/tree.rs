use core::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::algorithms::bits::{BitSink, BitSource};
use crate::algorithms::frequency::FrequencyModel;
use crate::compressor::DecodeError;

/// Deepest root-to-leaf path a tree over the byte alphabet can have.
pub const MAX_DEPTH: usize = 255;

/// A node of a Huffman code tree.
///
/// Every internal node owns exactly two children, so the tree has one leaf per distinct byte and
/// `leaves - 1` internal nodes. Trees rebuilt from a serialized description carry weight 0, since
/// the description stores shape and symbols only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeTreeNode {
    Leaf {
        byte: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<CodeTreeNode>,
        right: Box<CodeTreeNode>,
    },
}

impl CodeTreeNode {
    pub const fn leaf(byte: u8, weight: u64) -> Self {
        CodeTreeNode::Leaf { byte, weight }
    }

    /// Joins two subtrees; the weight is the sum of theirs.
    pub fn merge(left: Self, right: Self) -> Self {
        CodeTreeNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub const fn weight(&self) -> u64 {
        match self {
            CodeTreeNode::Leaf { weight, .. } | CodeTreeNode::Internal { weight, .. } => *weight,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self, CodeTreeNode::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                CodeTreeNode::Leaf { .. } => count += 1,
                CodeTreeNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                CodeTreeNode::Leaf { .. } => deepest = deepest.max(depth),
                CodeTreeNode::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        deepest
    }

    /// Writes the pre-order description: `1` + 8 bits for a leaf, `0` then left and right
    /// subtrees for an internal node.
    pub(crate) fn write_description(&self, sink: &mut BitSink<'_>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                CodeTreeNode::Leaf { byte, .. } => {
                    sink.push_bit(true);
                    sink.push_byte(*byte);
                }
                CodeTreeNode::Internal { left, right, .. } => {
                    sink.push_bit(false);
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }

    /// Serializes the description into whole bytes, zero-padded.
    pub fn to_description(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut sink = BitSink::new(&mut buf);
        self.write_description(&mut sink);
        sink.finish();
        buf
    }

    /// Rebuilds a tree from the front of `source`, consuming exactly its description.
    pub(crate) fn read_description(source: &mut BitSource<'_>) -> Result<Self, DecodeError> {
        // Each entry is an internal node whose children are still being read; it holds the left
        // child once that subtree is complete.
        let mut pending: Vec<Option<CodeTreeNode>> = Vec::new();
        let mut seen = [false; 256];

        loop {
            let is_leaf = source.next_bit().ok_or(DecodeError::TruncatedTree)?;
            if !is_leaf {
                if pending.len() == MAX_DEPTH {
                    return Err(DecodeError::TreeTooDeep);
                }
                pending.push(None);
                continue;
            }

            let byte = source.next_byte().ok_or(DecodeError::TruncatedTree)?;
            if seen[byte as usize] {
                return Err(DecodeError::DuplicateSymbol(byte));
            }
            seen[byte as usize] = true;

            let mut node = CodeTreeNode::leaf(byte, 0);
            loop {
                match pending.pop() {
                    None => return Ok(node),
                    Some(None) => {
                        pending.push(Some(node));
                        break;
                    }
                    Some(Some(left)) => node = CodeTreeNode::merge(left, node),
                }
            }
        }
    }

    /// Parses a standalone description, as produced by [`to_description`](Self::to_description).
    pub fn from_description(description: &[u8]) -> Result<Self, DecodeError> {
        Self::read_description(&mut BitSource::new(description))
    }
}

/// Heap entry for the greedy merge. Ordered by `(weight, rank)`: leaves rank by byte value,
/// internal nodes rank 256 + creation sequence, so equal weights pop in a fixed order.
#[derive(Debug)]
struct Candidate {
    weight: u64,
    rank: u32,
    node: CodeTreeNode,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.rank).cmp(&(other.weight, other.rank))
    }
}

/// Builds the minimum-weight code tree for `model`, or `None` when the model is empty.
///
/// The first node popped from the heap becomes the left child. A model with one distinct byte
/// yields a lone leaf.
pub fn build_tree(model: &FrequencyModel) -> Option<CodeTreeNode> {
    let mut heap: BinaryHeap<Reverse<Candidate>> = model
        .iter()
        .map(|(byte, count)| {
            Reverse(Candidate {
                weight: count,
                rank: u32::from(byte),
                node: CodeTreeNode::leaf(byte, count),
            })
        })
        .collect();

    let mut next_rank = 256;
    loop {
        let Reverse(left) = heap.pop()?;
        let Some(Reverse(right)) = heap.pop() else {
            return Some(left.node);
        };
        let node = CodeTreeNode::merge(left.node, right.node);
        heap.push(Reverse(Candidate {
            weight: node.weight(),
            rank: next_rank,
            node,
        }));
        next_rank += 1;
    }
}
