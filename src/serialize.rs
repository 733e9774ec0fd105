//! Compact pre-order encoding of a tree's shape and leaf symbols.
//!
//! Each internal node is written as `'0'` followed by its left then right
//! subtree; each leaf as `'1'` followed by the raw symbol byte. Frequencies
//! are not stored. The single-symbol wrapper has no right subtree, so it is
//! written as `'0' '1' <symbol>`.

use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanNode, HuffmanTree, NodeId};

pub const INTERNAL_MARKER: u8 = b'0';
pub const LEAF_MARKER: u8 = b'1';

pub fn serialize_tree(tree: Option<&HuffmanTree>) -> Vec<u8> {
    let Some(tree) = tree else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(tree.len() * 2);
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match *tree.node(id) {
            HuffmanNode::Leaf { symbol, .. } => {
                out.push(LEAF_MARKER);
                out.push(symbol);
            }
            HuffmanNode::Internal { left, right, .. } => {
                out.push(INTERNAL_MARKER);
                if let Some(right) = right {
                    stack.push(right);
                }
                stack.push(left);
            }
        }
    }
    out
}

/// Rebuild a tree from its serialized tokens. Empty input means no tree.
///
/// Tokens are consumed in the same order `serialize_tree` produced them.
/// Internal nodes whose children are still being read wait on `pending`;
/// each finished subtree is attached to the innermost waiting node.
pub fn deserialize_tree(tokens: &[u8]) -> Result<Option<HuffmanTree>> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut nodes: Vec<HuffmanNode> = Vec::new();
    // left child of each internal node still waiting for its right child
    let mut pending: Vec<Option<NodeId>> = Vec::new();
    let mut pos = 0;

    let root = 'read: loop {
        let Some(&token) = tokens.get(pos) else {
            return wrap_single_leaf(nodes, &pending, pos);
        };
        let offset = pos;
        pos += 1;

        let mut done = match token {
            INTERNAL_MARKER => {
                pending.push(None);
                continue;
            }
            LEAF_MARKER => {
                let &symbol = tokens.get(pos).ok_or(HuffmanError::TruncatedTree(pos))?;
                pos += 1;
                nodes.push(HuffmanNode::Leaf { symbol, freq: 0 });
                nodes.len() - 1
            }
            token => return Err(HuffmanError::InvalidToken { token, offset }),
        };

        loop {
            let Some(slot) = pending.last_mut() else {
                break 'read done;
            };
            match *slot {
                None => {
                    *slot = Some(done);
                    break;
                }
                Some(left) => {
                    pending.pop();
                    nodes.push(HuffmanNode::Internal {
                        freq: 0,
                        left,
                        right: Some(done),
                    });
                    done = nodes.len() - 1;
                }
            }
        }
    };

    if pos < tokens.len() {
        return Err(HuffmanError::TrailingTokens(tokens.len() - pos));
    }
    if nodes[root].is_leaf() {
        return Err(HuffmanError::BareLeafRoot);
    }
    Ok(Some(HuffmanTree::from_parts(nodes, root)))
}

/// The token stream ran out. That is only valid for the single-symbol form,
/// where the root holds a leaf on the left and nothing on the right.
fn wrap_single_leaf(
    mut nodes: Vec<HuffmanNode>,
    pending: &[Option<NodeId>],
    pos: usize,
) -> Result<Option<HuffmanTree>> {
    match *pending {
        [Some(left)] if nodes[left].is_leaf() => {
            let freq = nodes[left].freq();
            nodes.push(HuffmanNode::Internal {
                freq,
                left,
                right: None,
            });
            let root = nodes.len() - 1;
            Ok(Some(HuffmanTree::from_parts(nodes, root)))
        }
        _ => Err(HuffmanError::TruncatedTree(pos)),
    }
}
