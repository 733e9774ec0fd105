use std::collections::BTreeMap;

use crate::bits::BitString;
use crate::tree::{HuffmanNode, HuffmanTree};

/// Mapping from symbol to its prefix-free code, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitString>,
}

impl CodeTable {
    /// Walk the tree recording `0` for every left branch and `1` for every
    /// right branch. An absent tree yields an empty table.
    pub fn from_tree(tree: Option<&HuffmanTree>) -> Self {
        let mut codes = BTreeMap::new();
        let Some(tree) = tree else {
            return Self { codes };
        };

        let mut stack = vec![(tree.root(), BitString::new())];
        while let Some((id, prefix)) = stack.pop() {
            match *tree.node(id) {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(symbol, prefix);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        let mut right_prefix = prefix.clone();
                        right_prefix.push(true);
                        stack.push((right, right_prefix));
                    }
                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((left, left_prefix));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Printable label for a symbol in a code listing.
pub fn symbol_label(symbol: u8) -> String {
    match symbol {
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        b'\r' => "\\r".to_string(),
        b' ' => " ".to_string(),
        s if s.is_ascii_graphic() => char::from(s).to_string(),
        s => format!("0x{s:02x}"),
    }
}
