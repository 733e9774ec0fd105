use tracing::{debug, trace};

use crate::bits::BitString;
use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::serialize::{deserialize_tree, serialize_tree};
use crate::tree::{HuffmanNode, HuffmanTree};

/// Everything produced by one encode pass.
#[derive(Debug, Clone, Default)]
pub struct Encoded {
    pub bits: BitString,
    pub tree: Option<HuffmanTree>,
    pub table: CodeTable,
}

impl Encoded {
    pub fn serialized_tree(&self) -> Vec<u8> {
        serialize_tree(self.tree.as_ref())
    }
}

/// Count, build, derive codes, then encode `data` with them.
pub fn encode(data: &[u8]) -> Result<Encoded> {
    let freqs = FrequencyTable::count(data);
    let tree = HuffmanTree::build(&freqs);
    let table = CodeTable::from_tree(tree.as_ref());
    let bits = encode_symbols(data, &table)?;

    if let Some(tree) = &tree {
        debug!(
            symbols = freqs.len(),
            nodes = tree.len(),
            depth = tree.depth(),
            bits = bits.len(),
            "built huffman tree"
        );
    }

    Ok(Encoded { bits, tree, table })
}

/// Concatenate the code of every byte of `data`, in order.
pub fn encode_symbols(data: &[u8], table: &CodeTable) -> Result<BitString> {
    let mut bits = BitString::new();
    for &byte in data {
        let code = table.get(byte).ok_or(HuffmanError::MissingCode(byte))?;
        bits.extend_from(code);
    }
    Ok(bits)
}

/// Walk `tree` one bit at a time, emitting a symbol at every leaf.
///
/// No tree decodes to nothing. Bits left over after the last complete
/// symbol are byte-alignment padding and are dropped.
pub fn decode_bits(bits: &BitString, tree: Option<&HuffmanTree>) -> Result<Vec<u8>> {
    let Some(tree) = tree else {
        return Ok(Vec::new());
    };
    let root = tree.root();
    if tree.node(root).is_leaf() {
        return Err(HuffmanError::BareLeafRoot);
    }

    let mut out = Vec::new();
    let mut current = root;
    let mut partial = 0usize;

    for (index, bit) in bits.iter().enumerate() {
        let next = match *tree.node(current) {
            HuffmanNode::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    Some(left)
                }
            }
            HuffmanNode::Leaf { .. } => None,
        };
        let next = next.ok_or(HuffmanError::InvalidPath(index))?;

        if let HuffmanNode::Leaf { symbol, .. } = *tree.node(next) {
            out.push(symbol);
            current = root;
            partial = 0;
        } else {
            current = next;
            partial += 1;
        }
    }

    if partial > 0 {
        debug!(bits = partial, "discarding trailing bits that do not complete a symbol");
    }
    trace!(symbols = out.len(), "decoded");
    Ok(out)
}

/// One encode/decode session holding the most recent tree and code table.
///
/// Each call to `encode` replaces both. Sessions are independent; use one
/// per concurrent input.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCoder {
    tree: Option<HuffmanTree>,
    table: CodeTable,
}

impl HuffmanCoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&mut self, data: &[u8]) -> Result<BitString> {
        let Encoded { bits, tree, table } = encode(data)?;
        self.tree = tree;
        self.table = table;
        Ok(bits)
    }

    /// Serialized form of the tree from the most recent `encode` or `decode`.
    pub fn serialize_tree(&self) -> Vec<u8> {
        serialize_tree(self.tree.as_ref())
    }

    /// Decode `bits`. A non-empty `tokens` replaces the held tree first;
    /// otherwise the tree from the previous operation is reused.
    pub fn decode(&mut self, bits: &BitString, tokens: Option<&[u8]>) -> Result<Vec<u8>> {
        if let Some(tokens) = tokens.filter(|t| !t.is_empty()) {
            self.tree = deserialize_tree(tokens)?;
            self.table = CodeTable::from_tree(self.tree.as_ref());
        }
        decode_bits(bits, self.tree.as_ref())
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn empty_input() {
        let mut coder = HuffmanCoder::new();
        let encoded = coder.encode(b"").unwrap();
        assert!(encoded.is_empty());
        assert!(coder.serialize_tree().is_empty());
        assert!(coder.code_table().is_empty());
        assert_eq!(coder.decode(&encoded, Some(&[][..])).unwrap(), b"");
    }

    #[test]
    fn no_tree_ignores_bits() {
        let mut coder = HuffmanCoder::new();
        assert_eq!(coder.decode(&bits("0101"), None).unwrap(), b"");
    }

    #[test]
    fn single_symbol_round_trip() {
        let mut coder = HuffmanCoder::new();
        let encoded = coder.encode(b"aaaa").unwrap();
        assert_eq!(encoded.to_string(), "0000");
        assert_eq!(coder.code_table().len(), 1);

        let tokens = coder.serialize_tree();
        let mut fresh = HuffmanCoder::new();
        assert_eq!(fresh.decode(&encoded, Some(tokens.as_slice())).unwrap(), b"aaaa");
    }

    #[test]
    fn one_bit_into_missing_branch_is_invalid() {
        let mut coder = HuffmanCoder::new();
        coder.encode(b"aa").unwrap();
        assert!(matches!(
            coder.decode(&bits("001"), None),
            Err(HuffmanError::InvalidPath(2))
        ));
    }

    #[test]
    fn two_symbol_scenario() {
        let mut coder = HuffmanCoder::new();
        let encoded = coder.encode(b"aaaab").unwrap();
        let table = coder.code_table();
        let a = table.get(b'a').unwrap().len();
        let b = table.get(b'b').unwrap().len();
        assert!(a <= b);
        assert_eq!(encoded.len(), 4 * a + b);
        assert_eq!(coder.decode(&encoded, None).unwrap(), b"aaaab");
    }

    #[test]
    fn frequent_symbol_gets_shorter_code() {
        let mut coder = HuffmanCoder::new();
        let encoded = coder.encode(b"aaaabbc").unwrap();
        let table = coder.code_table();
        assert!(table.get(b'a').unwrap().len() < table.get(b'c').unwrap().len());
        assert_eq!(encoded.to_string(), "1111010100");
        assert_eq!(coder.decode(&encoded, None).unwrap(), b"aaaabbc");
    }

    #[test]
    fn trailing_padding_is_dropped() {
        let mut coder = HuffmanCoder::new();
        let mut encoded = coder.encode(b"aaaabbc").unwrap();
        // "0" alone does not reach a leaf for this tree
        encoded.push(false);
        assert_eq!(coder.decode(&encoded, None).unwrap(), b"aaaabbc");
    }

    #[test]
    fn supplied_tree_replaces_held_tree() {
        let mut first = HuffmanCoder::new();
        let encoded = first.encode(b"hello world").unwrap();
        let tokens = first.serialize_tree();

        let mut other = HuffmanCoder::new();
        other.encode(b"something unrelated").unwrap();
        assert_eq!(other.decode(&encoded, Some(tokens.as_slice())).unwrap(), b"hello world");
        assert_eq!(other.code_table(), first.code_table());
    }

    #[test]
    fn encode_discards_previous_state() {
        let mut coder = HuffmanCoder::new();
        coder.encode(b"abcdefgh").unwrap();
        coder.encode(b"zz").unwrap();
        assert_eq!(coder.code_table().len(), 1);
        assert_eq!(coder.serialize_tree(), b"01z");
    }

    #[test]
    fn missing_code_is_reported() {
        let table = encode(b"abc").unwrap().table;
        assert!(matches!(
            encode_symbols(b"abd", &table),
            Err(HuffmanError::MissingCode(b'd'))
        ));
    }

    #[test]
    fn encoding_is_deterministic() {
        let data = b"to be or not to be, that is the question";
        let first = encode(data).unwrap();
        let second = encode(data).unwrap();
        assert_eq!(first.bits, second.bits);
        assert_eq!(first.serialized_tree(), second.serialized_tree());
    }
}
