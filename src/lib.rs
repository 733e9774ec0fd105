//! Static Huffman compression of byte streams.
//!
//! The code is derived from byte frequencies, the input is re-encoded with
//! it, and the tree's shape is stored alongside the bits so the output can be
//! decoded without any outside knowledge.
//!
//! ```
//! use huffzip::HuffmanCoder;
//!
//! let mut coder = HuffmanCoder::new();
//! let bits = coder.encode(b"abracadabra")?;
//! let tree = coder.serialize_tree();
//!
//! let mut decoder = HuffmanCoder::new();
//! assert_eq!(decoder.decode(&bits, Some(tree.as_slice()))?, b"abracadabra");
//! # Ok::<(), huffzip::HuffmanError>(())
//! ```

pub mod bits;
pub mod codec;
pub mod codes;
pub mod compress;
pub mod container;
pub mod error;
pub mod frequency;
pub mod logger;
pub mod report;
pub mod serialize;
pub mod tree;

pub use bits::BitString;
pub use codec::{Encoded, HuffmanCoder};
pub use codes::CodeTable;
pub use container::Container;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanNode, HuffmanTree};
