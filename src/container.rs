//! On-disk layout of a compressed file.
//!
//! ```text
//! u64 tree_len | tree bytes | u64 packed_len | u64 bit_count | packed bytes
//! ```
//!
//! All integers are little-endian.

use std::io::{self, Read, Write};

use crate::bits::{self, BitString};
use crate::codec::Encoded;
use crate::error::{HuffmanError, Result};

/// Bytes taken by the three fixed-width fields.
pub const HEADER_LEN: usize = 3 * size_of::<u64>();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub tree: Vec<u8>,
    pub bit_count: u64,
    pub packed: Vec<u8>,
}

impl Container {
    pub fn from_encoded(encoded: &Encoded) -> io::Result<Self> {
        Ok(Self {
            tree: encoded.serialized_tree(),
            bit_count: encoded.bits.len() as u64,
            packed: bits::pack(&encoded.bits)?,
        })
    }

    /// Size of the container once written.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.tree.len() + self.packed.len()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&(self.tree.len() as u64).to_le_bytes())?;
        writer.write_all(&self.tree)?;
        writer.write_all(&(self.packed.len() as u64).to_le_bytes())?;
        writer.write_all(&self.bit_count.to_le_bytes())?;
        writer.write_all(&self.packed)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let tree_len = read_u64(reader, "tree length")?;
        let tree = read_payload(reader, tree_len, "serialized tree")?;
        let packed_len = read_u64(reader, "packed length")?;
        let bit_count = read_u64(reader, "bit count")?;
        let packed = read_payload(reader, packed_len, "packed data")?;

        let mut rest = Vec::new();
        reader.take(1).read_to_end(&mut rest)?;
        if !rest.is_empty() {
            return Err(HuffmanError::TrailingContainerBytes);
        }

        if bit_count > packed.len() as u64 * 8 {
            return Err(HuffmanError::BitCountOverflow {
                bits: bit_count,
                bytes: packed.len(),
            });
        }

        Ok(Self {
            tree,
            bit_count,
            packed,
        })
    }

    pub fn unpack_bits(&self) -> Result<BitString> {
        bits::unpack(&self.packed, self.bit_count)
    }
}

fn read_u64<R: Read>(reader: &mut R, field: &'static str) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => HuffmanError::TruncatedContainer(field),
        _ => HuffmanError::Io(e),
    })?;
    Ok(u64::from_le_bytes(buf))
}

// The length comes from untrusted input, so read through `take` rather than
// allocating it up front.
fn read_payload<R: Read>(reader: &mut R, len: u64, field: &'static str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) < len {
        return Err(HuffmanError::TruncatedContainer(field));
    }
    Ok(buf)
}
