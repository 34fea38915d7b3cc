//! Static Huffman coding over the payload that move-to-front produces.
//!
//! Unlike an adaptive scheme that rebuilds its tree as it goes, this
//! stage builds one frequency table from the whole payload up front,
//! serialises the resulting trie, and then encodes the payload against a
//! fixed code table. The trie is written to the wire in preorder: a `1`
//! bit announces a leaf followed by its 8-bit symbol, a `0` bit announces
//! an internal node followed by its two children, left then right. That
//! is sufficient to rebuild the exact same tree on the decode side with
//! no symbol-frequency information at all.
//!
//! A payload over a single distinct byte value is a degenerate one-node
//! trie; such a symbol is assigned the zero-length code and the payload
//! section is skipped entirely, since its length is already implied by
//! the count recorded ahead of it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::Cursor;

use crate::bitio::{BitReader,BitWriter};
use crate::{Error,DYNERR};

enum Node {
    Leaf(u8),
    Internal(Box<Node>,Box<Node>)
}

struct HeapEntry {
    freq: u64,
    /// breaks freq ties deterministically so encoder and decoder agree
    /// on trie shape without needing to transmit tie-break order
    seq: u64,
    node: Node
}

impl PartialEq for HeapEntry {
    fn eq(&self,other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}
impl Eq for HeapEntry {}
impl Ord for HeapEntry {
    fn cmp(&self,other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; we want the smallest frequency out first
        other.freq.cmp(&self.freq).then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self,other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn build_trie(payload: &[u8]) -> Option<Node> {
    let mut freq = [0u64;256];
    for &b in payload {
        freq[b as usize] += 1;
    }
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();
    let mut seq = 0u64;
    for sym in 0..256u16 {
        if freq[sym as usize] > 0 {
            heap.push(HeapEntry { freq: freq[sym as usize], seq, node: Node::Leaf(sym as u8) });
            seq += 1;
        }
    }
    if heap.is_empty() {
        return None;
    }
    if heap.len() == 1 {
        return Some(heap.pop().unwrap().node);
    }
    while heap.len() > 1 {
        let a = heap.pop().unwrap();
        let b = heap.pop().unwrap();
        let combined = HeapEntry {
            freq: a.freq + b.freq,
            seq,
            node: Node::Internal(Box::new(a.node),Box::new(b.node))
        };
        seq += 1;
        heap.push(combined);
    }
    Some(heap.pop().unwrap().node)
}

/// A code is a sequence of bits, stored MSB-first in the low `len` bits
/// of `bits`.
#[derive(Clone,Copy,Default)]
struct Code {
    bits: u32,
    len: u8
}

fn build_codes(node: &Node,prefix: Code,table: &mut [Option<Code>;256]) {
    match node {
        Node::Leaf(sym) => {
            table[*sym as usize] = Some(prefix);
        },
        Node::Internal(left,right) => {
            let mut l = prefix;
            l.bits = (l.bits << 1) | 0;
            l.len += 1;
            build_codes(left,l,table);
            let mut r = prefix;
            r.bits = (r.bits << 1) | 1;
            r.len += 1;
            build_codes(right,r,table);
        }
    }
}

fn write_trie<W: std::io::Write>(node: &Node,w: &mut BitWriter<W>) -> Result<(),DYNERR> {
    match node {
        Node::Leaf(sym) => {
            w.write_bit(true)?;
            w.write_byte(*sym)?;
        },
        Node::Internal(left,right) => {
            w.write_bit(false)?;
            write_trie(left,w)?;
            write_trie(right,w)?;
        }
    }
    Ok(())
}

fn read_trie<R: std::io::Read>(r: &mut BitReader<R>) -> Result<Node,DYNERR> {
    if r.read_bit()? {
        Ok(Node::Leaf(r.read_byte()?))
    } else {
        let left = read_trie(r)?;
        let right = read_trie(r)?;
        Ok(Node::Internal(Box::new(left),Box::new(right)))
    }
}

/// Encode `payload`. Wire format: the serialised trie, a `u32` payload
/// length, then the bit-packed codes in payload order. An empty payload
/// produces an empty archive with no trie at all.
pub fn compress(payload: &[u8]) -> Result<Vec<u8>,DYNERR> {
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    let root = build_trie(payload).ok_or(Error::EmptyAlphabet)?;
    let mut table: [Option<Code>;256] = [None;256];
    build_codes(&root,Code::default(),&mut table);
    let distinct_symbols = table.iter().filter(|c| c.is_some()).count();
    log::debug!("huffman trie over {} distinct symbols",distinct_symbols);
    if distinct_symbols == 1 {
        log::debug!("single-symbol short-circuit: payload encodes with zero-bit codes");
    }

    let mut w = BitWriter::new(Vec::new());
    write_trie(&root,&mut w)?;
    w.write_u32(payload.len() as u32)?;
    for &b in payload {
        let code = table[b as usize].expect("every payload byte has a code");
        for i in (0..code.len).rev() {
            w.write_bit((code.bits >> i) & 1 != 0)?;
        }
    }
    w.close()?;
    Ok(w.into_inner())
}

/// Invert [`compress`]. An empty archive decodes to an empty payload.
pub fn expand(archive: &[u8]) -> Result<Vec<u8>,DYNERR> {
    if archive.is_empty() {
        return Ok(Vec::new());
    }
    let mut r = BitReader::new(Cursor::new(archive));
    let root = read_trie(&mut r)?;
    let len = r.read_u32()? as usize;

    // Single-leaf trie: the whole payload is that one byte, no bits follow.
    if let Node::Leaf(sym) = root {
        log::debug!("single-symbol short-circuit: filling {} copies of {}",len,sym);
        return Ok(vec![sym;len]);
    }

    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        let mut node = &root;
        loop {
            match node {
                Node::Leaf(sym) => {
                    out.push(*sym);
                    break;
                },
                Node::Internal(left,right) => {
                    node = if r.read_bit()? { right } else { left };
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_payload_roundtrips() {
        // compact way to write a payload with repeated and one-off bytes
        // without a literal Vec of forty comma-separated numbers
        let payload = hex::decode("0001027f80fdfeff0001027f80fdfeff0001027f").unwrap();
        let archive = compress(&payload).unwrap();
        assert_eq!(expand(&archive).unwrap(),payload);
    }

    #[test]
    fn empty_payload_roundtrips_to_empty_archive() {
        let archive = compress(&[]).unwrap();
        assert!(archive.is_empty());
        assert_eq!(expand(&archive).unwrap(),Vec::<u8>::new());
    }

    #[test]
    fn single_distinct_symbol_gets_zero_bit_code() {
        let payload = vec![42u8;100];
        let archive = compress(&payload).unwrap();
        assert_eq!(expand(&archive).unwrap(),payload);
    }

    #[test]
    fn two_symbols_roundtrip() {
        let payload = b"aaaaaaaaaabbbbb".to_vec();
        let archive = compress(&payload).unwrap();
        assert_eq!(expand(&archive).unwrap(),payload);
    }

    #[test]
    fn every_byte_value_once_roundtrips() {
        let payload: Vec<u8> = (0..=255u8).collect();
        let archive = compress(&payload).unwrap();
        assert_eq!(expand(&archive).unwrap(),payload);
    }

    #[test]
    fn skewed_frequencies_roundtrip() {
        let mut payload = vec![0u8;1000];
        for (i,b) in payload.iter_mut().enumerate() {
            *b = if i % 50 == 0 { 7 } else { 1 };
        }
        let archive = compress(&payload).unwrap();
        assert_eq!(expand(&archive).unwrap(),payload);
        // a skewed distribution should compress well below one byte per symbol
        assert!(archive.len() < payload.len());
    }

    #[test]
    fn single_byte_payload() {
        let payload = vec![9u8];
        let archive = compress(&payload).unwrap();
        assert_eq!(expand(&archive).unwrap(),payload);
    }
}
