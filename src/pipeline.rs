//! Composes suffix array, BWT, move-to-front and Huffman stages into one
//! archive format, and is the only module that touches the filesystem.
//!
//! Archive layout is `Huffman(MTF(primary_index_be32 ‖ L))`: the BWT's
//! own wire form - a 4-byte big-endian primary index followed by the
//! last-column bytes - is itself the buffer that move-to-front and then
//! Huffman run over, not a header sitting outside them. An empty input
//! short-circuits to a genuinely empty archive before any of that runs -
//! running zero bytes through BWT would still produce a 4-byte primary
//! index with nothing to decode it against, a pointless special case.

use crate::{bwt,huffman,mtf,Error,DYNERR};

/// Compress an in-memory buffer into an archive.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>,DYNERR> {
    if data.is_empty() {
        log::info!("empty input, writing empty archive");
        return Ok(Vec::new());
    }
    log::info!("transforming {} bytes",data.len());
    let transformed = bwt::transform(data);
    log::debug!("bwt primary index is {}",transformed.primary);

    let mut bwt_wire = Vec::with_capacity(4 + transformed.last_column.len());
    bwt_wire.extend_from_slice(&(transformed.primary as u32).to_be_bytes());
    bwt_wire.extend_from_slice(&transformed.last_column);

    let ranks = mtf::encode(&bwt_wire);
    let archive = huffman::compress(&ranks)?;
    log::info!("archive is {} bytes",archive.len());
    Ok(archive)
}

/// Invert [`compress_bytes`].
pub fn expand_bytes(archive: &[u8]) -> Result<Vec<u8>,DYNERR> {
    if archive.is_empty() {
        log::info!("empty archive, writing empty output");
        return Ok(Vec::new());
    }
    let ranks = huffman::expand(archive)?;
    let bwt_wire = mtf::decode(&ranks);
    if bwt_wire.len() < 4 {
        return Err(Box::new(Error::MalformedArchive));
    }
    let primary = u32::from_be_bytes(bwt_wire[0..4].try_into().unwrap()) as usize;
    let last_column = &bwt_wire[4..];
    log::debug!("bwt primary index is {}",primary);
    let data = bwt::inverse(last_column,primary);
    log::info!("expanded to {} bytes",data.len());
    Ok(data)
}

/// Compress the file at `path_in` into `path_out`.
pub fn compress_file(path_in: &str,path_out: &str) -> Result<(u64,u64),DYNERR> {
    log::info!("compressing {}",path_in);
    let data = std::fs::read(path_in)?;
    let archive = compress_bytes(&data)?;
    std::fs::write(path_out,&archive)?;
    Ok((data.len() as u64,archive.len() as u64))
}

/// Expand the archive at `path_in` into `path_out`.
pub fn expand_file(path_in: &str,path_out: &str) -> Result<(u64,u64),DYNERR> {
    log::info!("expanding {}",path_in);
    let archive = std::fs::read(path_in)?;
    let data = expand_bytes(&archive)?;
    std::fs::write(path_out,&data)?;
    Ok((archive.len() as u64,data.len() as u64))
}
