//! Move-to-front rank coding over the full 256-symbol byte alphabet.
//!
//! A naive `O(n*R)` linear scan, as the spec allows - the list is only
//! ever 256 entries long, so a self-adjusting structure buys nothing here
//! that a plain `Vec` scan doesn't already give for free.

/// Encode `bytes` as a sequence of ranks into the self-adjusting list.
/// Output length always equals input length.
pub fn encode(bytes: &[u8]) -> Vec<u8> {
    let mut list: Vec<u8> = (0..=255).collect();
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        let pos = list.iter().position(|&x| x == b).expect("identity list contains every byte value");
        out.push(pos as u8);
        list.remove(pos);
        list.insert(0,b);
    }
    out
}

/// Invert `encode`.
pub fn decode(ranks: &[u8]) -> Vec<u8> {
    let mut list: Vec<u8> = (0..=255).collect();
    let mut out = Vec::with_capacity(ranks.len());
    for &p in ranks {
        let b = list[p as usize];
        out.push(b);
        list.remove(p as usize);
        list.insert(0,b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_length() {
        let data = b"abracadabra".to_vec();
        let encoded = encode(&data);
        assert_eq!(encoded.len(),data.len());
        assert_eq!(decode(&encoded),data);
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode(&[]),Vec::<u8>::new());
        assert_eq!(decode(&[]),Vec::<u8>::new());
    }

    #[test]
    fn repeated_byte_is_all_zero_after_first() {
        let data = vec![5u8;10];
        let encoded = encode(&data);
        assert_eq!(encoded[0],5);
        assert!(encoded[1..].iter().all(|&r| r == 0));
        assert_eq!(decode(&encoded),data);
    }

    #[test]
    fn every_byte_value_once() {
        let data: Vec<u8> = (0..=255).collect();
        let encoded = encode(&data);
        assert_eq!(decode(&encoded),data);
    }
}
