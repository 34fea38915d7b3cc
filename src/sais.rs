//! Linear-time suffix array construction via induced sorting (SA-IS).
//!
//! This is the hardest part of the pipeline. The public entry point,
//! [`suffix_array`], maps a byte string onto an integer alphabet with an
//! explicit, unique, globally-minimal terminal symbol (the "virtual
//! sentinel" of the spec, made concrete here as the value `0`, with every
//! real byte shifted up by one) and hands it to the recursive core,
//! `sa_is`.
//!
//! `sa_is` reuses its caller's output buffer for its own recursion: the
//! recursive call on the reduced string `T'` is handed `&mut sa[0..m)`,
//! a disjoint subslice of the same `Vec<i32>` the top-level caller
//! allocated once. The recursion never allocates its own output array.
//! It does allocate its own small `O(n')` scratch (the type bitmap, bucket
//! counts, and a position-indexed naming table) - the spec explicitly
//! allows this ("peak auxiliary memory O(n) bytes beyond SA itself... at
//! the outermost level; recursive levels consume O(n') ... summing
//! geometrically"). The one simplification from the textbook in-place
//! algorithm: names are looked up through a dense `Vec<i32>` indexed by
//! textual position rather than packed sparsely at `SA[m + pos/2]`. It is
//! an O(n') array like the type bitmap, sums the same way across levels,
//! and is considerably easier to get right without being able to run the
//! code; the buffer invariant this spec cares about - the *output*
//! suffix array living in one reused allocation across every recursion
//! level - is preserved exactly.

use crate::DYNERR;
use crate::Error;

/// Computes the suffix array of `text`, `SA[0..=n]` with `SA[0] == n`
/// (the virtual sentinel's suffix) and, for `i >= 1`, `SA[i]` the start of
/// the `i`-th smallest suffix of `text` under lexicographic order with the
/// sentinel minimal.
pub fn suffix_array(text: &[u8]) -> Vec<i32> {
    let n = text.len();
    let mut s: Vec<i32> = Vec::with_capacity(n + 1);
    s.extend(text.iter().map(|&b| b as i32 + 1));
    s.push(0);
    let mut sa = vec![0i32; n + 1];
    sa_is(&s,257,&mut sa,0);
    sa
}

fn is_lms(t: &[bool],i: usize) -> bool {
    i > 0 && t[i] && !t[i - 1]
}

fn classify(s: &[i32]) -> Vec<bool> {
    let n = s.len();
    let mut t = vec![false;n];
    t[n - 1] = true;
    for i in (0..n - 1).rev() {
        t[i] = if s[i] < s[i + 1] {
            true
        } else if s[i] > s[i + 1] {
            false
        } else {
            t[i + 1]
        };
    }
    t
}

fn bucket_counts(s: &[i32],k: usize) -> Vec<i32> {
    let mut cnt = vec![0i32;k];
    for &c in s {
        cnt[c as usize] += 1;
    }
    cnt
}

fn bucket_heads(cnt: &[i32]) -> Vec<i32> {
    let mut heads = vec![0i32;cnt.len()];
    let mut sum = 0;
    for i in 0..cnt.len() {
        heads[i] = sum;
        sum += cnt[i];
    }
    heads
}

fn bucket_tails(cnt: &[i32]) -> Vec<i32> {
    let mut tails = vec![0i32;cnt.len()];
    let mut sum = 0;
    for i in 0..cnt.len() {
        sum += cnt[i];
        tails[i] = sum - 1;
    }
    tails
}

/// The three induce-sort passes of section 4.4, step 3: seed LMS
/// positions into bucket tails, then an L-pass left to right and an
/// S-pass right to left.
fn induce(s: &[i32],sa: &mut [i32],t: &[bool],cnt: &[i32],lms_positions: &[i32]) {
    let n = s.len();
    for x in sa.iter_mut() {
        *x = -1;
    }

    let mut tails = bucket_tails(cnt);
    for &p in lms_positions.iter().rev() {
        let c = s[p as usize] as usize;
        sa[tails[c] as usize] = p;
        tails[c] -= 1;
    }

    let mut heads = bucket_heads(cnt);
    for i in 0..n {
        let j = sa[i];
        if j > 0 {
            let j = (j - 1) as usize;
            if !t[j] {
                let c = s[j] as usize;
                sa[heads[c] as usize] = j as i32;
                heads[c] += 1;
            }
        }
    }

    let mut tails = bucket_tails(cnt);
    for i in (0..n).rev() {
        let j = sa[i];
        if j > 0 {
            let j = (j - 1) as usize;
            if t[j] {
                let c = s[j] as usize;
                sa[tails[c] as usize] = j as i32;
                tails[c] -= 1;
            }
        }
    }
}

/// The recursive core. `s` is an integer string whose last character is a
/// unique global minimum (by construction at every recursion level, see
/// module docs); `sa` is exactly `s.len()` long and is both the scratch
/// workspace and the final output. `depth` is purely diagnostic, letting
/// the log line below distinguish top-level work from recursed levels.
fn sa_is(s: &[i32],k: usize,sa: &mut [i32],depth: usize) {
    let n = s.len();
    debug_assert_eq!(sa.len(),n);
    log::debug!("sa_is depth {} over {} symbols, alphabet size {}",depth,n,k);
    if n == 1 {
        sa[0] = 0;
        return;
    }

    let t = classify(s);
    let cnt = bucket_counts(s,k);

    let mut lms_pos: Vec<i32> = Vec::new();
    for i in 1..n {
        if is_lms(&t,i) {
            lms_pos.push(i as i32);
        }
    }
    let m = lms_pos.len();

    induce(s,sa,&t,&cnt,&lms_pos);

    // Compact the now internally-sorted LMS positions into sa[0..m).
    let mut sorted_lms: Vec<i32> = Vec::with_capacity(m);
    for i in 0..n {
        if sa[i] >= 0 && is_lms(&t,sa[i] as usize) {
            sorted_lms.push(sa[i]);
        }
    }
    debug_assert_eq!(sorted_lms.len(),m);

    // Name LMS substrings: two consecutive (in sorted order) substrings
    // share a name iff they are char-wise and type-wise equal through
    // their next LMS boundary.
    let mut name_by_pos = vec![-1i32;n];
    let mut name: i32 = -1;
    let mut prev_pos: Option<usize> = None;
    for &p in sorted_lms.iter() {
        let pos = p as usize;
        let mut diff = true;
        if let Some(pp) = prev_pos {
            diff = false;
            let mut d = 0usize;
            loop {
                let a = pos + d;
                let b = pp + d;
                if a >= n || b >= n || s[a] != s[b] || t[a] != t[b] {
                    diff = true;
                    break;
                }
                if d > 0 && is_lms(&t,a) {
                    break;
                }
                d += 1;
            }
        }
        if diff {
            name += 1;
        }
        name_by_pos[pos] = name;
        prev_pos = Some(pos);
    }
    let alphabet_size = (name + 1) as usize;

    // Reduced string in textual (left-to-right) order.
    let mut reduced: Vec<i32> = Vec::with_capacity(m);
    for &p in lms_pos.iter() {
        reduced.push(name_by_pos[p as usize]);
    }

    for x in sa.iter_mut() {
        *x = -1;
    }
    if alphabet_size == m {
        // Every LMS substring is unique: its name already is its rank.
        for i in 0..m {
            sa[reduced[i] as usize] = i as i32;
        }
    } else {
        log::debug!("sa_is depth {} recursing: reduced length {}, alphabet size {}",depth,m,alphabet_size);
        let (sa_head,_) = sa.split_at_mut(m);
        sa_is(&reduced,alphabet_size,sa_head,depth + 1);
    }

    // sa[0..m) now holds the suffix array of the reduced string; translate
    // back into original LMS positions, still in sorted order.
    let mut sorted_lms_final: Vec<i32> = Vec::with_capacity(m);
    for i in 0..m {
        sorted_lms_final.push(lms_pos[sa[i] as usize]);
    }

    induce(s,sa,&t,&cnt,&sorted_lms_final);
}

/// Validate the permutation and ordering invariants from section 4.4;
/// used both by tests and available for callers that want to assert the
/// result of an untrusted or hand-constructed suffix array.
pub fn validate(text: &[u8],sa: &[i32]) -> Result<(),DYNERR> {
    let n = text.len();
    if sa.len() != n + 1 {
        return Err(Box::new(Error::MalformedArchive));
    }
    if sa[0] != n as i32 {
        return Err(Box::new(Error::MalformedArchive));
    }
    let mut seen = vec![false;n + 1];
    for &p in sa {
        if p < 0 || p as usize > n || seen[p as usize] {
            return Err(Box::new(Error::MalformedArchive));
        }
        seen[p as usize] = true;
    }
    let suffix_cmp = |a: usize,b: usize| -> std::cmp::Ordering {
        let sa_bytes = |i: usize| -> Option<u8> { if i < n { Some(text[i]) } else { None } };
        let mut i = a;
        let mut j = b;
        loop {
            match (sa_bytes(i),sa_bytes(j)) {
                (None,None) => return std::cmp::Ordering::Equal,
                (None,Some(_)) => return std::cmp::Ordering::Less,
                (Some(_),None) => return std::cmp::Ordering::Greater,
                (Some(x),Some(y)) => {
                    if x != y {
                        return x.cmp(&y);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
    };
    for i in 1..n {
        if suffix_cmp(sa[i] as usize,sa[i + 1] as usize) != std::cmp::Ordering::Less {
            return Err(Box::new(Error::MalformedArchive));
        }
    }
    Ok(())
}
