use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile;

type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// small xorshift PRNG, fixed seed, so the fixture is reproducible without
/// pulling in a `rand` dependency for a single integration test
fn pseudo_random_bytes(seed: u64,len: usize) -> Vec<u8> {
    let mut state = seed;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state & 0xff) as u8
    };
    (0..len).map(|_| next()).collect()
}

fn roundtrip_via_cli(dir: &std::path::Path,name: &str,contents: &[u8]) -> STDRESULT {
    let in_path = dir.join(name);
    std::fs::write(&in_path,contents)?;

    Command::cargo_bin("burrows")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .assert()
        .success();

    let archive_path = dir.join(format!("{}.burrows",name));
    assert!(archive_path.exists());

    std::fs::remove_file(&in_path)?;
    Command::cargo_bin("burrows")?
        .arg("expand")
        .arg("-i").arg(&archive_path)
        .assert()
        .success();

    let restored = std::fs::read(&in_path)?;
    assert_eq!(restored,contents);
    Ok(())
}

#[test]
fn empty_file_roundtrips() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    roundtrip_via_cli(dir.path(),"empty.txt",b"")
}

#[test]
fn small_text_roundtrips() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    roundtrip_via_cli(dir.path(),"small.txt",b"abracadabra!")
}

#[test]
fn repetitive_text_roundtrips() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let text = "the quick brown fox jumps over the lazy dog. ".repeat(200);
    roundtrip_via_cli(dir.path(),"repetitive.txt",text.as_bytes())
}

#[test]
fn random_buffer_roundtrips() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let data = pseudo_random_bytes(0x9e37_79b9_7f4a_7c15,10 * 1024);
    roundtrip_via_cli(dir.path(),"random.bin",&data)
}

#[test]
fn expand_refuses_wrong_extension() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let bad_path = dir.path().join("not_an_archive.txt");
    std::fs::write(&bad_path,b"whatever")?;
    Command::cargo_bin("burrows")?
        .arg("expand")
        .arg("-i").arg(&bad_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("FileFormatMismatch"));
    Ok(())
}
