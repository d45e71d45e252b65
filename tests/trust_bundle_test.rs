//! Trust Bundle Integration Tests

use vessel_push::trust::{TrustBundle, PRIMARY_CA_FILE, SECONDARY_CA_FILE};

#[test]
fn test_both_files_absent() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = TrustBundle::load(dir.path());

    assert!(bundle.is_empty());
    assert!(bundle.primary().is_none());
    assert!(bundle.secondary().is_none());
}

#[test]
fn test_primary_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(PRIMARY_CA_FILE), b"primary cert bytes").unwrap();

    let bundle = TrustBundle::load(dir.path());
    assert_eq!(bundle.primary(), Some(b"primary cert bytes".as_slice()));
    assert!(bundle.secondary().is_none());
    assert_eq!(bundle.certificates().count(), 1);
}

#[test]
fn test_secondary_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(SECONDARY_CA_FILE), b"sub cert bytes").unwrap();

    let bundle = TrustBundle::load(dir.path());
    assert!(bundle.primary().is_none());
    assert_eq!(bundle.secondary(), Some(b"sub cert bytes".as_slice()));
}

#[test]
fn test_certificates_iterate_primary_first() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(PRIMARY_CA_FILE), b"primary").unwrap();
    std::fs::write(dir.path().join(SECONDARY_CA_FILE), b"secondary").unwrap();

    let bundle = TrustBundle::load(dir.path());
    let certs: Vec<&[u8]> = bundle.certificates().collect();
    assert_eq!(certs, vec![b"primary".as_slice(), b"secondary".as_slice()]);
}

#[test]
fn test_bundle_is_immutable_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(PRIMARY_CA_FILE), b"v1").unwrap();

    let bundle = TrustBundle::load(dir.path());
    std::fs::write(dir.path().join(PRIMARY_CA_FILE), b"v2").unwrap();

    // Loaded once; later changes on disk are not observed.
    assert_eq!(bundle.primary(), Some(b"v1".as_slice()));
}
