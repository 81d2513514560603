//! Property tests for document assembly.

use proptest::prelude::*;

use texrun::infrastructure::fs::concat_files;
use texrun::ContentHash;

fn bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..512)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The assembled document is exactly header ++ body ++ footer.
    #[test]
    fn property_assembly_is_ordered_concatenation(
        header in bytes(),
        body in bytes(),
        footer in bytes(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let (h, b, f) = (dir.path().join("h"), dir.path().join("b"), dir.path().join("f"));
        std::fs::write(&h, &header).unwrap();
        std::fs::write(&b, &body).unwrap();
        std::fs::write(&f, &footer).unwrap();
        let out = dir.path().join("doc.tex");

        let written = concat_files(&[h.as_path(), b.as_path(), f.as_path()], &out).unwrap();

        let expected: Vec<u8> = [header, body, footer].concat();
        prop_assert_eq!(written as usize, expected.len());
        prop_assert_eq!(std::fs::read(&out).unwrap(), expected);
    }

    /// PROPERTY: Re-assembling identical inputs yields an identical hash,
    /// even when the output already held other content.
    #[test]
    fn property_assembly_is_deterministic(
        header in bytes(),
        body in bytes(),
        stale in bytes(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let (h, b) = (dir.path().join("h"), dir.path().join("b"));
        std::fs::write(&h, &header).unwrap();
        std::fs::write(&b, &body).unwrap();
        let out = dir.path().join("doc.tex");

        concat_files(&[h.as_path(), b.as_path()], &out).unwrap();
        let first = ContentHash::from_file(&out).unwrap();

        std::fs::write(&out, &stale).unwrap();
        concat_files(&[h.as_path(), b.as_path()], &out).unwrap();
        let second = ContentHash::from_file(&out).unwrap();

        prop_assert_eq!(first.clone(), second);
        prop_assert_eq!(first, ContentHash::from_bytes(&[header, body].concat()));
    }
}
