// tests/precedence_test.rs
use rstest::rstest;
use semtag::domain::{compare_versions, VersionCandidate, VersionComparator, VersionSet};
use std::cmp::Ordering;

fn reference(a: &str, b: &str) -> Ordering {
    let a = semver::Version::parse(a).unwrap();
    let b = semver::Version::parse(b).unwrap();
    a.cmp(&b)
}

#[rstest]
#[case("1.0.0", "2.0.0")]
#[case("2.0.0", "2.1.0")]
#[case("2.1.0", "2.1.1")]
#[case("1.9.0", "1.10.0")]
#[case("1.0.0-alpha", "1.0.0")]
#[case("1.0.0-alpha", "1.0.0-alpha.1")]
#[case("1.0.0-alpha.1", "1.0.0-alpha.beta")]
#[case("1.0.0-alpha.beta", "1.0.0-beta")]
#[case("1.0.0-beta", "1.0.0-beta.2")]
#[case("1.0.0-beta.2", "1.0.0-beta.11")]
#[case("1.0.0-beta.11", "1.0.0-rc.1")]
#[case("1.0.0-rc.1", "1.0.0")]
#[case("1.0.0-9", "1.0.0-a")]
#[case("1.0.0-Z", "1.0.0-a")]
#[case("1.0.0-a.b", "1.0.0-a-b")]
#[case("0.9.9", "1.0.0-alpha")]
fn test_precedence_matches_reference(#[case] lower: &str, #[case] higher: &str) {
    assert_eq!(reference(lower, higher), Ordering::Less);
    assert_eq!(compare_versions(lower, higher).unwrap(), Ordering::Less);
    assert_eq!(compare_versions(higher, lower).unwrap(), Ordering::Greater);
}

#[test]
fn test_numeric_identifiers_beyond_u64() {
    assert_eq!(
        compare_versions("1.0.0-rc.9", "1.0.0-rc.18446744073709551616").unwrap(),
        Ordering::Less
    );
    assert_eq!(
        compare_versions("1.0.0-99999999999999999999", "1.0.0-99999999999999999998").unwrap(),
        Ordering::Greater
    );
}

#[rstest]
#[case("1.0.0")]
#[case("1.0.0-alpha.1")]
#[case("3.2.1-x-y.7.z")]
fn test_precedence_reflexive(#[case] version: &str) {
    assert_eq!(compare_versions(version, version).unwrap(), Ordering::Equal);
}

#[rstest]
#[case("1.0.0-rc.01", "1.0.0-rc.1")]
#[case("1.0.0-007", "1.0.0-7")]
fn test_leading_zero_numerics_compare_by_value(#[case] a: &str, #[case] b: &str) {
    assert_eq!(compare_versions(a, b).unwrap(), Ordering::Equal);
}

#[rstest]
#[case(&["v1.0.0", "v1.0.0-rc.1", "v0.9.0"], "v1.0.0")]
#[case(&["app-1.2.0", "app-1.10.0", "app-1.9.9"], "app-1.10.0")]
#[case(&["2.0.0-alpha", "2.0.0-alpha.1", "1.99.99"], "2.0.0-alpha.1")]
fn test_set_latest(#[case] tags: &[&str], #[case] expected: &str) {
    let candidates = tags
        .iter()
        .map(|t| VersionCandidate::from_tag(*t).unwrap())
        .collect();
    let set = VersionSet::new(candidates, VersionComparator::default());
    assert_eq!(set.latest().unwrap().tag_name, expected);
}

#[test]
fn test_sort_agrees_with_reference() {
    let versions = [
        "1.0.0-rc.1",
        "1.0.0-alpha",
        "0.1.0",
        "1.0.0",
        "1.0.0-beta.11",
        "1.0.0-alpha.beta",
        "1.0.0-beta.2",
        "1.0.0-alpha.1",
        "1.0.0-beta",
        "2.0.0",
    ];

    let mut ours: Vec<&str> = versions.to_vec();
    ours.sort_by(|a, b| compare_versions(a, b).unwrap());

    let mut expected: Vec<&str> = versions.to_vec();
    expected.sort_by(|a, b| reference(a, b));

    assert_eq!(ours, expected);
}
