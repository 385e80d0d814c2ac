use fabric_dns_domain::Fqdn;

#[test]
fn test_canonicalization_adds_trailing_dot_and_lowercases() {
    assert_eq!(Fqdn::from_name("Host.Example.Com").as_str(), "host.example.com.");
    assert_eq!(Fqdn::from_name("host.example.com.").as_str(), "host.example.com.");
}

#[test]
fn test_canonicalization_is_idempotent() {
    let once = Fqdn::from_name("Node-1.Fabric.Internal");
    let twice = Fqdn::from_name(once.as_str());
    assert_eq!(once, twice);
}

#[test]
fn test_mixed_case_and_trailing_dot_yield_same_value() {
    assert_eq!(
        Fqdn::from_name("Host.Example.com"),
        Fqdn::from_name("host.example.com.")
    );
}

#[test]
fn test_suffix_match_on_label_boundary() {
    let zone = Fqdn::from_name("fabric.internal");
    assert!(zone.is_suffix_of(&Fqdn::from_name("n1.fabric.internal")));
    assert!(zone.is_suffix_of(&Fqdn::from_name("fabric.internal")));
    assert!(!zone.is_suffix_of(&Fqdn::from_name("notfabric.internal")));
    assert!(!zone.is_suffix_of(&Fqdn::from_name("internal")));
}

#[test]
fn test_root_is_suffix_of_everything() {
    let root = Fqdn::root();
    assert!(root.is_suffix_of(&Fqdn::from_name("anything.example.com")));
    assert!(root.is_root());
}

#[test]
fn test_prepend_label() {
    let zone = Fqdn::from_name("bootstrap.fabric.internal");
    let name = zone.prepend_label("n1").unwrap();
    assert_eq!(name.as_str(), "n1.bootstrap.fabric.internal.");
}

#[test]
fn test_prepend_label_rejects_dotted_or_empty_labels() {
    let zone = Fqdn::from_name("fabric.internal");
    assert!(zone.prepend_label("a.b").is_err());
    assert!(zone.prepend_label("").is_err());
}

#[test]
fn test_label_count() {
    assert_eq!(Fqdn::root().label_count(), 0);
    assert_eq!(Fqdn::from_name("fabric.internal").label_count(), 2);
    assert_eq!(Fqdn::from_name("bootstrap.fabric.internal.").label_count(), 3);
}
