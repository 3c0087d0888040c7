use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CatalogError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CatalogError::source_parse("a.svg", "bad dim")
            .to_string()
            .contains("svg parse error: a.svg: bad dim")
    );
    assert!(
        CatalogError::missing_tool("inkscape")
            .to_string()
            .contains("missing tool:")
    );
    assert!(
        CatalogError::conversion("a.svg", "exit 1")
            .to_string()
            .contains("conversion error: a.svg")
    );
}

#[test]
fn node_wrapping_keeps_kind_and_names_node() {
    let err = CatalogError::conversion("home.svg", "boom")
        .at_node("home")
        .at_node("icons");
    assert_eq!(err.kind(), ErrorKind::Conversion);
    let msg = err.to_string();
    assert!(msg.starts_with("icons: home: "), "{msg}");
}

#[test]
fn missing_tool_is_detectable_through_wrapping() {
    let err = CatalogError::missing_tool("inkscape not installed").at_node("AppIcon");
    assert!(err.is_missing_tool());
    assert!(!CatalogError::validation("x").is_missing_tool());
}

#[test]
fn io_errors_carry_their_path() {
    let res: std::io::Result<()> = Err(std::io::Error::other("denied"));
    let err = res.at_path(Path::new("out/Contents.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Filesystem);
    assert!(err.to_string().contains("out/Contents.json"));
    assert!(err.to_string().contains("denied"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CatalogError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Other);
}
