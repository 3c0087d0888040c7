use super::*;

#[test]
fn parse_dimension_accepts_numbers_and_px() {
    assert_eq!(parse_dimension("24").unwrap(), 24.0);
    assert_eq!(parse_dimension("24px").unwrap(), 24.0);
    assert_eq!(parse_dimension("83.5").unwrap(), 83.5);
}

#[test]
fn parse_dimension_defaults_empty_and_zero() {
    assert_eq!(parse_dimension("").unwrap(), DEFAULT_DIMENSION);
    assert_eq!(parse_dimension("0").unwrap(), DEFAULT_DIMENSION);
    assert_eq!(parse_dimension("0px").unwrap(), DEFAULT_DIMENSION);
}

#[test]
fn parse_dimension_rejects_malformed() {
    assert_eq!(
        parse_dimension("100%"),
        Err(InvalidDimension("100%".to_string()))
    );
    assert!(parse_dimension("10em").is_err());
    assert!(parse_dimension("px").is_err());
    assert!(parse_dimension("inf").is_err());
}

#[test]
fn svg_size_reads_root_attributes() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" height="150px" width="64"><g width="1"/></svg>"#;
    let size = parse_svg_size(svg, Path::new("home.svg")).unwrap();
    assert_eq!(
        size,
        SvgSize {
            height: 150.0,
            width: 64.0
        }
    );
}

#[test]
fn svg_size_defaults_when_undeclared() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"></svg>"#;
    let size = parse_svg_size(svg, Path::new("app.svg")).unwrap();
    assert_eq!(size.height, DEFAULT_DIMENSION);
    assert_eq!(size.width, DEFAULT_DIMENSION);
}

#[test]
fn svg_size_tolerates_doctype() {
    let svg = br#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"/>"#;
    let size = parse_svg_size(svg, Path::new("d.svg")).unwrap();
    assert_eq!((size.height, size.width), (10.0, 20.0));
}

#[test]
fn svg_size_errors_name_the_source() {
    let err = parse_svg_size(br#"<svg height="tall"/>"#, Path::new("bad.svg")).unwrap_err();
    assert!(matches!(err, CatalogError::SourceParse { .. }));
    let msg = err.to_string();
    assert!(msg.contains("bad.svg"), "{msg}");
    assert!(msg.contains("failed to parse dim"), "{msg}");

    let err = parse_svg_size(b"<svg", Path::new("cut.svg")).unwrap_err();
    assert!(err.to_string().contains("failed to parse svg"));
}
