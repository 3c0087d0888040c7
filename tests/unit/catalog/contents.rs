use super::*;

#[test]
fn image_omits_empty_optional_fields() {
    let image = Image {
        filename: "home-1x.png".to_string(),
        idiom: "universal".to_string(),
        scale: "1x".to_string(),
        ..Image::default()
    };
    let json = serde_json::to_value(&image).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "filename": "home-1x.png",
            "idiom": "universal",
            "scale": "1x",
        })
    );
}

#[test]
fn image_field_order_is_stable() {
    let image = Image {
        filename: "a.png".to_string(),
        size: "29x29".to_string(),
        idiom: "iphone".to_string(),
        scale: "2x".to_string(),
        ..Image::default()
    };
    let text = serde_json::to_string(&image).unwrap();
    assert_eq!(
        text,
        r#"{"filename":"a.png","size":"29x29","idiom":"iphone","scale":"2x"}"#
    );
}

#[test]
fn image_keeps_platform_hints_through_json() {
    let text = r#"{
        "filename": "x.png",
        "idiom": "watch",
        "screen-width": "<=145",
        "width-class": "compact",
        "unassigned": true,
        "alignment-insets": {"top": 1}
    }"#;
    let image: Image = serde_json::from_str(text).unwrap();
    assert_eq!(image.screen_width, "<=145");
    assert_eq!(image.width_class, "compact");
    assert!(image.unassigned);
    assert_eq!(image.alignment_insets["top"], serde_json::json!(1));

    let back = serde_json::to_value(&image).unwrap();
    assert_eq!(back["screen-width"], "<=145");
    assert!(back.get("height-class").is_none());
}

#[test]
fn group_properties_omit_empty_tags() {
    let doc = GroupDoc {
        info: CatalogInfo::default(),
        properties: GroupProperties {
            provides_namespace: true,
            ..GroupProperties::default()
        },
    };
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json["properties"],
        serde_json::json!({"provides-namespace": true})
    );
    assert_eq!(json["info"]["version"], 1);
}

#[test]
fn image_set_accepts_legacy_properties_key() {
    let text = r#"{
        "info": {"author": "xcode", "version": 1},
        "Properties": {"on-demand-resource-tags": ["level1"]},
        "images": []
    }"#;
    let doc: ImageSetDoc = serde_json::from_str(text).unwrap();
    assert_eq!(doc.info.author, "xcode");
    assert_eq!(doc.properties.on_demand_resource_tags, vec!["level1"]);
}

#[test]
fn read_missing_contents_is_none() {
    let tmp = tempfile::tempdir().unwrap();
    let doc: Option<CatalogDoc> = read_contents(tmp.path()).unwrap();
    assert!(doc.is_none());
}

#[test]
fn read_corrupt_contents_is_metadata_error() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join(CONTENTS_FILE), b"{ not json").unwrap();
    let err = read_contents::<CatalogDoc>(tmp.path()).unwrap_err();
    assert!(matches!(err, CatalogError::MetadataRead { .. }));
}

#[test]
fn write_then_read_contents() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = CatalogDoc {
        info: CatalogInfo {
            author: "someone".to_string(),
            version: 7,
        },
    };
    write_contents(tmp.path(), &doc).unwrap();
    let text = fs::read_to_string(tmp.path().join(CONTENTS_FILE)).unwrap();
    assert!(text.contains("\n  \"info\": {"), "{text}");

    let back: CatalogDoc = read_contents(tmp.path()).unwrap().unwrap();
    assert_eq!(back.info, doc.info);
}

#[test]
fn image_set_reads_unfilled_xcode_slots() {
    let text = r#"{
        "images": [
            {"idiom": "iphone", "scale": "2x", "size": "29x29"},
            {"filename": "icon-40.png", "idiom": "iphone", "scale": "2x", "size": "40x40"}
        ],
        "info": {"author": "xcode", "version": 1}
    }"#;
    let doc: ImageSetDoc = serde_json::from_str(text).unwrap();
    assert_eq!(doc.images.len(), 2);
    assert_eq!(doc.images[0].filename, "");
    assert_eq!(doc.images[0].size, "29x29");
    assert_eq!(doc.images[1].filename, "icon-40.png");
}

#[test]
fn contents_without_info_get_default_stamp() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join(CONTENTS_FILE),
        br#"{"properties": {"provides-namespace": true}}"#,
    )
    .unwrap();
    let doc: GroupDoc = read_contents(tmp.path()).unwrap().unwrap();
    assert_eq!(doc.info, CatalogInfo::default());
    assert!(doc.properties.provides_namespace);

    let set: ImageSetDoc = serde_json::from_str(r#"{"images": []}"#).unwrap();
    assert_eq!(set.info, CatalogInfo::default());
}
