use std::path::PathBuf;

use super::*;
use crate::catalog::tree::Catalog;

#[test]
fn universal_outputs_are_three_scaled_pngs() {
    let dir = PathBuf::from("Assets.xcassets/icons/home.imageset");
    let size = SvgSize {
        height: 150.0,
        width: 100.0,
    };
    let (images, tasks) = universal_outputs("home", &dir, Path::new("src/icons/home.svg"), size);

    let names: Vec<_> = images.iter().map(|i| i.filename.as_str()).collect();
    assert_eq!(names, vec!["home-1x.png", "home-2x.png", "home-3x.png"]);
    let scales: Vec<_> = images.iter().map(|i| i.scale.as_str()).collect();
    assert_eq!(scales, vec!["1x", "2x", "3x"]);
    assert!(images.iter().all(|i| i.idiom == "universal" && i.size.is_empty()));

    assert_eq!(tasks.len(), 3);
    assert_eq!(
        tasks[1],
        GenerateTask {
            scale: 2,
            height: 150.0,
            width: 100.0,
            source: PathBuf::from("src/icons/home.svg"),
            output: dir.join("home-2x.png"),
        }
    );
}

#[test]
fn app_icon_outputs_follow_the_table() {
    let dir = PathBuf::from("Assets.xcassets/AppIcon.appiconset");
    let (images, tasks) = app_icon_outputs("app", &dir, Path::new("app.svg"), &APP_ICON_SLOTS);

    assert_eq!(images.len(), 13);
    assert_eq!(tasks.len(), 13);
    assert_eq!(images[0].filename, "app-iphone-@2-29.png");
    assert_eq!(images[0].size, "29x29");
    assert_eq!(images[0].scale, "2x");
    assert_eq!(images[0].idiom, "iphone");

    let last = images.last().unwrap();
    assert_eq!(last.filename, "app-ipad-@2-83.png");
    assert_eq!(last.size, "83.5x83.5");
    assert_eq!(last.idiom, "ipad");

    let t = tasks.last().unwrap();
    assert_eq!((t.scale, t.height, t.width), (2, 83.5, 83.5));
    assert_eq!(t.output, dir.join("app-ipad-@2-83.png"));

    let idioms: std::collections::BTreeSet<_> = images.iter().map(|i| i.idiom.as_str()).collect();
    assert_eq!(idioms.into_iter().collect::<Vec<_>>(), vec!["ipad", "iphone"]);
}

#[test]
fn app_icon_outputs_accept_a_custom_table() {
    let slots = [IconSlot {
        idiom: "mac",
        scale: 1,
        size: 16.0,
    }];
    let (images, _) = app_icon_outputs("a", Path::new("d"), Path::new("a.svg"), &slots);
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].filename, "a-mac-@1-16.png");
}

#[test]
fn size_label_drops_trailing_zero() {
    assert_eq!(size_label(29.0), "29");
    assert_eq!(size_label(83.5), "83.5");
    assert_eq!(size_label(76.0), "76");
    assert_eq!(size_label(20.5), "20.5");
}

#[test]
fn check_source_skips_reading_when_up_to_date() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("home.svg");
    std::fs::write(&source, br#"<svg height="bogus"/>"#).unwrap();
    let mut catalog = Catalog::open(tmp.path().join("A.xcassets")).unwrap();
    let set = catalog.resolve_image_set("home").unwrap();

    // Stale: the malformed dimension is reported.
    let err = check_source(set, &source, 3, false).unwrap_err();
    assert!(err.to_string().contains("failed to parse dim"));

    // Up to date: no parse happens at all.
    std::fs::create_dir_all(set.dir()).unwrap();
    for n in ["a.png", "b.png", "c.png"] {
        std::fs::write(set.dir().join(n), b"").unwrap();
        filetime::set_file_mtime(
            set.dir().join(n),
            filetime::FileTime::from_unix_time(4_000_000_000, 0),
        )
        .unwrap();
        set.images.push(Image {
            filename: n.to_string(),
            ..Image::default()
        });
    }
    assert_eq!(check_source(set, &source, 3, false).unwrap(), None);
}

#[test]
fn check_source_returns_declared_size_when_stale() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("home.svg");
    std::fs::write(&source, br#"<svg height="150px" width="150px"/>"#).unwrap();
    let mut catalog = Catalog::open(tmp.path().join("A.xcassets")).unwrap();
    let set = catalog.resolve_image_set("home").unwrap();
    let size = check_source(set, &source, 3, false).unwrap().unwrap();
    assert_eq!((size.height, size.width), (150.0, 150.0));
}
