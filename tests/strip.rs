use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use pngflat::codec::WriteMode;
use pngflat::color::Background;
use pngflat::report::{BatchReport, Outcome};
use pngflat::strip::{find_pngs, strip_dir, strip_file, StripOptions};
use pngflat::Error;

fn write_rgb(path: &Path) -> RgbImage {
    let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 40, y as u8 * 90, 7]));
    img.save(path).unwrap();
    img
}

fn write_rgba(path: &Path) -> RgbaImage {
    let img = RgbaImage::from_fn(3, 2, |x, y| {
        Rgba([200, x as u8 * 50, y as u8 * 100, (x * 120) as u8])
    });
    img.save(path).unwrap();
    img
}

fn outcome_of<'a>(report: &'a BatchReport, file_name: &str) -> Option<&'a Outcome> {
    report
        .files
        .iter()
        .find(|f| f.path.file_name().is_some_and(|n| n == file_name))
        .map(|f| &f.outcome)
}

fn lerp(src: u8, alpha: u8, bg: u8) -> u8 {
    let a = alpha as f64 / 255.0;
    (src as f64 * a + bg as f64 * (1.0 - a)).round() as u8
}

#[test]
fn mixed_directory_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let rgb_path = dir.path().join("plain.png");
    let rgba_path = dir.path().join("alpha.png");
    let bad_path = dir.path().join("broken.png");

    write_rgb(&rgb_path);
    let original = write_rgba(&rgba_path);
    std::fs::write(&bad_path, b"definitely not a png").unwrap();

    let rgb_before = std::fs::read(&rgb_path).unwrap();

    let report = strip_dir(dir.path(), &StripOptions::default()).unwrap();

    assert_eq!(report.files.len(), 3);
    assert_eq!(outcome_of(&report, "plain.png"), Some(&Outcome::NoAlpha));
    assert_eq!(outcome_of(&report, "alpha.png"), Some(&Outcome::Stripped));
    assert!(outcome_of(&report, "broken.png").unwrap().is_failed());
    assert_eq!((report.stripped(), report.skipped(), report.failed()), (1, 1, 1));

    // RGB file untouched byte for byte, corrupted file untouched.
    assert_eq!(std::fs::read(&rgb_path).unwrap(), rgb_before);
    assert_eq!(std::fs::read(&bad_path).unwrap(), b"definitely not a png");

    let stripped = image::open(&rgba_path).unwrap();
    assert!(!stripped.color().has_alpha());
    let stripped = stripped.to_rgb8();
    assert_eq!(stripped.dimensions(), original.dimensions());
    for (x, y, p) in original.enumerate_pixels() {
        let out = stripped.get_pixel(x, y);
        for c in 0..3 {
            assert_eq!(out[c], lerp(p[c], p[3], 255), "pixel ({x},{y}) channel {c}");
        }
    }
}

#[test]
fn second_run_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_rgba(&a);
    write_rgb(&b);

    strip_dir(dir.path(), &StripOptions::default()).unwrap();
    let after_first = (std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());

    let report = strip_dir(dir.path(), &StripOptions::default()).unwrap();
    let after_second = (std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());

    assert_eq!(after_first, after_second);
    assert!(report.files.iter().all(|f| f.outcome == Outcome::NoAlpha));
}

#[test]
fn missing_directory_fails_up_front() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = strip_dir(&missing, &StripOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingDirectory { .. }));
    assert!(!missing.exists());
}

#[test]
fn file_path_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.png");
    write_rgb(&file);

    assert!(matches!(
        find_pngs(&file),
        Err(Error::MissingDirectory { .. })
    ));
}

#[test]
fn only_png_files_are_considered() {
    let dir = tempfile::tempdir().unwrap();
    write_rgba(&dir.path().join("upper.PNG"));
    write_rgba(&dir.path().join("lower.png"));
    std::fs::write(dir.path().join("notes.txt"), b"hi").unwrap();
    std::fs::create_dir(dir.path().join("nested.png")).unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    write_rgba(&dir.path().join("sub").join("deep.png"));

    let mut names: Vec<String> = find_pngs(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(names, ["lower.png", "upper.PNG"]);
}

#[test]
fn empty_directory_gives_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = strip_dir(dir.path(), &StripOptions::default()).unwrap();
    assert!(report.files.is_empty());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.png");
    write_rgba(&path);
    let before = std::fs::read(&path).unwrap();

    let options = StripOptions {
        dry_run: true,
        ..StripOptions::default()
    };
    let report = strip_dir(dir.path(), &options).unwrap();

    assert_eq!(outcome_of(&report, "a.png"), Some(&Outcome::WouldStrip));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn direct_write_mode_strips_too() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.png");
    RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 0])).save(&path).unwrap();

    let options = StripOptions {
        background: Background::BLACK,
        write_mode: WriteMode::Direct,
        dry_run: false,
    };
    assert_eq!(strip_file(&path, &options), Outcome::Stripped);

    let out = image::open(&path).unwrap();
    assert!(!out.color().has_alpha());
    assert!(out.to_rgb8().pixels().all(|p| *p == Rgb([0, 0, 0])));
}

#[test]
fn atomic_write_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    write_rgba(&dir.path().join("a.png"));

    strip_dir(dir.path(), &StripOptions::default()).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn report_serializes_with_status_tags() {
    let dir = tempfile::tempdir().unwrap();
    write_rgb(&dir.path().join("plain.png"));
    std::fs::write(dir.path().join("bad.png"), b"x").unwrap();

    let report = strip_dir(dir.path(), &StripOptions::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    for file in files {
        match file["status"].as_str().unwrap() {
            "no_alpha" => assert!(file["path"].as_str().unwrap().ends_with("plain.png")),
            "failed" => assert!(file["error"].as_str().is_some()),
            other => panic!("unexpected status {other}"),
        }
    }
}

#[cfg(unix)]
#[test]
fn write_failure_is_recorded_and_batch_continues() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_rgba(&a);
    write_rgba(&b);
    let before = (std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());

    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore directory permissions; nothing to observe then.
    let can_write = std::fs::File::create(dir.path().join("x")).is_ok();
    if can_write {
        std::fs::remove_file(dir.path().join("x")).unwrap();
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let report = strip_dir(dir.path(), &StripOptions::default());
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
    let report = report.unwrap();

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.failed(), 2);
    for file in &report.files {
        match &file.outcome {
            Outcome::Failed { error } => assert!(error.contains("encode"), "{error}"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
    let after = (std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    assert_eq!(after, before);
}

#[cfg(unix)]
#[test]
fn atomic_strip_writes_through_symlink() {
    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("real.png");
    let link = dir.path().join("link.png");
    write_rgba(&real);
    std::os::unix::fs::symlink(&real, &link).unwrap();

    assert_eq!(strip_file(&link, &StripOptions::default()), Outcome::Stripped);

    assert!(std::fs::symlink_metadata(&link)
        .unwrap()
        .file_type()
        .is_symlink());
    assert!(!image::open(&real).unwrap().color().has_alpha());
}
