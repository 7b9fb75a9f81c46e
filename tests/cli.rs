use std::process::Command;

fn catalog_report() -> Command {
    Command::new(env!("CARGO_BIN_EXE_catalog-report"))
}

#[test]
fn usage_error_exits_with_two() {
    let out = catalog_report().output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("usage: catalog-report"));
    assert!(!stderr.contains("Cannot process this file"));

    let out = catalog_report().args(["a.csv", "b.csv"]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn unreadable_file_exits_with_one() {
    let out = catalog_report().arg("catalog.xlsx").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Cannot process this file"));
}
