//! CLI Tests for the excel2md binary

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};

fn write_sample(dir: &Path) -> Result<PathBuf, XlsxError> {
    let path = dir.join("sample.xlsx");
    let mut workbook = Workbook::new();

    let sales = workbook.add_worksheet();
    sales.set_name("产品销售")?;
    sales.write_string(0, 0, "产品")?;
    sales.write_string(0, 1, "数量")?;
    sales.write_string(1, 0, "苹果")?;
    sales.write_number(1, 1, 100.0)?;

    let staff = workbook.add_worksheet();
    staff.set_name("员工信息")?;
    staff.write_string(0, 0, "姓名")?;
    staff.write_string(1, 0, "张三")?;

    workbook.save(&path)?;
    Ok(path)
}

fn excel2md() -> Command {
    Command::cargo_bin("excel2md").unwrap()
}

#[test]
fn test_cli_default_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path()).unwrap();
    let output = dir.path().join("sample.md");

    excel2md()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Reading: {}", input.display())))
        .stdout(predicate::str::contains(format!("✓ Saved to: {}", output.display())))
        .stdout(predicate::str::contains("✓ Conversion complete!"));

    let markdown = fs::read_to_string(&output).unwrap();
    assert!(markdown.starts_with("## 产品销售\n\n| 产品 | 数量 |"));
    assert!(markdown.contains("## 员工信息"));
    assert!(markdown.contains("\n---\n"));
}

#[test]
fn test_cli_explicit_output_and_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path()).unwrap();
    let output = dir.path().join("out/staff.md");

    excel2md()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--sheet")
        .arg("员工信息")
        .assert()
        .success();

    let markdown = fs::read_to_string(&output).unwrap();
    assert_eq!(markdown, "## 员工信息\n\n| 姓名 |\n| --- |\n| 张三 |\n");
}

#[test]
fn test_cli_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path()).unwrap();

    excel2md()
        .arg(&input)
        .args(["--stdout", "-s", "产品销售"])
        .assert()
        .success()
        .stdout("## 产品销售\n\n| 产品 | 数量 |\n| --- | --- |\n| 苹果 | 100 |\n");

    assert!(!dir.path().join("sample.md").exists());
}

#[test]
fn test_cli_missing_sheet_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path()).unwrap();

    excel2md()
        .arg(&input)
        .args(["-s", "Nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("✗ Conversion failed: Sheet 'Nope' not found"));

    assert!(!dir.path().join("sample.md").exists());
}

#[test]
fn test_cli_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    excel2md()
        .arg(dir.path().join("absent.xlsx"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("✗ Conversion failed: File not found"));
}

#[test]
fn test_cli_invalid_date_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path()).unwrap();

    excel2md()
        .arg(&input)
        .args(["--date-format", "%Y-%m-%"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_cli_stdout_conflicts_with_output() {
    excel2md()
        .args(["in.xlsx", "--stdout", "-o", "out.md"])
        .assert()
        .failure();
}
