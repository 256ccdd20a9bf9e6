//! Create Example Workbook
//!
//! 2シート（产品销售 / 员工信息）のサンプル`example.xlsx`を生成し、
//! そのまま`example.md`に変換します。
//!
//! # Usage
//!
//! ```bash
//! cargo run --example create_example -- [output_dir]
//! ```

use std::path::PathBuf;

use excel2md::{default_output_path, write_markdown, ConverterBuilder};
use rust_xlsxwriter::{Workbook, XlsxError};

fn build_workbook() -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let sales = workbook.add_worksheet();
    sales.set_name("产品销售")?;
    for (col, header) in ["产品", "数量", "单价", "总价"].iter().enumerate() {
        sales.write_string(0, col as u16, *header)?;
    }
    let products = [
        ("苹果", 100.0, 5.5, 550.0),
        ("香蕉", 200.0, 3.2, 640.0),
        ("橙子", 150.0, 4.8, 720.0),
        ("葡萄", 80.0, 12.0, 960.0),
    ];
    for (i, (name, quantity, price, total)) in products.iter().enumerate() {
        let row = i as u32 + 1;
        sales.write_string(row, 0, *name)?;
        sales.write_number(row, 1, *quantity)?;
        sales.write_number(row, 2, *price)?;
        sales.write_number(row, 3, *total)?;
    }

    let staff = workbook.add_worksheet();
    staff.set_name("员工信息")?;
    for (col, header) in ["姓名", "部门", "入职日期", "工资"].iter().enumerate() {
        staff.write_string(0, col as u16, *header)?;
    }
    let people = [
        ("张三", "销售部", "2020-01-15", 8000.0),
        ("李四", "技术部", "2019-06-20", 12000.0),
        ("王五", "人事部", "2021-03-10", 7000.0),
    ];
    for (i, (name, dept, joined, salary)) in people.iter().enumerate() {
        let row = i as u32 + 1;
        staff.write_string(row, 0, *name)?;
        staff.write_string(row, 1, *dept)?;
        staff.write_string(row, 2, *joined)?;
        staff.write_number(row, 3, *salary)?;
    }

    Ok(workbook)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output_dir)?;

    let input = output_dir.join("example.xlsx");
    build_workbook()?.save(&input)?;
    println!("✓ Created example workbook: {}", input.display());
    println!("  Sheets: '产品销售' and '员工信息'");

    let converter = ConverterBuilder::new().build()?;
    let markdown = converter.convert_path(&input)?;

    let output = default_output_path(&input);
    write_markdown(&output, &markdown)?;
    println!("✓ Saved to: {}", output.display());

    Ok(())
}
