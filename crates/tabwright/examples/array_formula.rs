//! Example: an array formula over a column, with its inputs beside it

use tabwright::prelude::*;

fn main() -> Result<()> {
    let mut workbook = Workbook::new();
    workbook.add_worksheet(None)?;

    let mut bold = workbook.add_format();
    bold.set_bold(true);

    let mut sheet = workbook.worksheet_mut(0).unwrap();
    for row in 0..3 {
        sheet.write_number(row, 1, 0.0, None)?;
        sheet.write_number(row, 2, 0.0, None)?;
    }
    sheet.write_array_formula(
        CellRange::parse("A1:A3")?,
        "{=SUM(B1:C1*B2:C2)}",
        Some(&bold),
    )?;

    workbook.close("/tmp/array_formula.xlsx")?;
    println!("Created /tmp/array_formula.xlsx");
    Ok(())
}
