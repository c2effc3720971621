//! Example: a small formatted report with document properties

use tabwright::prelude::*;

fn main() -> Result<()> {
    let mut workbook = Workbook::new();
    workbook.add_worksheet(Some("Sales"))?;
    workbook.set_properties(
        DocProperties::new()
            .with_title("Quarterly sales")
            .with_author("Finance"),
    )?;

    let mut header = workbook.add_format();
    header
        .set_bold(true)
        .set_bg_color(Color::GRAY)
        .set_border(BorderLineStyle::Thin)
        .set_align(HorizontalAlignment::Center);

    let mut money = workbook.add_format();
    money.set_num_format("#,##0.00");

    let mut sheet = workbook.worksheet_mut(0).unwrap();
    sheet.set_column_width(0, 18.0)?;
    sheet.write_string(0, 0, "Region", Some(&header))?;
    sheet.write_string(0, 1, "Revenue", Some(&header))?;

    let rows = [("North", 1250.5), ("South", 980.25), ("West", 1430.0)];
    for (i, (region, revenue)) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, region, None)?;
        sheet.write_number(row, 1, *revenue, Some(&money))?;
    }
    sheet.write_string(4, 0, "Total", Some(&header))?;
    sheet.write_formula(4, 1, "=SUM(B2:B4)", Some(&money))?;

    workbook.close("/tmp/sales.xlsx")?;
    println!("Created /tmp/sales.xlsx");
    Ok(())
}
