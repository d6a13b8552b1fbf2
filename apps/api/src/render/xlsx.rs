//! Materialises SheetModels as one xlsx workbook.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Image, Workbook, Worksheet, XlsxError};

use crate::layout::spec::{Border, CellStyle, HAlign, VAlign, VALUE};
use crate::render::sheet::{CellValue, Extent, SheetModel};

/// Writes `sheets` in the given order and returns the workbook bytes.
pub fn write_workbook(sheets: &[SheetModel]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    for model in sheets {
        let worksheet = workbook.add_worksheet();
        write_worksheet(worksheet, model)?;
    }
    workbook.save_to_buffer()
}

fn write_worksheet(worksheet: &mut Worksheet, model: &SheetModel) -> Result<(), XlsxError> {
    worksheet.set_name(&model.name)?;

    for (col, width) in model.column_widths() {
        match width {
            Extent::Units(chars) => worksheet.set_column_width(col, chars)?,
            Extent::Pixels(px) => worksheet.set_column_width_pixels(col, px)?,
        };
    }
    for (row, height) in model.row_heights() {
        match height {
            Extent::Units(points) => worksheet.set_row_height(row, points)?,
            Extent::Pixels(px) => worksheet.set_row_height_pixels(row, px)?,
        };
    }

    // Merges first: merge_range fills the whole range with blanks, then the real value is
    // written over its first cell.
    for range in model.merges() {
        let style = model
            .cell(range.first)
            .map(|c| c.style)
            .unwrap_or(VALUE);
        worksheet.merge_range(
            range.first.row,
            range.first.col,
            range.last.row,
            range.last.col,
            "",
            &to_format(&style),
        )?;
    }

    for (at, cell) in model.cells() {
        let format = to_format(&cell.style);
        match &cell.value {
            CellValue::Text(text) if text.is_empty() => {
                worksheet.write_blank(at.row, at.col, &format)?;
            }
            CellValue::Text(text) => {
                worksheet.write_string_with_format(at.row, at.col, text, &format)?;
            }
            CellValue::Rich(rich) if rich.is_empty() => {
                worksheet.write_blank(at.row, at.col, &format)?;
            }
            CellValue::Rich(rich) => {
                let run_formats: Vec<Format> = rich
                    .runs()
                    .iter()
                    .map(|run| {
                        let f = Format::new().set_font_size(run.font_size);
                        if run.bold {
                            f.set_bold()
                        } else {
                            f
                        }
                    })
                    .collect();
                let segments: Vec<(&Format, &str)> = run_formats
                    .iter()
                    .zip(rich.runs())
                    .map(|(f, run)| (f, run.text.as_str()))
                    .collect();
                worksheet.write_rich_string_with_format(at.row, at.col, &segments, &format)?;
            }
        }
    }

    if let Some(placed) = model.image() {
        let image = Image::new_from_buffer(&placed.image.png)?
            .set_scale_width(placed.image.scale_x)
            .set_scale_height(placed.image.scale_y);
        worksheet.insert_image_with_offset(placed.anchor.row, placed.anchor.col, &image, 0, 0)?;
    }

    Ok(())
}

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new()
        .set_font_size(style.font_size)
        .set_align(match style.h_align {
            HAlign::Left => FormatAlign::Left,
            HAlign::Center => FormatAlign::Center,
            HAlign::Right => FormatAlign::Right,
        })
        .set_align(match style.v_align {
            VAlign::Top => FormatAlign::Top,
            VAlign::Center => FormatAlign::VerticalCenter,
        });
    if style.bold {
        format = format.set_bold();
    }
    if style.wrap {
        format = format.set_text_wrap();
    }
    if let Some(rgb) = style.fill {
        format = format.set_background_color(Color::RGB(rgb));
    }
    match style.border {
        Border::None => format,
        Border::Thin => format.set_border(FormatBorder::Thin),
        Border::Medium => format.set_border(FormatBorder::Medium),
    }
}
