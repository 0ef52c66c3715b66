use std::collections::BTreeMap;

use anyhow::Result;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use types::{equipment::EquipmentResp, point::PointResp, project::ProjectResp};

use crate::date::format_date_fr;

// printpdf measures in Mm(f32).
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 20.0;
const ROW_HEIGHT: f32 = 6.0;

// Column x positions: Type, Room, Model, Qty, Point.
const COLUMNS: [f32; 5] = [14.0, 54.0, 104.0, 144.0, 158.0];
const TABLE_HEADER: [&str; 5] = ["Type", "Room", "Model", "Qty", "Point"];

/// Paginated project sheet: header lines, one table row per point, then a
/// summary block (equipment/point totals and counts per equipment type).
pub fn export_project_pdf(
    project: &ProjectResp,
    equipments: &[EquipmentResp],
    points: &[PointResp],
) -> Result<Vec<u8>> {
    let title = format!("Fiche projet — {}", project.name);
    let (doc, page, layer) =
        PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - 16.0;

    layer.use_text(title.as_str(), 14.0, Mm(MARGIN_LEFT), Mm(y), &bold);
    y -= 8.0;
    layer.use_text(
        format!("Client: {}", project.client.as_deref().unwrap_or("—")),
        10.0,
        Mm(MARGIN_LEFT),
        Mm(y),
        &font,
    );
    y -= ROW_HEIGHT;
    let date = format_date_fr(project.project_date.as_deref());
    layer.use_text(
        format!("Date: {}", if date.is_empty() { "—" } else { date.as_str() }),
        10.0,
        Mm(MARGIN_LEFT),
        Mm(y),
        &font,
    );
    y -= 10.0;

    write_row(&layer, &bold, y, TABLE_HEADER);
    y -= ROW_HEIGHT;

    let eq_of = |point: &PointResp| equipments.iter().find(|e| e.id == point.equipment_id);
    for point in points {
        if y < MARGIN_BOTTOM {
            let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT - 16.0;
            write_row(&layer, &bold, y, TABLE_HEADER);
            y -= ROW_HEIGHT;
        }

        let equipment = eq_of(point);
        let qty = equipment.map(|e| e.qty.max(1)).unwrap_or(1).to_string();
        write_row(
            &layer,
            &font,
            y,
            [
                equipment.map(|e| e.r#type.as_str()).unwrap_or(""),
                equipment.map(|e| e.room.as_str()).unwrap_or(""),
                equipment.map(|e| e.model.as_str()).unwrap_or(""),
                qty.as_str(),
                point.point_key.as_str(),
            ],
        );
        y -= ROW_HEIGHT;
    }

    // Counts per equipment type, in stable alphabetical order.
    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for equipment in equipments {
        *by_type.entry(equipment.r#type.as_str()).or_default() += 1;
    }

    let needed = 16.0 + ROW_HEIGHT * (2.0 + by_type.len() as f32);
    if y < MARGIN_BOTTOM + needed {
        let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        layer = doc.get_page(page).get_layer(new_layer);
        y = PAGE_HEIGHT - 16.0;
    } else {
        y -= 4.0;
    }

    layer.use_text("Résumé", 12.0, Mm(MARGIN_LEFT), Mm(y), &bold);
    y -= ROW_HEIGHT;
    layer.use_text(
        format!("Équipements: {}", equipments.len()),
        10.0,
        Mm(MARGIN_LEFT),
        Mm(y),
        &font,
    );
    y -= ROW_HEIGHT;
    layer.use_text(
        format!("Points: {}", points.len()),
        10.0,
        Mm(MARGIN_LEFT),
        Mm(y),
        &font,
    );
    y -= ROW_HEIGHT;
    for (typ, count) in by_type {
        layer.use_text(
            format!("{}: {}", typ, count),
            10.0,
            Mm(MARGIN_LEFT),
            Mm(y),
            &font,
        );
        y -= ROW_HEIGHT;
    }

    Ok(doc.save_to_bytes()?)
}

fn write_row(layer: &PdfLayerReference, font: &IndirectFontRef, y: f32, cells: [&str; 5]) {
    for (x, cell) in COLUMNS.iter().zip(cells) {
        layer.use_text(cell, 10.0, Mm(*x), Mm(y), font);
    }
}

pub fn pdf_filename(project_name: &str) -> String {
    format!("fiche_{}.pdf", crate::filename_component(project_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(point_count: usize) -> (ProjectResp, Vec<EquipmentResp>, Vec<PointResp>) {
        let project = ProjectResp {
            id: "p1".to_owned(),
            name: "Tour Alpha".to_owned(),
            client: Some("ACME".to_owned()),
            project_date: Some("2025-03-07".to_owned()),
            ts: 0,
        };
        let equipments = vec![EquipmentResp {
            id: "e1".to_owned(),
            project_id: "p1".to_owned(),
            r#type: "HVAC".to_owned(),
            room: "R1".to_owned(),
            model: "M1".to_owned(),
            qty: 1,
            ts: 0,
        }];
        let points = (0..point_count)
            .map(|i| PointResp {
                id: format!("pt{i}"),
                project_id: "p1".to_owned(),
                equipment_id: "e1".to_owned(),
                tag: format!("Tour Alpha.R1.HVAC.M1.01.k{i}"),
                idx: 1,
                point_key: format!("k{i}"),
                rw: None,
                io: None,
                unit: None,
                description: None,
            })
            .collect();
        (project, equipments, points)
    }

    #[test]
    fn produces_a_pdf_document() {
        let (project, equipments, points) = fixture(3);
        let bytes = export_project_pdf(&project, &equipments, &points).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_tables_paginate() {
        let (project, equipments, points) = fixture(200);
        let bytes = export_project_pdf(&project, &equipments, &points).unwrap();
        // More rows than one A4 page holds still serializes cleanly.
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 2000);
    }
}
