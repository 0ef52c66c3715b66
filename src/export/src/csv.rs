use std::collections::HashMap;

use anyhow::Result;
use types::{equipment::EquipmentResp, point::PointResp, project::ProjectResp};

use crate::date::format_date_fr;

const HEADER: [&str; 8] = [
    "project",
    "client",
    "date",
    "equipment_type",
    "room",
    "model",
    "qty",
    "point_key",
];

/// One row per point, joined with its equipment and the project header
/// fields. RFC4180 quoting, date as DD/MM/YYYY.
pub fn export_points_csv(
    project: &ProjectResp,
    equipments: &[EquipmentResp],
    points: &[PointResp],
) -> Result<String> {
    let eq_map: HashMap<&String, &EquipmentResp> =
        equipments.iter().map(|e| (&e.id, e)).collect();
    let date = format_date_fr(project.project_date.as_deref());

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADER)?;
    for point in points {
        let equipment = eq_map.get(&point.equipment_id);
        wtr.write_record([
            project.name.as_str(),
            project.client.as_deref().unwrap_or(""),
            date.as_str(),
            equipment.map(|e| e.r#type.as_str()).unwrap_or(""),
            equipment.map(|e| e.room.as_str()).unwrap_or(""),
            equipment.map(|e| e.model.as_str()).unwrap_or(""),
            equipment
                .map(|e| e.qty.max(1).to_string())
                .unwrap_or_else(|| "1".to_owned())
                .as_str(),
            point.point_key.as_str(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("csv flush: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn csv_filename(project_name: &str) -> String {
    format!("techdoc_points_{}.csv", crate::filename_component(project_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectResp {
        ProjectResp {
            id: "p1".to_owned(),
            name: "Tour Alpha".to_owned(),
            client: Some("ACME".to_owned()),
            project_date: Some("2025-03-07".to_owned()),
            ts: 0,
        }
    }

    fn equipment(id: &str, room: &str) -> EquipmentResp {
        EquipmentResp {
            id: id.to_owned(),
            project_id: "p1".to_owned(),
            r#type: "HVAC".to_owned(),
            room: room.to_owned(),
            model: "M1".to_owned(),
            qty: 2,
            ts: 0,
        }
    }

    fn point(equipment_id: &str, key: &str) -> PointResp {
        PointResp {
            id: "pt1".to_owned(),
            project_id: "p1".to_owned(),
            equipment_id: equipment_id.to_owned(),
            tag: format!("Tour Alpha.R1.HVAC.M1.01.{key}"),
            idx: 1,
            point_key: key.to_owned(),
            rw: None,
            io: None,
            unit: None,
            description: None,
        }
    }

    #[test]
    fn header_and_row_order() {
        let csv = export_points_csv(
            &project(),
            &[equipment("e1", "R1")],
            &[point("e1", "cmdOnOff")],
        )
        .unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "project,client,date,equipment_type,room,model,qty,point_key"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Tour Alpha,ACME,07/03/2025,HVAC,R1,M1,2,cmdOnOff"
        );
    }

    #[test]
    fn first_data_row_round_trips_through_a_csv_reader() {
        let room = "Salle \"A\", étage 2\nannexe";
        let csv_text = export_points_csv(
            &project(),
            &[equipment("e1", room)],
            &[point("e1", "alarm")],
        )
        .unwrap();

        let mut rdr = csv::Reader::from_reader(csv_text.as_bytes());
        let record = rdr.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "Tour Alpha");
        assert_eq!(&record[1], "ACME");
        assert_eq!(&record[2], "07/03/2025");
        assert_eq!(&record[3], "HVAC");
        assert_eq!(&record[4], room);
        assert_eq!(&record[5], "M1");
        assert_eq!(&record[6], "2");
        assert_eq!(&record[7], "alarm");
    }

    #[test]
    fn filenames_stay_header_safe() {
        assert_eq!(
            csv_filename("Tour \"Alpha\"\nB\\C"),
            "techdoc_points_Tour AlphaBC.csv"
        );
        assert_eq!(csv_filename("Tour Alpha"), "techdoc_points_Tour Alpha.csv");
    }

    #[test]
    fn unknown_equipment_leaves_fields_empty() {
        let csv_text =
            export_points_csv(&project(), &[], &[point("missing", "alarm")]).unwrap();
        let row = csv_text.lines().nth(1).unwrap();
        assert_eq!(row, "Tour Alpha,ACME,07/03/2025,,,,1,alarm");
    }
}
