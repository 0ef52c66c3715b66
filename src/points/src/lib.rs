//! Technical point generation.
//!
//! Given one equipment record and the static rule table, computes the
//! full set of point tags the equipment should carry and returns only
//! the ones missing from the store. Pure computation: reading the
//! existing set and persisting the result belong to the caller.

use std::collections::HashSet;

use types::point::NewPoint;

pub mod meta;
pub mod rules;

pub use meta::{MetaTable, PointMeta, POINT_META};
pub use rules::{RuleTable, POINT_RULES};

/// Generator input, one equipment record.
#[derive(Debug, Clone)]
pub struct EquipmentDesc {
    pub id: String,
    pub project_id: String,
    pub r#type: String,
    pub room: String,
    pub model: String,
    pub qty: i64,
}

/// `(idx, point_key)` pairs already persisted for one equipment.
/// Uniqueness is per unit index, so raising `qty` later generates the
/// missing indices only.
pub type ExistingPoints = HashSet<(i64, String)>;

/// Builds the fully qualified dotted tag of one point instance. The unit
/// index is zero-padded to at least two digits and widens as needed.
pub fn build_tag(
    project_code: &str,
    room: &str,
    typ: &str,
    model: &str,
    idx: i64,
    key: &str,
) -> String {
    format!("{project_code}.{room}.{typ}.{model}.{idx:02}.{key}")
}

/// Computes the missing points for `equipment`, unit-index major, keys in
/// rule-table order.
///
/// An unknown type or an empty rule yields an empty result, never an
/// error. `qty` below 1 is treated as 1. Metadata fields are snapshotted
/// into the output; keys without metadata get null fields.
pub fn generate_points(
    equipment: &EquipmentDesc,
    project_code: &str,
    rules: &RuleTable,
    meta: &MetaTable,
    existing: &ExistingPoints,
) -> Vec<NewPoint> {
    let rule = match rules.get(&equipment.r#type) {
        Some(rule) if !rule.is_empty() => rule,
        _ => return vec![],
    };

    let qty = equipment.qty.max(1);
    let mut out = Vec::with_capacity(rule.len() * qty as usize);
    for idx in 1..=qty {
        for key in rule {
            if existing.contains(&(idx, key.clone())) {
                continue;
            }
            let meta = meta.get(key);
            out.push(NewPoint {
                project_id: equipment.project_id.clone(),
                equipment_id: equipment.id.clone(),
                tag: build_tag(
                    project_code,
                    &equipment.room,
                    &equipment.r#type,
                    &equipment.model,
                    idx,
                    key,
                ),
                idx,
                point_key: key.clone(),
                rw: meta.map(|m| m.rw),
                io: meta.map(|m| m.io),
                unit: meta.and_then(|m| m.unit.clone()),
                description: meta.map(|m| m.desc.clone()),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use types::point::{IoClass, Rw};

    use super::*;

    fn hvac(qty: i64) -> EquipmentDesc {
        EquipmentDesc {
            id: "eq1".to_owned(),
            project_id: "p1".to_owned(),
            r#type: "HVAC".to_owned(),
            room: "R1".to_owned(),
            model: "M1".to_owned(),
            qty,
        }
    }

    fn persisted(points: &[NewPoint]) -> ExistingPoints {
        points
            .iter()
            .map(|p| (p.idx, p.point_key.clone()))
            .collect()
    }

    #[test]
    fn fan_out_is_qty_times_keys() {
        let points = generate_points(
            &hvac(3),
            "P1",
            &POINT_RULES,
            &POINT_META,
            &ExistingPoints::new(),
        );
        assert_eq!(points.len(), 3 * 4);
        for idx in 1..=3 {
            assert_eq!(points.iter().filter(|p| p.idx == idx).count(), 4);
        }
    }

    #[test]
    fn second_run_is_empty() {
        let first = generate_points(
            &hvac(2),
            "P1",
            &POINT_RULES,
            &POINT_META,
            &ExistingPoints::new(),
        );
        let second = generate_points(&hvac(2), "P1", &POINT_RULES, &POINT_META, &persisted(&first));
        assert!(second.is_empty());
    }

    #[test]
    fn qty_increase_generates_new_indices_only() {
        let first = generate_points(
            &hvac(2),
            "P1",
            &POINT_RULES,
            &POINT_META,
            &ExistingPoints::new(),
        );
        let second = generate_points(&hvac(5), "P1", &POINT_RULES, &POINT_META, &persisted(&first));
        assert_eq!(second.len(), 3 * 4);
        assert!(second.iter().all(|p| p.idx >= 3 && p.idx <= 5));
    }

    #[test]
    fn unknown_type_yields_nothing() {
        let mut equipment = hvac(10);
        equipment.r#type = "ELEVATOR".to_owned();
        let points = generate_points(
            &equipment,
            "P1",
            &POINT_RULES,
            &POINT_META,
            &ExistingPoints::new(),
        );
        assert!(points.is_empty());
    }

    #[test]
    fn tag_format() {
        let points = generate_points(
            &hvac(1),
            "P1",
            &POINT_RULES,
            &POINT_META,
            &ExistingPoints::new(),
        );
        assert_eq!(points[0].tag, "P1.R1.HVAC.M1.01.cmdOnOff");
        assert_eq!(points[0].idx, 1);
        assert_eq!(points[0].point_key, "cmdOnOff");
    }

    #[test]
    fn zero_pad_widens_without_truncation() {
        assert_eq!(build_tag("P1", "R1", "HVAC", "M1", 9, "alarm"), "P1.R1.HVAC.M1.09.alarm");
        assert_eq!(build_tag("P1", "R1", "HVAC", "M1", 10, "alarm"), "P1.R1.HVAC.M1.10.alarm");
        assert_eq!(
            build_tag("P1", "R1", "HVAC", "M1", 100, "alarm"),
            "P1.R1.HVAC.M1.100.alarm"
        );

        let points = generate_points(
            &hvac(12),
            "P1",
            &POINT_RULES,
            &POINT_META,
            &ExistingPoints::new(),
        );
        let tenth: Vec<&NewPoint> = points.iter().filter(|p| p.idx == 10).collect();
        assert!(tenth.iter().all(|p| p.tag.contains(".10.")));
    }

    #[test]
    fn qty_below_one_is_treated_as_one() {
        for qty in [0, -3] {
            let points = generate_points(
                &hvac(qty),
                "P1",
                &POINT_RULES,
                &POINT_META,
                &ExistingPoints::new(),
            );
            assert_eq!(points.len(), 4);
            assert!(points.iter().all(|p| p.idx == 1));
        }
    }

    #[test]
    fn metadata_is_snapshotted() {
        let points = generate_points(
            &hvac(1),
            "P1",
            &POINT_RULES,
            &POINT_META,
            &ExistingPoints::new(),
        );
        let setpoint = points
            .iter()
            .find(|p| p.point_key == "setpointTemp")
            .unwrap();
        assert_eq!(setpoint.rw, Some(Rw::W));
        assert_eq!(setpoint.io, Some(IoClass::Ao));
        assert_eq!(setpoint.unit.as_deref(), Some("°C"));

        // Mutating a copy of the table afterwards must not affect the
        // already generated rows.
        let mut meta = POINT_META.clone();
        meta.insert(
            "setpointTemp".to_owned(),
            PointMeta {
                rw: Rw::R,
                io: IoClass::Virtual,
                unit: None,
                desc: "changed".to_owned(),
            },
        );
        assert_eq!(setpoint.rw, Some(Rw::W));
        assert_eq!(setpoint.io, Some(IoClass::Ao));
        assert_eq!(setpoint.description.as_deref(), Some("Consigne de température"));
    }

    #[test]
    fn missing_metadata_defaults_to_null_fields() {
        let rules: RuleTable =
            HashMap::from([("HVAC".to_owned(), vec!["customKey".to_owned()])]);
        let points = generate_points(
            &hvac(1),
            "P1",
            &rules,
            &POINT_META,
            &ExistingPoints::new(),
        );
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].rw, None);
        assert_eq!(points[0].io, None);
        assert_eq!(points[0].unit, None);
        assert_eq!(points[0].description, None);
    }

    #[test]
    fn empty_rule_yields_nothing() {
        let rules: RuleTable = HashMap::from([("HVAC".to_owned(), vec![])]);
        let points = generate_points(
            &hvac(4),
            "P1",
            &rules,
            &POINT_META,
            &ExistingPoints::new(),
        );
        assert!(points.is_empty());
    }
}
