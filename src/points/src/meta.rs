use std::{collections::HashMap, sync::LazyLock};

use types::point::{IoClass, Rw};

/// Semantic attributes of one point key. Copied into generated points at
/// generation time, never referenced afterwards.
#[derive(Debug, Clone)]
pub struct PointMeta {
    pub rw: Rw,
    pub io: IoClass,
    pub unit: Option<String>,
    pub desc: String,
}

impl PointMeta {
    fn new(rw: Rw, io: IoClass, unit: Option<&str>, desc: &str) -> Self {
        Self {
            rw,
            io,
            unit: unit.map(|u| u.to_owned()),
            desc: desc.to_owned(),
        }
    }
}

pub type MetaTable = HashMap<String, PointMeta>;

pub static POINT_META: LazyLock<MetaTable> = LazyLock::new(|| {
    HashMap::from([
        (
            "cmdOnOff".to_owned(),
            PointMeta::new(Rw::W, IoClass::Do, None, "Commande On/Off"),
        ),
        (
            "setpointTemp".to_owned(),
            PointMeta::new(Rw::W, IoClass::Ao, Some("°C"), "Consigne de température"),
        ),
        (
            "actualTemp".to_owned(),
            PointMeta::new(Rw::R, IoClass::Ai, Some("°C"), "Température mesurée"),
        ),
        (
            "alarm".to_owned(),
            PointMeta::new(Rw::R, IoClass::Di, None, "Alarme état"),
        ),
        (
            "dimming".to_owned(),
            PointMeta::new(Rw::W, IoClass::Ao, Some("%"), "Gradation lumière"),
        ),
        (
            "measure".to_owned(),
            PointMeta::new(Rw::R, IoClass::Ai, None, "Valeur mesurée"),
        ),
    ])
});

#[cfg(test)]
mod tests {
    use crate::rules::POINT_RULES;

    use super::*;

    #[test]
    fn every_rule_key_has_metadata() {
        for keys in POINT_RULES.values() {
            for key in keys {
                assert!(POINT_META.contains_key(key), "no metadata for {}", key);
            }
        }
    }
}
