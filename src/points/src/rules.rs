use std::{collections::HashMap, sync::LazyLock};

/// Equipment type -> ordered point key list. List order is the insertion
/// order of generated points.
pub type RuleTable = HashMap<String, Vec<String>>;

pub static POINT_RULES: LazyLock<RuleTable> = LazyLock::new(|| {
    HashMap::from([
        (
            "HVAC".to_owned(),
            vec![
                "cmdOnOff".to_owned(),
                "setpointTemp".to_owned(),
                "actualTemp".to_owned(),
                "alarm".to_owned(),
            ],
        ),
        (
            "LIGHT".to_owned(),
            vec![
                "cmdOnOff".to_owned(),
                "dimming".to_owned(),
                "alarm".to_owned(),
            ],
        ),
        (
            "SENSOR".to_owned(),
            vec!["measure".to_owned(), "alarm".to_owned()],
        ),
    ])
});

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_within_a_rule_are_unique() {
        for (typ, keys) in POINT_RULES.iter() {
            let set: HashSet<&String> = keys.iter().collect();
            assert_eq!(set.len(), keys.len(), "duplicate key in rule {}", typ);
        }
    }
}
