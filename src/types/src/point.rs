use serde::{Deserialize, Serialize};

/// Read/write direction of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rw {
    R,
    W,
}

impl Rw {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rw::R => "R",
            Rw::W => "W",
        }
    }
}

impl TryFrom<&str> for Rw {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "R" => Ok(Rw::R),
            "W" => Ok(Rw::W),
            _ => Err(()),
        }
    }
}

/// I/O class of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IoClass {
    #[serde(rename = "DI")]
    Di,
    #[serde(rename = "DO")]
    Do,
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "AO")]
    Ao,
    Virtual,
}

impl IoClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            IoClass::Di => "DI",
            IoClass::Do => "DO",
            IoClass::Ai => "AI",
            IoClass::Ao => "AO",
            IoClass::Virtual => "Virtual",
        }
    }
}

impl TryFrom<&str> for IoClass {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "DI" => Ok(IoClass::Di),
            "DO" => Ok(IoClass::Do),
            "AI" => Ok(IoClass::Ai),
            "AO" => Ok(IoClass::Ao),
            "Virtual" => Ok(IoClass::Virtual),
            _ => Err(()),
        }
    }
}

/// A candidate point produced by the generator, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoint {
    pub project_id: String,
    pub equipment_id: String,
    pub tag: String,
    pub idx: i64,
    pub point_key: String,
    pub rw: Option<Rw>,
    pub io: Option<IoClass>,
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Clone)]
pub struct PointResp {
    pub id: String,
    pub project_id: String,
    pub equipment_id: String,
    pub tag: String,
    pub idx: i64,
    pub point_key: String,
    pub rw: Option<Rw>,
    pub io: Option<IoClass>,
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct ListPointsResp {
    pub total: usize,
    pub data: Vec<PointResp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_class_str_round_trip() {
        for io in [
            IoClass::Di,
            IoClass::Do,
            IoClass::Ai,
            IoClass::Ao,
            IoClass::Virtual,
        ] {
            assert_eq!(IoClass::try_from(io.as_str()), Ok(io));
        }
        assert!(IoClass::try_from("XX").is_err());
    }
}
