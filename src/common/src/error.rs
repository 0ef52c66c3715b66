use std::result;

pub type TechdocResult<T, E = TechdocError> = result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum TechdocError {
    #[error("{0} introuvable")]
    NotFound(String),
    #[error("non authentifié")]
    Unauthorized,
    #[error("{0}")]
    Common(String),
}

impl TechdocError {
    pub fn code(&self) -> u16 {
        match self {
            TechdocError::NotFound(_) => 404,
            TechdocError::Unauthorized => 401,
            TechdocError::Common(_) => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_a_status_code() {
        assert_eq!(TechdocError::NotFound("projet".to_owned()).code(), 404);
        assert_eq!(TechdocError::Unauthorized.code(), 401);
        assert_eq!(TechdocError::Common("oops".to_owned()).code(), 400);
    }
}
