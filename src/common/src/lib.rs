use uuid::Uuid;

pub mod config;
pub mod error;

pub fn get_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn timestamp_millis() -> i64 {
    let now = std::time::SystemTime::now();
    now.duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_simple_and_unique() {
        let a = get_id();
        let b = get_id();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
