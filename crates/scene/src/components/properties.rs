/// Ordered label pairs carried from a source table row.
///
/// Keeps source column order so a host can render fields in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    pub pairs: Vec<(String, String)>,
}

impl Properties {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Properties;

    #[test]
    fn lookup_by_key() {
        let p = Properties::new(vec![
            ("City".to_string(), "Roma".to_string()),
            ("Year".to_string(), "-753".to_string()),
        ]);
        assert_eq!(p.get("City"), Some("Roma"));
        assert_eq!(p.get("Winner"), None);
    }
}
