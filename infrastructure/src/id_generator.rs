use crate::config::IdStrategy;
use application::IdGenerator;
use domain::DocumentId;
use uuid::Uuid;

/// UUID-backed identifiers, random (v4) or time-ordered (v7).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator {
    strategy: IdStrategy,
}

impl UuidIdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }
}

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> DocumentId {
        let uuid = match self.strategy {
            IdStrategy::UuidV4 => Uuid::new_v4(),
            IdStrategy::UuidV7 => Uuid::now_v7(),
        };
        DocumentId::new(uuid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generates_distinct_ids() {
        let generator = UuidIdGenerator::default();
        let ids: HashSet<_> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_carry_the_configured_version() {
        let v4 = UuidIdGenerator::new(IdStrategy::UuidV4).generate();
        let v7 = UuidIdGenerator::new(IdStrategy::UuidV7).generate();

        assert_eq!(Uuid::parse_str(v4.as_str()).unwrap().get_version_num(), 4);
        assert_eq!(Uuid::parse_str(v7.as_str()).unwrap().get_version_num(), 7);
    }
}
