//! Fresh local naming (`$r0`, `$i0`, `$z0`, ...)

use rustc_hash::FxHashMap;

use crate::shared::models::JavaType;

/// Hands out type-prefixed local names, one counter per prefix
#[derive(Debug, Default, Clone)]
pub struct LocalGenerator {
    counters: FxHashMap<&'static str, u32>,
}

impl LocalGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&mut self, ty: &JavaType) -> String {
        let prefix = ty.local_prefix();
        let counter = self.counters.entry(prefix).or_insert(0);
        let name = format!("{}{}", prefix, counter);
        *counter += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_per_prefix() {
        let mut gen = LocalGenerator::new();
        assert_eq!(gen.next_name(&JavaType::string()), "$r0");
        assert_eq!(gen.next_name(&JavaType::Int), "$i0");
        assert_eq!(gen.next_name(&JavaType::reference("app.Foo")), "$r1");
        assert_eq!(gen.next_name(&JavaType::Boolean), "$z0");
        assert_eq!(gen.next_name(&JavaType::array_of(JavaType::Int)), "$r2");
    }
}
