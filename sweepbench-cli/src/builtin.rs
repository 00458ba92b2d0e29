//! Built-in Strategies
//!
//! The `capitals` group counts ASCII capital letters two ways. The iterative
//! counter is bounded and runs directly. The recursive counter makes one
//! non-tail call per byte, so at large sizes it exhausts the stack of its
//! isolated thread and is recorded as a failed point.

use sweepbench_core::{StrategyDef, stack};

/// Count `A`-`Z` with a loop
pub fn count_capitals_iterative(text: &str) -> usize {
    text.bytes().filter(|b| b.is_ascii_uppercase()).count()
}

/// Count `A`-`Z` with one recursive call per byte
pub fn count_capitals_recursive(text: &str) -> usize {
    count_from(text.as_bytes())
}

fn count_from(bytes: &[u8]) -> usize {
    stack::probe();
    match bytes.split_first() {
        None => 0,
        // black_box keeps the call out of tail position
        Some((first, rest)) => {
            usize::from(first.is_ascii_uppercase()) + std::hint::black_box(count_from(rest))
        }
    }
}

inventory::submit! {
    StrategyDef {
        id: "iterative",
        group: "capitals",
        order: 0,
        isolate: false,
        description: "Count capital letters with a loop",
        run: count_capitals_iterative,
    }
}

inventory::submit! {
    StrategyDef {
        id: "recursive",
        group: "capitals",
        order: 1,
        isolate: true,
        description: "Count capital letters with one recursive call per character",
        run: count_capitals_recursive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TextGenerator;

    #[test]
    fn test_counts() {
        assert_eq!(count_capitals_iterative(""), 0);
        assert_eq!(count_capitals_iterative("Hello World 42"), 2);
        assert_eq!(count_capitals_recursive("Hello World 42"), 2);
        assert_eq!(count_capitals_recursive("ABCxyz"), 3);
    }

    #[test]
    fn test_strategies_agree() {
        let mut generator = TextGenerator::new(42);
        for len in [1, 10, 500, 3000] {
            let text = generator.generate(len);
            assert_eq!(
                count_capitals_iterative(&text),
                count_capitals_recursive(&text),
                "len={len}"
            );
        }
    }

    #[test]
    fn test_registered() {
        let capitals: Vec<_> = inventory::iter::<StrategyDef>
            .into_iter()
            .filter(|s| s.group == "capitals")
            .collect();

        let iterative = capitals.iter().find(|s| s.id == "iterative").unwrap();
        let recursive = capitals.iter().find(|s| s.id == "recursive").unwrap();
        assert!(!iterative.isolate);
        assert!(recursive.isolate);
        assert!(iterative.order < recursive.order);
    }
}
