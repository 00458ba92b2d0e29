//! Registers two extra strategies next to the built-in `capitals` group.
//!
//! ```text
//! cargo run --example custom_strategy -- --group words --sizes 1000,10000,100000
//! ```

use sweepbench::{StrategyDef, stack};

fn count_words_split(text: &str) -> usize {
    text.split_whitespace().count()
}

fn count_words_recursive(text: &str) -> usize {
    fn walk(bytes: &[u8], in_word: bool) -> usize {
        stack::probe();
        match bytes.split_first() {
            None => 0,
            Some((&b, rest)) => {
                let starts = b != b' ' && !in_word;
                usize::from(starts) + std::hint::black_box(walk(rest, b != b' '))
            }
        }
    }
    walk(text.as_bytes(), false)
}

sweepbench::internal::inventory::submit! {
    StrategyDef {
        id: "words_split",
        group: "words",
        order: 0,
        isolate: false,
        description: "Count words with split_whitespace",
        run: count_words_split,
    }
}

sweepbench::internal::inventory::submit! {
    StrategyDef {
        id: "words_recursive",
        group: "words",
        order: 1,
        isolate: true,
        description: "Count words with one recursive call per byte",
        run: count_words_recursive,
    }
}

fn main() -> anyhow::Result<()> {
    sweepbench::run()
}
