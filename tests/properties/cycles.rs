//! Property: dependency cycles always block translation.

use proptest::prelude::*;

use podshift::{OutputFormat, Translator};

/// `s0 -> s1 -> ... -> s{n-1} -> s0`, plus extra forward edges
fn cyclic_document(len: usize, extra: &[(usize, usize)]) -> String {
    let mut out = String::from("services:\n");
    for i in 0..len {
        let mut deps = vec![format!("s{}", (i + 1) % len)];
        for (from, to) in extra {
            let (from, to) = (from % len, to % len);
            if from == i && to != i && !deps.contains(&format!("s{}", to)) {
                deps.push(format!("s{}", to));
            }
        }
        out.push_str(&format!(
            "  s{}:\n    image: busybox\n    depends_on: [{}]\n",
            i,
            deps.join(", ")
        ));
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any cycle yields errors and empty output for every format.
    #[test]
    fn property_cycles_always_block(
        len in 1usize..=6,
        extra in proptest::collection::vec((0usize..6, 0usize..6), 0..=4),
    ) {
        let text = cyclic_document(len, &extra);
        let translator = Translator::default();
        for format in OutputFormat::ALL {
            let result = translator.translate_to(&text, format);
            prop_assert!(result.output.is_empty());
            prop_assert!(
                result.errors.iter().any(|e| e.contains("cycle")),
                "{}: {:?}",
                format,
                result.errors
            );
        }
    }
}
