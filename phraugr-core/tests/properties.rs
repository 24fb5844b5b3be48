//! Property checks over in-memory partitions.

use std::num::NonZeroUsize;

use phraugr_core::{
    HeaderPolicy, NoProgress, PartitionReport, Partitioner, Probability, Routing, Seed,
    SeededDraws, SinkSet, normalize_seed,
};
use proptest::{
    prelude::{Just, any, prop_oneof},
    prop_assert, prop_assert_eq, proptest,
    strategy::Strategy,
    test_runner::TestCaseError,
};

fn header_policy() -> impl Strategy<Value = HeaderPolicy> {
    prop_oneof![
        Just(HeaderPolicy::Route),
        Just(HeaderPolicy::Skip),
        Just(HeaderPolicy::Copy),
    ]
}

/// Distinct lines so every output line can be traced back to its position.
fn tagged_lines(words: &[String]) -> Vec<String> {
    words
        .iter()
        .enumerate()
        .map(|(index, word)| format!("{index}:{word}\n"))
        .collect()
}

fn partition(
    lines: &[String],
    routing: Routing,
    header: HeaderPolicy,
    seed: u64,
) -> Result<(PartitionReport, Vec<Vec<String>>), TestCaseError> {
    let outputs = routing.outputs().get();
    let sinks = SinkSet::from_writers((0..outputs).map(|index| (format!("mem-{index}"), Vec::new())));
    let input = lines.concat();
    let mut draws = SeededDraws::new(&Seed::Numeric(seed));
    let (report, buffers) = Partitioner::new(routing, header)
        .run(input.as_bytes(), sinks, &mut draws, &mut NoProgress)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let texts = buffers
        .into_iter()
        .map(|buffer| {
            String::from_utf8(buffer)
                .map(|text| text.split_inclusive('\n').map(str::to_owned).collect())
                .map_err(|err| TestCaseError::fail(err.to_string()))
        })
        .collect::<Result<Vec<Vec<String>>, _>>()?;
    Ok((report, texts))
}

fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut remaining = haystack.iter();
    needle
        .iter()
        .all(|line| remaining.by_ref().any(|candidate| candidate == line))
}

proptest! {
    #[test]
    fn every_body_line_lands_in_exactly_one_output(
        words in proptest::collection::vec("[a-z]{0,6}", 0..60),
        chunks in 1_usize..8,
        header in header_policy(),
        seed in any::<u64>(),
    ) {
        let lines = tagged_lines(&words);
        let outputs = NonZeroUsize::new(chunks).ok_or_else(|| TestCaseError::fail("zero chunks"))?;
        let (report, mut texts) = partition(&lines, Routing::Uniform { outputs }, header, seed)?;

        let has_header = !lines.is_empty() && header != HeaderPolicy::Route;
        let body = if has_header { &lines[1..] } else { &lines[..] };
        if has_header && header == HeaderPolicy::Copy {
            for text in &mut texts {
                prop_assert_eq!(text.first(), lines.first());
                text.remove(0);
            }
        }

        let mut written: Vec<String> = texts.iter().flatten().cloned().collect();
        written.sort();
        let mut expected = body.to_vec();
        expected.sort();
        prop_assert_eq!(written, expected);
        for text in &texts {
            prop_assert!(is_subsequence(text, body));
        }

        let copies = if has_header && header == HeaderPolicy::Copy { chunks as u64 } else { 0 };
        prop_assert_eq!(report.lines_read, lines.len() as u64);
        prop_assert_eq!(report.header_copies, copies);
        prop_assert_eq!(report.lines_written(), body.len() as u64 + copies);
    }

    #[test]
    fn equal_seeds_route_identically(
        words in proptest::collection::vec("[a-z]{1,4}", 1..40),
        probability in 0.01_f64..0.99,
        seed in any::<u64>(),
    ) {
        let lines = tagged_lines(&words);
        let probability = Probability::new(probability)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let routing = Routing::Threshold { probability };
        let (_, first) = partition(&lines, routing, HeaderPolicy::Route, seed)?;
        let (_, second) = partition(&lines, routing, HeaderPolicy::Route, seed)?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalized_seed_ignores_character_order(text in "\\PC{0,12}") {
        let reversed: String = text.chars().rev().collect();
        prop_assert_eq!(normalize_seed(&text), normalize_seed(&reversed));
    }
}
