//! End-to-end behaviour of the two-way splitter against real files.

mod common;

use std::io;

use phraugr_core::{NoProgress, PartitionError, ScriptedDraws, Seed, SplitterBuilder};
use phraugr_test_support::fixtures::{numbered_lines, read_lines, temp_dir, write_file};
use rstest::rstest;

use common::{TestResult, output_bytes};

#[rstest]
fn copied_header_reaches_both_outputs_and_body_lines_one() -> TestResult {
    let dir = temp_dir();
    let input = write_file(dir.path(), "in.txt", "header\nA\nB\n")?;
    let splitter = SplitterBuilder::new(
        &input,
        dir.path().join("one.txt"),
        dir.path().join("two.txt"),
    )
    .with_header_flags(false, true)
    .with_seed(Seed::text("split"))
    .build()?;
    let summary = splitter.run(io::sink())?;

    let first = read_lines(&summary.outputs[0])?;
    let second = read_lines(&summary.outputs[1])?;
    assert_eq!(first.first().map(String::as_str), Some("header\n"));
    assert_eq!(second.first().map(String::as_str), Some("header\n"));
    for body in ["A\n", "B\n"] {
        let hits = first.iter().chain(&second).filter(|line| *line == body).count();
        assert_eq!(hits, 1, "{body:?} must land in exactly one output");
    }
    Ok(())
}

#[rstest]
fn draws_above_the_threshold_go_to_the_first_output() -> TestResult {
    let dir = temp_dir();
    let input = write_file(dir.path(), "in.txt", "header\nA\nB\nC\n")?;
    let splitter = SplitterBuilder::new(
        &input,
        dir.path().join("one.txt"),
        dir.path().join("two.txt"),
    )
    .with_probability(0.5)
    .with_header_flags(true, false)
    .build()?;
    let mut draws = ScriptedDraws::units([0.75, 0.5, 0.25]);
    let summary = splitter.run_with(&mut draws, &mut NoProgress)?;
    assert_eq!(
        output_bytes(&summary),
        vec![b"A\n".to_vec(), b"B\nC\n".to_vec()]
    );
    assert!(draws.is_exhausted());
    Ok(())
}

#[rstest]
fn default_probability_sends_most_lines_to_the_second_output() -> TestResult {
    let dir = temp_dir();
    let input = write_file(dir.path(), "in.txt", numbered_lines(100_000))?;
    let splitter = SplitterBuilder::new(
        &input,
        dir.path().join("one.txt"),
        dir.path().join("two.txt"),
    )
    .with_seed(17_u64)
    .with_progress(false)
    .build()?;
    let summary = splitter.run(io::sink())?;
    let counts = &summary.report.per_output;
    assert_eq!(counts.iter().sum::<u64>(), 100_000);
    let second = counts.get(1).copied().unwrap_or_default();
    assert!(
        (85_000..=95_000).contains(&second),
        "second output received {second} of 100000 lines"
    );
    Ok(())
}

#[rstest]
fn equal_seeds_produce_identical_splits() -> TestResult {
    let dir = temp_dir();
    let input = write_file(dir.path(), "in.txt", numbered_lines(3_000))?;
    let run = |tag: &str| {
        SplitterBuilder::new(
            &input,
            dir.path().join(format!("{tag}-one.txt")),
            dir.path().join(format!("{tag}-two.txt")),
        )
        .with_probability(0.3)
        .with_seed(Seed::text("AB"))
        .build()
        .and_then(|splitter| splitter.run(io::sink()))
    };
    let first = run("first")?;
    let second = run("second")?;
    assert_eq!(output_bytes(&first), output_bytes(&second));
    Ok(())
}

#[rstest]
fn progress_is_reported_by_default() -> TestResult {
    let dir = temp_dir();
    let input = write_file(dir.path(), "in.txt", numbered_lines(100_000))?;
    let splitter = SplitterBuilder::new(
        &input,
        dir.path().join("one.txt"),
        dir.path().join("two.txt"),
    )
    .with_seed(1_u64)
    .build()?;
    let mut progress = Vec::new();
    splitter.run(&mut progress)?;
    assert_eq!(String::from_utf8(progress)?, "100000\n");
    Ok(())
}

#[rstest]
fn conflicting_header_flags_touch_no_files() -> TestResult {
    let dir = temp_dir();
    let input = write_file(dir.path(), "in.txt", "h\n1\n")?;
    let first = dir.path().join("one.txt");
    let err = SplitterBuilder::new(&input, &first, dir.path().join("two.txt"))
        .with_header_flags(true, true)
        .build()
        .expect_err("skip and copy are exclusive");
    assert!(matches!(err, PartitionError::HeaderConflict));
    assert!(!first.exists());
    Ok(())
}

#[rstest]
fn unwritable_output_is_reported_with_its_path() -> TestResult {
    let dir = temp_dir();
    let input = write_file(dir.path(), "in.txt", "a\n")?;
    let blocked = dir.path().join("missing").join("two.txt");
    let err = SplitterBuilder::new(&input, dir.path().join("one.txt"), &blocked)
        .with_seed(2_u64)
        .build()?
        .run(io::sink())
        .expect_err("parent directory does not exist");
    match err {
        PartitionError::CreateOutput { path, .. } => assert_eq!(path, blocked),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}
