//! Output naming for chunked files.

use std::{
    ffi::OsString,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

/// Minimum width of the numeric chunk suffix.
pub const CHUNK_INDEX_WIDTH: usize = 3;

/// Derives the output paths for `count` chunks of `input`.
///
/// Each name is the input's file stem, an underscore, the one-based chunk
/// index zero-padded to [`CHUNK_INDEX_WIDTH`] digits, and the input's
/// extension. Only the input's file name is used; the outputs are placed in
/// `output_dir`, or relative to the working directory when it is `None`.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use std::path::{Path, PathBuf};
///
/// use phraugr_core::chunk_paths;
///
/// let count = NonZeroUsize::new(3).expect("non-zero");
/// let paths = chunk_paths(Path::new("in/data.csv"), count, None);
/// assert_eq!(
///     paths,
///     vec![
///         PathBuf::from("data_001.csv"),
///         PathBuf::from("data_002.csv"),
///         PathBuf::from("data_003.csv"),
///     ]
/// );
/// ```
#[must_use]
pub fn chunk_paths(input: &Path, count: NonZeroUsize, output_dir: Option<&Path>) -> Vec<PathBuf> {
    (1..=count.get())
        .map(|index| {
            let name = chunk_file_name(input, index);
            match output_dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            }
        })
        .collect()
}

fn chunk_file_name(input: &Path, index: usize) -> OsString {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(format!("_{index:0width$}", width = CHUNK_INDEX_WIDTH));
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::with_extension("data.csv", 1, "data_001.csv")]
    #[case::two_digits("data.csv", 10, "data_010.csv")]
    #[case::wider_than_padding("data.csv", 1234, "data_1234.csv")]
    #[case::no_extension("records", 2, "records_002")]
    #[case::double_extension("archive.tar.gz", 5, "archive.tar_005.gz")]
    #[case::dotfile("/tmp/.hidden", 1, ".hidden_001")]
    #[case::nested("/srv/in/data.tsv", 7, "data_007.tsv")]
    fn chunk_file_name_pads_index(#[case] input: &str, #[case] index: usize, #[case] expected: &str) {
        assert_eq!(chunk_file_name(Path::new(input), index), OsString::from(expected));
    }

    #[test]
    fn ten_chunks_are_numbered_without_gaps() {
        let count = NonZeroUsize::new(10).expect("non-zero");
        let paths = chunk_paths(Path::new("data.csv"), count, None);
        let names: Vec<String> = paths
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        let expected: Vec<String> = (1..=10).map(|i| format!("data_{i:03}.csv")).collect();
        assert_eq!(names, expected);
        assert_eq!(names.first().map(String::as_str), Some("data_001.csv"));
        assert_eq!(names.last().map(String::as_str), Some("data_010.csv"));
    }

    #[test]
    fn output_dir_prefixes_every_path() {
        let count = NonZeroUsize::new(2).expect("non-zero");
        let dir = Path::new("/out");
        let paths = chunk_paths(Path::new("/in/data.csv"), count, Some(dir));
        assert_eq!(
            paths,
            vec![dir.join("data_001.csv"), dir.join("data_002.csv")]
        );
    }
}
