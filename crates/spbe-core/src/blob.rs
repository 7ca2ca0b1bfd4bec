//! Blob path rules for uploaded evidence files.
//!
//! Paths have the form `{unit_id}/{timestamp_millis}_{sanitized_name}`.

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the storage path of an uploaded file.
#[must_use]
pub fn evidence_blob_path(unit_id: &str, timestamp_millis: i64, original_name: &str) -> String {
    format!(
        "{unit_id}/{timestamp_millis}_{}",
        sanitize_file_name(original_name)
    )
}

/// Whether `path` lives directly under the unit's prefix.
///
/// Guards client-named paths on evidence writes and before blob deletion.
#[must_use]
pub fn is_within_unit(path: &str, unit_id: &str) -> bool {
    path.strip_prefix(unit_id)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|name| !name.is_empty() && !name.contains('/') && !name.starts_with(".."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("laporan.pdf", "laporan.pdf")]
    #[case("report (final)!.pdf", "report__final__.pdf")]
    #[case("rekap_2024.xlsx", "rekap_2024.xlsx")]
    #[case("SK Walikota-12.PDF", "SK_Walikota-12.PDF")]
    #[case("dokumen ñ.docx", "dokumen__.docx")]
    fn sanitizes_each_disallowed_char(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_file_name(input), expected);
    }

    #[test]
    fn path_is_prefixed_by_unit_and_timestamp() {
        assert_eq!(
            evidence_blob_path("5", 1_700_000_000_000, "report (final)!.pdf"),
            "5/1700000000000_report__final__.pdf"
        );
    }

    #[rstest]
    #[case("5/1700000000000_a.pdf", "5", true)]
    #[case("55/1700000000000_a.pdf", "5", false)]
    #[case("7/1700000000000_a.pdf", "5", false)]
    #[case("5/../7/a.pdf", "5", false)]
    #[case("5/", "5", false)]
    fn unit_prefix_check(#[case] path: &str, #[case] unit: &str, #[case] expected: bool) {
        assert_eq!(is_within_unit(path, unit), expected);
    }
}
