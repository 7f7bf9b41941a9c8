//! Column-name normalization applied right after a file is parsed.

use super::source::DataTable;

/// Strip leading and trailing whitespace from every column name.
///
/// Cell values are left alone.
pub fn normalize_headers(mut table: DataTable) -> DataTable {
    for header in &mut table.headers {
        let trimmed = header.trim();
        if trimmed.len() != header.len() {
            *header = trimmed.to_string();
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_header_whitespace() {
        let table = DataTable::new(
            vec![" year".into(), "under30_lottery_pct ".into(), "\tsource\t".into()],
            vec![vec![" 2003".into(), "31".into(), "Gallup ".into()]],
        );
        let table = normalize_headers(table);

        assert_eq!(table.headers, vec!["year", "under30_lottery_pct", "source"]);
        assert_eq!(table.rows[0], vec![" 2003", "31", "Gallup "]);
    }

    #[test]
    fn test_empty_table_is_unchanged() {
        assert_eq!(normalize_headers(DataTable::empty()), DataTable::empty());
    }
}
