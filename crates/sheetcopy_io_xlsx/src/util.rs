//! Stateless helpers shared by the workbook reader.

use crate::spec::XlsxReadError;

/// First worksheet name; the only selection policy.
pub fn select_first_sheet_name(l_sheet_names: &[String]) -> Result<&str, XlsxReadError> {
    l_sheet_names
        .first()
        .map(String::as_str)
        .ok_or(XlsxReadError::NoSheets)
}

/// Fail with every required column that `headers` lacks, in required order.
pub fn validate_required_columns(
    headers: &[String],
    required: &[&str],
) -> Result<(), XlsxReadError> {
    let l_missing = required
        .iter()
        .filter(|name| !headers.iter().any(|h| h.as_str() == **name))
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    if l_missing.is_empty() {
        return Ok(());
    }
    Err(XlsxReadError::MissingColumns(l_missing))
}

#[cfg(test)]
mod tests {
    use super::{select_first_sheet_name, validate_required_columns};
    use crate::conf::TUP_REQUIRED_COLUMNS;
    use crate::spec::XlsxReadError;

    #[test]
    fn first_sheet_is_selected_unconditionally() {
        let l_names = vec!["Installers".to_string(), "Notes".to_string()];
        assert_eq!(select_first_sheet_name(&l_names).expect("first"), "Installers");
        assert!(matches!(
            select_first_sheet_name(&[]),
            Err(XlsxReadError::NoSheets)
        ));
    }

    #[test]
    fn required_columns_report_all_missing_names() {
        let headers = vec!["Pattern".to_string(), "Comment".to_string()];
        let err = validate_required_columns(&headers, &TUP_REQUIRED_COLUMNS).expect_err("missing");
        match err {
            XlsxReadError::MissingColumns(l_missing) => {
                assert_eq!(l_missing, vec!["SourcePath", "TargetPath"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn required_columns_are_case_sensitive() {
        let headers = vec![
            "sourcepath".to_string(),
            "Pattern".to_string(),
            "TargetPath".to_string(),
        ];
        assert!(validate_required_columns(&headers, &TUP_REQUIRED_COLUMNS).is_err());

        let headers = vec![
            "TargetPath".to_string(),
            "SourcePath".to_string(),
            "Pattern".to_string(),
        ];
        assert!(validate_required_columns(&headers, &TUP_REQUIRED_COLUMNS).is_ok());
    }
}
