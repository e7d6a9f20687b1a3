use super::ApiError;

/// Parse a boolean query flag. Accepts `0`, `1`, `true` and `false`.
pub fn parse_flag(name: &str, value: Option<&str>) -> Result<bool, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some("1" | "true" | "True") => Ok(true),
        Some("0" | "false" | "False") => Ok(false),
        Some(other) => Err(ApiError::validation(format!(
            "Invalid value for {name}: '{other}'. Expected 0 or 1"
        ))),
    }
}

/// Parse a comma separated list of ids such as `1,2,3`.
pub fn parse_id_list(name: &str, value: Option<&str>) -> Result<Vec<i32>, ApiError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    value
        .split(',')
        .map(|segment| {
            let segment = segment.trim();
            segment.parse::<i32>().map_err(|_| {
                ApiError::validation(format!(
                    "Invalid value for {name}: '{segment}' is not an integer id"
                ))
            })
        })
        .collect()
}

/// Parse an optional single id.
pub fn parse_id(name: &str, value: Option<&str>) -> Result<Option<i32>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<i32>().map(Some).map_err(|_| {
            ApiError::validation(format!("Invalid value for {name}: '{v}' is not an integer id"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(!parse_flag("assigned_only", None).unwrap());
        assert!(!parse_flag("assigned_only", Some("0")).unwrap());
        assert!(parse_flag("assigned_only", Some("1")).unwrap());
        assert!(parse_flag("assigned_only", Some("true")).unwrap());
        assert!(!parse_flag("assigned_only", Some("false")).unwrap());
        assert!(parse_flag("assigned_only", Some("yes")).is_err());
        assert!(parse_flag("assigned_only", Some("2")).is_err());
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("options", None).unwrap(), Vec::<i32>::new());
        assert_eq!(parse_id_list("options", Some("3")).unwrap(), vec![3]);
        assert_eq!(parse_id_list("options", Some("1, 2,3")).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_id_list_rejects_malformed() {
        assert!(parse_id_list("options", Some("1,a")).is_err());
        assert!(parse_id_list("options", Some("1,,2")).is_err());
        assert!(parse_id_list("options", Some("")).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("menu", None).unwrap(), None);
        assert_eq!(parse_id("menu", Some("7")).unwrap(), Some(7));
        assert!(parse_id("menu", Some("seven")).is_err());
    }
}
