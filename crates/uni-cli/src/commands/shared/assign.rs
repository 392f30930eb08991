use anyhow::bail;

/// Split `--set field=value` arguments. An empty value clears the field.
pub fn parse_assignments(raw: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    raw.iter()
        .map(|item| {
            let Some((field, value)) = item.split_once('=') else {
                bail!("expected FIELD=VALUE, got '{item}'");
            };
            let field = field.trim();
            if field.is_empty() {
                bail!("missing field name in '{item}'");
            }
            Ok((field.to_string(), value.to_string()))
        })
        .collect()
}
