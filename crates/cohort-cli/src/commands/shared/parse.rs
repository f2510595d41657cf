use anyhow::{Context, bail};
use cohort_core::entities::{Module, RollCallEntry};
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse `NAME:WEEKS` into a module without courses or projects.
pub fn parse_module_spec(raw: &str) -> anyhow::Result<Module> {
    let Some((name, weeks)) = raw.rsplit_once(':') else {
        bail!("invalid module '{raw}': expected NAME:WEEKS");
    };
    let weeks: i64 = weeks
        .trim()
        .parse()
        .with_context(|| format!("invalid module '{raw}': weeks must be an integer"))?;
    Ok(Module::new(name.trim(), weeks))
}

/// Modules from `--module` flags, or from a JSON file when one is given.
pub fn load_modules(specs: &[String], file: Option<&str>) -> anyhow::Result<Vec<Module>> {
    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read modules file {path}"))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("modules file {path} is not a JSON array of modules"));
    }
    specs.iter().map(|spec| parse_module_spec(spec)).collect()
}

/// Parse `STUDENT=STATUS` or `STUDENT=STATUS:NOTE`. The status is validated
/// later, together with the rest of the roll call.
pub fn parse_roll_call_entry(raw: &str) -> anyhow::Result<RollCallEntry> {
    let Some((student, rest)) = raw.split_once('=') else {
        bail!("invalid entry '{raw}': expected STUDENT=STATUS[:NOTE]");
    };
    if student.trim().is_empty() {
        bail!("invalid entry '{raw}': student id is empty");
    }
    let entry = match rest.split_once(':') {
        Some((status, note)) => RollCallEntry::new(student.trim(), status).with_note(note),
        None => RollCallEntry::new(student.trim(), rest),
    };
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use cohort_core::enums::AdministrativeSituation;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_hyphenated_enum_alias() {
        let situation: AdministrativeSituation =
            parse_enum("in-process", "situation").expect("situation should parse");
        assert_eq!(situation, AdministrativeSituation::InProcess);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<AdministrativeSituation>("expelled", "situation").unwrap_err();
        assert!(err.to_string().contains("invalid situation 'expelled'"));
    }

    #[test]
    fn module_spec_allows_colons_in_name() {
        let module = parse_module_spec("Frontend: React:4").unwrap();
        assert_eq!(module.name, "Frontend: React");
        assert_eq!(module.duration, 4);
        assert!(parse_module_spec("Backend").is_err());
        assert!(parse_module_spec("Backend:five").is_err());
    }

    #[test]
    fn roll_call_entry_with_and_without_note() {
        assert_eq!(
            parse_roll_call_entry("S1=late:bus strike").unwrap(),
            RollCallEntry::new("S1", "late").with_note("bus strike")
        );
        assert_eq!(
            parse_roll_call_entry("S2=").unwrap(),
            RollCallEntry::new("S2", "")
        );
        assert!(parse_roll_call_entry("present").is_err());
    }

    #[test]
    fn modules_file_overrides_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("modules.json");
        std::fs::write(
            &path,
            r#"[{"name":"Intro","duration":2,"courses":["Git"],"projects":[]}]"#,
        )
        .unwrap();

        let modules = load_modules(&["Ignored:9".to_string()], path.to_str()).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].courses, vec!["Git".to_string()]);
    }
}
