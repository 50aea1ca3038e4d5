//! Display-name linking.
//!
//! Maps an operator-chosen display string back to the record it represents,
//! and a stored id forward to its display string. All lookups are single
//! linear scans over lists that were already fetched for the request.

use answerdesk_types::question::UNKNOWN_NAME;
use answerdesk_types::record::{Record, RecordId};
use answerdesk_types::view::LinkChoice;

/// Id of the first record whose `name_field` equals `chosen_name`.
///
/// Returns `None` for an empty name or when nothing matches. On duplicate
/// display names the first record in input order wins; the ambiguity is
/// logged, not raised.
pub fn resolve_by_name(records: &[Record], chosen_name: &str, name_field: &str) -> Option<RecordId> {
    if chosen_name.is_empty() {
        return None;
    }

    let mut matches = records
        .iter()
        .filter(|r| r.text(name_field) == Some(chosen_name));
    let first = matches.next()?;

    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            display_name = chosen_name,
            field = name_field,
            duplicates = extra + 1,
            chosen = %first.id,
            "display name is ambiguous, linking the first match"
        );
    }

    Some(first.id.clone())
}

/// Display value of the record with the given id, or [`UNKNOWN_NAME`].
pub fn resolve_name_by_id(records: &[Record], id: &RecordId, name_field: &str) -> String {
    records
        .iter()
        .find(|r| &r.id == id)
        .map(|r| r.text_or_empty(name_field).to_string())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// Resolve a dropdown choice to a record id.
///
/// `Id` choices resolve only to ids present in `records`; `Name` choices go
/// through [`resolve_by_name`]. Blank choices never resolve.
pub fn resolve_choice(records: &[Record], choice: &LinkChoice, name_field: &str) -> Option<RecordId> {
    if choice.is_blank() {
        return None;
    }
    match choice {
        LinkChoice::Id(id) => records.iter().find(|r| &r.id == id).map(|r| r.id.clone()),
        LinkChoice::Name(name) => resolve_by_name(records, name, name_field),
    }
}

/// Display names that occur on more than one record, in first-seen order.
pub fn duplicate_names(records: &[Record], name_field: &str) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    let mut duplicates: Vec<String> = Vec::new();

    for name in records.iter().filter_map(|r| r.text(name_field)) {
        if name.is_empty() {
            continue;
        }
        if seen.contains(&name) {
            if !duplicates.iter().any(|d| d == name) {
                duplicates.push(name.to_string());
            }
        } else {
            seen.push(name);
        }
    }

    duplicates
}

/// Distinct non-empty names, in first-seen order.
///
/// This is the "Robotic System" vocabulary. When the robots yield no names
/// at all, `fallback` is returned instead.
pub fn distinct_names(records: &[Record], name_field: &str, fallback: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in records.iter().filter_map(|r| r.text(name_field)) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    if names.is_empty() {
        fallback.to_vec()
    } else {
        names
    }
}

/// Robotic-system name of the chosen robot, used to pre-fill the tag.
pub fn robotic_system_for_robot(
    robots: &[Record],
    choice: &LinkChoice,
    name_field: &str,
) -> Option<String> {
    let id = resolve_choice(robots, choice, name_field)?;
    Some(resolve_name_by_id(robots, &id, name_field)).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(id: &str, name: &str) -> Record {
        let mut fields = serde_json::Map::new();
        fields.insert("Name".to_string(), json!(name));
        Record::new(id, fields)
    }

    #[test]
    fn test_resolve_by_name_empty_list() {
        assert_eq!(resolve_by_name(&[], "x", "Name"), None);
    }

    #[test]
    fn test_resolve_by_name_empty_choice() {
        let records = vec![named("c1", "Acme"), named("c2", "")];
        assert_eq!(resolve_by_name(&records, "", "Name"), None);
    }

    #[test]
    fn test_resolve_by_name_single_match() {
        let records = vec![named("c1", "Acme"), named("c2", "Globex")];
        assert_eq!(
            resolve_by_name(&records, "Globex", "Name"),
            Some(RecordId::from("c2"))
        );
    }

    #[test]
    fn test_resolve_by_name_no_match() {
        let records = vec![named("c1", "Acme")];
        assert_eq!(resolve_by_name(&records, "acme", "Name"), None);
    }

    #[test]
    fn test_resolve_by_name_first_duplicate_wins() {
        let records = vec![named("c1", "Acme"), named("c2", "Acme"), named("c3", "Acme")];
        assert_eq!(
            resolve_by_name(&records, "Acme", "Name"),
            Some(RecordId::from("c1"))
        );
    }

    #[test]
    fn test_resolve_by_name_other_field() {
        let records = vec![named("c1", "Acme")];
        assert_eq!(resolve_by_name(&records, "Acme", "Title"), None);
    }

    #[test]
    fn test_resolve_name_by_id_found() {
        let records = vec![named("c1", "Acme"), named("c2", "Globex")];
        assert_eq!(resolve_name_by_id(&records, &RecordId::from("c2"), "Name"), "Globex");
    }

    #[test]
    fn test_resolve_name_by_id_missing_is_unknown() {
        let records = vec![named("c1", "Acme")];
        assert_eq!(
            resolve_name_by_id(&records, &RecordId::from("zz"), "Name"),
            UNKNOWN_NAME
        );
        assert_eq!(resolve_name_by_id(&[], &RecordId::from("c1"), "Name"), UNKNOWN_NAME);
    }

    #[test]
    fn test_resolve_choice_by_id_requires_existing_record() {
        let records = vec![named("c1", "Acme")];
        assert_eq!(
            resolve_choice(&records, &LinkChoice::Id(RecordId::from("c1")), "Name"),
            Some(RecordId::from("c1"))
        );
        assert_eq!(
            resolve_choice(&records, &LinkChoice::Id(RecordId::from("c9")), "Name"),
            None
        );
    }

    #[test]
    fn test_resolve_choice_by_id_picks_exact_duplicate() {
        let records = vec![named("c1", "Acme"), named("c2", "Acme")];
        assert_eq!(
            resolve_choice(&records, &LinkChoice::Id(RecordId::from("c2")), "Name"),
            Some(RecordId::from("c2"))
        );
    }

    #[test]
    fn test_resolve_choice_blank() {
        let records = vec![named("c1", "Acme")];
        assert_eq!(resolve_choice(&records, &LinkChoice::Name(String::new()), "Name"), None);
    }

    #[test]
    fn test_duplicate_names() {
        let records = vec![
            named("r1", "Hugo"),
            named("r2", "Da Vinci"),
            named("r3", "Hugo"),
            named("r4", "Hugo"),
            named("r5", ""),
            named("r6", ""),
        ];
        assert_eq!(duplicate_names(&records, "Name"), vec!["Hugo".to_string()]);
    }

    #[test]
    fn test_distinct_names_keeps_first_seen_order() {
        let records = vec![named("r1", "Hugo"), named("r2", "Da Vinci"), named("r3", "Hugo")];
        assert_eq!(
            distinct_names(&records, "Name", &["Andere".to_string()]),
            vec!["Hugo".to_string(), "Da Vinci".to_string()]
        );
    }

    #[test]
    fn test_distinct_names_falls_back_when_empty() {
        let fallback = vec!["Da Vinci".to_string(), "Andere".to_string()];
        assert_eq!(distinct_names(&[], "Name", &fallback), fallback);
        assert_eq!(distinct_names(&[named("r1", "")], "Name", &fallback), fallback);
    }

    #[test]
    fn test_robotic_system_for_robot() {
        let robots = vec![named("r1", "Symani"), named("r2", "")];
        assert_eq!(
            robotic_system_for_robot(&robots, &LinkChoice::Name("Symani".to_string()), "Name"),
            Some("Symani".to_string())
        );
        assert_eq!(
            robotic_system_for_robot(&robots, &LinkChoice::Id(RecordId::from("r2")), "Name"),
            None
        );
        assert_eq!(
            robotic_system_for_robot(&robots, &LinkChoice::Name("Hugo".to_string()), "Name"),
            None
        );
    }
}
