//! Team member rows generated from the project form's team size.

use crate::dom_ids::{
    MEMBER_ID_CLASS, MEMBER_NAME_CLASS, member_id_id, member_name_id, member_row_id,
};
use crate::view::escape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInput {
    /// Used as both the element id and the form field name.
    pub name: String,
    pub class: &'static str,
    pub placeholder: String,
}

/// Descriptor for one generated name/id pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub index: u32,
    pub name_input: MemberInput,
    pub id_input: MemberInput,
}

impl MemberRow {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name_input: MemberInput {
                name: member_name_id(index),
                class: MEMBER_NAME_CLASS,
                placeholder: format!("Member {} name", index),
            },
            id_input: MemberInput {
                name: member_id_id(index),
                class: MEMBER_ID_CLASS,
                placeholder: format!("Member {} student ID", index),
            },
        }
    }

    pub fn row_id(&self) -> String {
        member_row_id(self.index)
    }

    pub fn to_html(&self, name_value: &str, id_value: &str) -> String {
        format!(
            concat!(
                r#"<div class="form-row member-row" id="{row}">"#,
                r#"<label for="{n}">{np}</label>"#,
                r#"<input type="text" id="{n}" name="{n}" class="{nc}" placeholder="{np}" value="{nv}">"#,
                r#"<label for="{i}">{ip}</label>"#,
                r#"<input type="text" id="{i}" name="{i}" class="{ic}" placeholder="{ip}" maxlength="7" value="{iv}">"#,
                r#"</div>"#
            ),
            row = self.row_id(),
            n = self.name_input.name,
            nc = self.name_input.class,
            np = self.name_input.placeholder,
            nv = escape_html(name_value),
            i = self.id_input.name,
            ic = self.id_input.class,
            ip = self.id_input.placeholder,
            iv = escape_html(id_value),
        )
    }
}

/// A teammate other than the representative, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberEntry {
    pub index: u32,
    pub name: String,
    pub student_id: String,
}

impl TeamMemberEntry {
    pub fn log_line(&self) -> String {
        format!("member {}: {} — {}", self.index, self.name, self.student_id)
    }
}

pub fn serialize_members(entries: &[TeamMemberEntry]) -> String {
    entries
        .iter()
        .map(TeamMemberEntry::log_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn parse_team_size(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Largest team the project form accepts; larger sizes generate no rows.
pub const MAX_TEAM_SIZE: u32 = 5;

/// Rows for a raw team size value: `size - 1` of them when
/// `1 < size <= MAX_TEAM_SIZE`, none otherwise.
pub fn member_rows(raw_team_size: &str) -> Vec<MemberRow> {
    match parse_team_size(raw_team_size) {
        Some(size) if size > 1 && size <= MAX_TEAM_SIZE => {
            (1..size).map(MemberRow::new).collect()
        }
        _ => Vec::new(),
    }
}

/// What the user typed into one generated row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberValues {
    pub name: String,
    pub student_id: String,
}

/// The member container: generated rows, their values and the serialized
/// member log kept in the hidden `otherMembers` input.
#[derive(Debug, Clone, Default)]
pub struct MemberRows {
    rows: Vec<MemberRow>,
    values: Vec<MemberValues>,
    serialized: String,
}

impl MemberRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every row with a fresh set for `raw_team_size`.
    pub fn regenerate(&mut self, raw_team_size: &str) -> &[MemberRow] {
        self.rows = member_rows(raw_team_size);
        self.values = vec![MemberValues::default(); self.rows.len()];
        self.serialized.clear();
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.values.clear();
        self.serialized.clear();
    }

    pub fn rows(&self) -> &[MemberRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sets the name typed into row `index` (1-based). Returns false if no such row exists.
    pub fn set_name(&mut self, index: u32, name: &str) -> bool {
        match self.values_mut(index) {
            Some(values) => {
                values.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_student_id(&mut self, index: u32, student_id: &str) -> bool {
        match self.values_mut(index) {
            Some(values) => {
                values.student_id = student_id.to_string();
                true
            }
            None => false,
        }
    }

    /// Rows paired with their current values, in display order.
    pub fn inputs(&self) -> impl Iterator<Item = (&MemberRow, &MemberValues)> {
        self.rows.iter().zip(self.values.iter())
    }

    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    pub fn set_serialized(&mut self, serialized: String) {
        self.serialized = serialized;
    }

    pub fn to_html(&self) -> String {
        self.inputs()
            .map(|(row, values)| row.to_html(&values.name, &values.student_id))
            .collect()
    }

    fn values_mut(&mut self, index: u32) -> Option<&mut MemberValues> {
        let position = self.rows.iter().position(|row| row.index == index)?;
        self.values.get_mut(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_rows_count_is_team_size_minus_one() {
        assert_eq!(member_rows("4").len(), 3);
        assert_eq!(member_rows("2").len(), 1);
        assert_eq!(member_rows(" 5 ").len(), 4);
    }

    #[test]
    fn test_member_rows_empty_for_small_or_invalid_sizes() {
        assert!(member_rows("1").is_empty());
        assert!(member_rows("0").is_empty());
        assert!(member_rows("-3").is_empty());
        assert!(member_rows("").is_empty());
        assert!(member_rows("two").is_empty());
        assert!(member_rows("2.5").is_empty());
    }

    #[test]
    fn test_member_rows_are_numbered_with_stable_names() {
        let rows = member_rows("3");
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[0].name_input.name, "memberName1");
        assert_eq!(rows[1].id_input.name, "memberId2");
        assert_eq!(rows[1].name_input.class, "member-name-input");
        assert_eq!(rows[1].id_input.class, "member-id-input");
        assert_eq!(rows[0].row_id(), "member-row-1");
    }

    #[test]
    fn test_regenerate_replaces_previous_rows() {
        let mut members = MemberRows::new();
        members.regenerate("4");
        assert!(members.set_name(1, "Sara"));
        members.set_serialized("member 1: Sara — 2310123".to_string());

        members.regenerate("3");
        assert_eq!(members.len(), 2);
        assert!(members.inputs().all(|(_, v)| v.name.is_empty()));

        members.regenerate("1");
        assert!(members.is_empty());
        assert_eq!(members.serialized(), "");
        assert!(!members.set_name(1, "Sara"));
    }

    #[test]
    fn test_member_rows_empty_above_max_team_size() {
        assert_eq!(member_rows("5").len(), 4);
        assert!(member_rows("6").is_empty());
        assert!(member_rows("3000000").is_empty());
        assert!(member_rows("4294967295").is_empty());
    }

    #[test]
    fn test_regenerate_shrink_clears_member_log() {
        let mut members = MemberRows::new();
        members.regenerate("4");
        assert!(members.set_name(3, "Omar"));
        assert!(members.set_student_id(3, "2310456"));
        members.set_serialized("member 3: Omar — 2310456".to_string());

        members.regenerate("3");
        assert_eq!(members.len(), 2);
        assert_eq!(members.serialized(), "");
        assert!(!members.set_name(3, "Omar"));
    }

    #[test]
    fn test_entry_log_line() {
        let entry = TeamMemberEntry {
            index: 2,
            name: "Omar".to_string(),
            student_id: "2310456".to_string(),
        };
        assert_eq!(entry.log_line(), "member 2: Omar — 2310456");

        let joined = serialize_members(&[
            TeamMemberEntry {
                index: 1,
                name: "Sara".to_string(),
                student_id: "2310123".to_string(),
            },
            entry,
        ]);
        assert_eq!(joined, "member 1: Sara — 2310123\nmember 2: Omar — 2310456");
    }

    #[test]
    fn test_to_html_contains_generated_inputs() {
        let mut members = MemberRows::new();
        members.regenerate("3");
        members.set_name(2, "<Omar>");

        let html = members.to_html();
        assert!(html.contains(r#"id="memberName1""#));
        assert!(html.contains(r#"id="memberId2""#));
        assert!(html.contains(r#"class="member-id-input""#));
        assert!(html.contains("&lt;Omar&gt;"));
    }
}
