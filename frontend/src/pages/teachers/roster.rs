//! Roster operations: merging counts into teacher rows, client-side search
//! and sort, and the load bookkeeping that keeps only the newest fetch.

use crate::api::{ApiError, EnrollmentCounts, Teacher, TeacherWithCount};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Email,
    Phone,
    EnrolledCount,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Name,
        SortField::Email,
        SortField::Phone,
        SortField::EnrolledCount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Email => "Email",
            SortField::Phone => "Phone",
            SortField::EnrolledCount => "Enrolled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Same field flips the direction; a new field starts ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }

    pub fn indicator(&self, field: SortField) -> &'static str {
        match (self.field == field, self.direction) {
            (false, _) => "",
            (true, SortDirection::Ascending) => "▲",
            (true, SortDirection::Descending) => "▼",
        }
    }

    pub fn aria_sort(&self, field: SortField) -> &'static str {
        match (self.field == field, self.direction) {
            (false, _) => "none",
            (true, SortDirection::Ascending) => "ascending",
            (true, SortDirection::Descending) => "descending",
        }
    }
}

pub fn merge_roster(teachers: Vec<Teacher>, counts: &EnrollmentCounts) -> Vec<TeacherWithCount> {
    teachers
        .into_iter()
        .map(|teacher| {
            let enrolled_count = counts.get(&teacher.id).copied().unwrap_or(0);
            TeacherWithCount {
                teacher,
                enrolled_count,
            }
        })
        .collect()
}

fn matches_query(row: &TeacherWithCount, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(&row.teacher.name)
        || contains(&row.teacher.email)
        || row.teacher.phone.as_deref().map(contains).unwrap_or(false)
}

pub fn filter_roster(rows: &[TeacherWithCount], query: &str) -> Vec<TeacherWithCount> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| matches_query(row, &needle))
        .cloned()
        .collect()
}

/// Case-insensitive text ordering for the string columns. In the browser this
/// is `String.prototype.localeCompare` with accent sensitivity, so `Émile`
/// sorts next to `Eve` rather than after `Zoe`. Ties fall back to the raw
/// value to keep the order total.
struct TextCollator {
    #[cfg(target_arch = "wasm32")]
    locales: js_sys::Array,
    #[cfg(target_arch = "wasm32")]
    options: js_sys::Object,
}

#[cfg(target_arch = "wasm32")]
impl TextCollator {
    fn new() -> Self {
        use wasm_bindgen::JsValue;

        let options = js_sys::Object::new();
        if js_sys::Reflect::set(
            &options,
            &JsValue::from_str("sensitivity"),
            &JsValue::from_str("accent"),
        )
        .is_err()
        {
            log::warn!("Could not configure collation; using locale defaults");
        }
        Self {
            locales: js_sys::Array::new(),
            options,
        }
    }

    fn primary(&self, a: &str, b: &str) -> Ordering {
        js_sys::JsString::from(a)
            .locale_compare(b, &self.locales, &self.options)
            .cmp(&0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TextCollator {
    fn new() -> Self {
        Self {}
    }

    fn primary(&self, a: &str, b: &str) -> Ordering {
        a.to_lowercase().cmp(&b.to_lowercase())
    }
}

impl TextCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.primary(a, b).then_with(|| a.cmp(b))
    }
}

fn compare_by(
    collator: &TextCollator,
    field: SortField,
    a: &TeacherWithCount,
    b: &TeacherWithCount,
) -> Ordering {
    match field {
        SortField::Name => collator.compare(&a.teacher.name, &b.teacher.name),
        SortField::Email => collator.compare(&a.teacher.email, &b.teacher.email),
        SortField::Phone => match (&a.teacher.phone, &b.teacher.phone) {
            (Some(x), Some(y)) => collator.compare(x, y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortField::EnrolledCount => a.enrolled_count.cmp(&b.enrolled_count),
    }
}

/// Stable sort, so equal keys keep their relative order.
pub fn sort_roster(rows: &mut [TeacherWithCount], sort: SortState) {
    let collator = TextCollator::new();
    rows.sort_by(|a, b| {
        let ordering = compare_by(&collator, sort.field, a, b);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

pub fn visible_roster(
    snapshot: &[TeacherWithCount],
    query: &str,
    sort: SortState,
) -> Vec<TeacherWithCount> {
    let mut rows = filter_roster(snapshot, query);
    sort_roster(&mut rows, sort);
    rows
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RosterStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Last committed roster snapshot plus the status of the current load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterStore {
    pub status: RosterStatus,
    pub snapshot: Vec<TeacherWithCount>,
    generation: u64,
    has_loaded: bool,
}

impl RosterStore {
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.status = RosterStatus::Loading;
        LoadTicket(self.generation)
    }

    /// Applies a finished load. Results from superseded loads are dropped and
    /// `false` is returned. A failure keeps the previous snapshot.
    pub fn commit(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<TeacherWithCount>, ApiError>,
    ) -> bool {
        if ticket.0 != self.generation {
            log::debug!(
                "Discarding stale roster load {} (current {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        match result {
            Ok(rows) => {
                self.snapshot = rows;
                self.has_loaded = true;
                self.status = RosterStatus::Ready;
            }
            Err(err) => self.status = RosterStatus::Failed(err),
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, RosterStatus::Loading)
    }

    pub fn error(&self) -> Option<ApiError> {
        match &self.status {
            RosterStatus::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.status, RosterStatus::Failed(_)) {
            self.status = if self.has_loaded {
                RosterStatus::Ready
            } else {
                RosterStatus::Idle
            };
        }
    }

    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::teacher;

    fn row(
        id: &str,
        name: &str,
        email: &str,
        phone: Option<&str>,
        count: u32,
    ) -> TeacherWithCount {
        TeacherWithCount {
            teacher: teacher(id, name, email, phone),
            enrolled_count: count,
        }
    }

    fn sample() -> Vec<TeacherWithCount> {
        vec![
            row("t1", "bob Stone", "bob@school.org", Some("555-0101"), 3),
            row("t2", "Alice Moss", "alice@school.org", None, 12),
            row("t3", "Carol Reed", "carol@Example.com", Some("555-0199"), 0),
            row("t4", "alice Moss", "alice2@school.org", Some("777-1234"), 3),
        ]
    }

    fn ids(rows: &[TeacherWithCount]) -> Vec<&str> {
        rows.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn merge_defaults_missing_counts_to_zero() {
        let teachers: Vec<Teacher> = (1..=50)
            .map(|i| {
                let id = format!("t{}", i);
                teacher(&id, &format!("Teacher {}", i), &format!("{}@x.org", id), None)
            })
            .collect();
        let missing = ["t7", "t21", "t50"];
        let counts: EnrollmentCounts = teachers
            .iter()
            .filter(|t| !missing.contains(&t.id.as_str()))
            .map(|t| (t.id.clone(), 5))
            .collect();

        let merged = merge_roster(teachers, &counts);

        assert_eq!(merged.len(), 50);
        for r in &merged {
            let expected = if missing.contains(&r.id()) { 0 } else { 5 };
            assert_eq!(r.enrolled_count, expected, "teacher {}", r.id());
        }
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let rows = sample();
        assert_eq!(filter_roster(&rows, ""), rows);
        assert_eq!(filter_roster(&rows, "   "), rows);
    }

    #[test]
    fn filter_matches_name_email_and_phone_case_insensitively() {
        let rows = sample();
        assert_eq!(ids(&filter_roster(&rows, "ALICE")), vec!["t2", "t4"]);
        assert_eq!(ids(&filter_roster(&rows, "example.COM")), vec!["t3"]);
        assert_eq!(ids(&filter_roster(&rows, "0199")), vec!["t3"]);
    }

    #[test]
    fn absent_phone_never_matches_a_query() {
        let rows = vec![row("t2", "Alice Moss", "alice@school.org", None, 1)];
        assert!(filter_roster(&rows, "555").is_empty());
        assert!(filter_roster(&rows, "none").is_empty());
    }

    #[test]
    fn sort_by_name_ignores_case_and_is_stable() {
        let mut rows = sample();
        sort_roster(&mut rows, SortState::default());
        // "Alice Moss" and "alice Moss" tie case-insensitively; raw order breaks it.
        assert_eq!(ids(&rows), vec!["t2", "t4", "t1", "t3"]);
    }

    #[test]
    fn sort_by_count_descending_keeps_ties_in_input_order() {
        let mut rows = sample();
        let sort = SortState {
            field: SortField::EnrolledCount,
            direction: SortDirection::Descending,
        };
        sort_roster(&mut rows, sort);
        assert_eq!(ids(&rows), vec!["t2", "t1", "t4", "t3"]);
    }

    #[test]
    fn sort_by_phone_puts_missing_first_when_ascending() {
        let mut rows = sample();
        sort_roster(
            &mut rows,
            SortState {
                field: SortField::Phone,
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(ids(&rows), vec!["t2", "t1", "t3", "t4"]);
    }

    #[test]
    fn resorting_with_same_state_is_idempotent() {
        for field in SortField::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let sort = SortState { field, direction };
                let mut once = sample();
                sort_roster(&mut once, sort);
                let mut twice = once.clone();
                sort_roster(&mut twice, sort);
                assert_eq!(once, twice, "{:?}", sort);
            }
        }
    }

    #[test]
    fn toggle_flips_same_field_and_resets_new_field() {
        let sort = SortState::default().toggle(SortField::Email);
        assert_eq!(sort.field, SortField::Email);
        assert_eq!(sort.direction, SortDirection::Ascending);

        let name_asc = sort.toggle(SortField::Name);
        assert_eq!(name_asc.direction, SortDirection::Ascending);
        let name_desc = name_asc.toggle(SortField::Name);
        assert_eq!(name_desc.direction, SortDirection::Descending);

        let email = name_desc.toggle(SortField::Email);
        assert_eq!(email.field, SortField::Email);
        assert_eq!(email.direction, SortDirection::Ascending);
    }

    #[test]
    fn indicator_marks_active_field_only() {
        let sort = SortState::default();
        assert_eq!(sort.indicator(SortField::Name), "▲");
        assert_eq!(sort.indicator(SortField::Email), "");
        assert_eq!(sort.toggle(SortField::Name).aria_sort(SortField::Name), "descending");
    }

    #[test]
    fn visible_roster_filters_then_sorts() {
        let rows = visible_roster(
            &sample(),
            "school",
            SortState {
                field: SortField::Name,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(ids(&rows), vec!["t1", "t4", "t2"]);
    }

    #[test]
    fn stale_load_cannot_overwrite_newer_result() {
        let mut store = RosterStore::default();
        let first = store.begin_load();
        let second = store.begin_load();

        assert!(store.commit(second, Ok(vec![row("new", "New", "n@x.org", None, 1)])));
        assert!(!store.commit(first, Ok(vec![row("old", "Old", "o@x.org", None, 1)])));

        assert_eq!(store.status, RosterStatus::Ready);
        assert_eq!(ids(&store.snapshot), vec!["new"]);
    }

    #[test]
    fn stale_failure_does_not_flip_status() {
        let mut store = RosterStore::default();
        let first = store.begin_load();
        let second = store.begin_load();
        assert!(!store.commit(first, Err(ApiError::timeout("slow"))));
        assert!(store.is_loading());
        assert!(store.commit(second, Ok(Vec::new())));
        assert!(store.error().is_none());
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let mut store = RosterStore::default();
        let ticket = store.begin_load();
        store.commit(ticket, Ok(sample()));

        let ticket = store.begin_load();
        store.commit(ticket, Err(ApiError::request_failed("offline")));

        assert_eq!(store.snapshot.len(), 4);
        assert_eq!(store.error().map(|e| e.error), Some("offline".to_string()));

        store.dismiss_error();
        assert_eq!(store.status, RosterStatus::Ready);
    }

    #[test]
    fn dismissing_first_failure_returns_to_idle() {
        let mut store = RosterStore::default();
        let ticket = store.begin_load();
        store.commit(ticket, Err(ApiError::request_failed("offline")));
        assert!(!store.has_loaded());
        store.dismiss_error();
        assert_eq!(store.status, RosterStatus::Idle);
    }
}
