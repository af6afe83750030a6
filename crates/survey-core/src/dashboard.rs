//! Admin dashboard model: surveyor aggregation, search, pagination and the
//! view-mode switch. The dashboard fetches the collection once and works on
//! it in memory from then on.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

use crate::types::SurveyEntry;

/// Rows per page in both lists
pub const PAGE_SIZE: usize = 10;

/// Per-surveyor projection of the submission list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyorSummary {
    pub name: String,
    pub submissions: usize,
    pub last_submission: Option<NaiveDate>,
}

/// Group entries by surveyor name, in order of first appearance.
pub fn summarize_surveyors(entries: &[SurveyEntry]) -> Vec<SurveyorSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<SurveyorSummary> = Vec::new();

    for entry in entries {
        let date = entry.submitted_on();
        match index.get(entry.surveyor_name.as_str()) {
            Some(&i) => {
                let summary = &mut summaries[i];
                summary.submissions += 1;
                summary.last_submission = summary.last_submission.max(date);
            }
            None => {
                index.insert(&entry.surveyor_name, summaries.len());
                summaries.push(SurveyorSummary {
                    name: entry.surveyor_name.clone(),
                    submissions: 1,
                    last_submission: date,
                });
            }
        }
    }
    summaries
}

/// Counters on the landing view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_submissions: usize,
    pub active_surveyors: usize,
    pub this_month: usize,
    pub properties_surveyed: usize,
}

impl DashboardStats {
    pub fn compute(entries: &[SurveyEntry], surveyors: &[SurveyorSummary], today: NaiveDate) -> Self {
        let this_month = entries
            .iter()
            .filter_map(SurveyEntry::submitted_on)
            .filter(|d| d.year() == today.year() && d.month() == today.month())
            .count();

        Self {
            total_submissions: entries.len(),
            active_surveyors: surveyors.len(),
            this_month,
            properties_surveyed: entries.len(),
        }
    }
}

/// Case-insensitive substring match on surveyor, occupier or address.
pub fn matches_query(entry: &SurveyEntry, query: &str) -> bool {
    let needle = query.to_lowercase();
    [
        &entry.surveyor_name,
        &entry.occupiers_name,
        &entry.property_address,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Indices of entries matching `query`; an empty query matches everything.
pub fn filter_entries(entries: &[SurveyEntry], query: &str) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| matches_query(e, query))
        .map(|(i, _)| i)
        .collect()
}

/// Page cursor over a list of known length. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// ceil(total / page_size)
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Move to `page`, clamped into `[1, max(1, page_count)]`.
    pub fn go_to(&mut self, page: usize, total: usize) {
        let last = self.page_count(total).max(1);
        self.page = page.clamp(1, last);
    }

    pub fn next(&mut self, total: usize) {
        self.go_to(self.page + 1, total);
    }

    pub fn previous(&mut self, total: usize) {
        self.go_to(self.page.saturating_sub(1), total);
    }

    pub fn first(&mut self, total: usize) {
        self.go_to(1, total);
    }

    pub fn last(&mut self, total: usize) {
        self.go_to(self.page_count(total), total);
    }

    /// First/previous controls are enabled
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Next/last controls are enabled
    pub fn has_next(&self, total: usize) -> bool {
        self.page < self.page_count(total)
    }

    /// Controls are only drawn when there is more than one page.
    pub fn shows_controls(&self, total: usize) -> bool {
        self.page_count(total) > 1
    }

    pub fn range(&self, total: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    /// "Showing A to B of N submissions"
    pub fn caption(&self, total: usize, noun: &str) -> String {
        let range = self.range(total);
        let from = if total == 0 { 0 } else { range.start + 1 };
        format!("Showing {} to {} of {} {}", from, range.end, total, noun)
    }

    pub fn label(&self, total: usize) -> String {
        format!("Page {} of {}", self.page, self.page_count(total))
    }
}

/// Which panel the dashboard shows. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Dashboard,
    Surveyors,
    Submissions,
    Register,
}

/// Download name for the exported spreadsheet.
pub fn export_filename(record_count: usize, today: NaiveDate) -> String {
    format!(
        "property_survey_{}_records_{}.xlsx",
        record_count,
        today.format("%Y-%m-%d")
    )
}

/// Everything the dashboard screen holds after the initial fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    entries: Vec<SurveyEntry>,
    surveyors: Vec<SurveyorSummary>,
    query: String,
    filtered: Vec<usize>,
    view: ViewMode,
    surveyor_pager: Pager,
    submission_pager: Pager,
    selected: Option<usize>,
}

impl DashboardState {
    pub fn new(entries: Vec<SurveyEntry>) -> Self {
        Self::with_page_size(entries, PAGE_SIZE)
    }

    pub fn with_page_size(entries: Vec<SurveyEntry>, page_size: usize) -> Self {
        let surveyors = summarize_surveyors(&entries);
        let filtered = (0..entries.len()).collect();
        tracing::info!(
            entries = entries.len(),
            surveyors = surveyors.len(),
            "dashboard data loaded"
        );
        Self {
            entries,
            surveyors,
            query: String::new(),
            filtered,
            view: ViewMode::default(),
            surveyor_pager: Pager::new(page_size),
            submission_pager: Pager::new(page_size),
            selected: None,
        }
    }

    pub fn entries(&self) -> &[SurveyEntry] {
        &self.entries
    }

    pub fn surveyors(&self) -> &[SurveyorSummary] {
        &self.surveyors
    }

    pub fn stats(&self, today: NaiveDate) -> DashboardStats {
        DashboardStats::compute(&self.entries, &self.surveyors, today)
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Switch panels. Entering a list starts it on page 1.
    pub fn show(&mut self, view: ViewMode) {
        match view {
            ViewMode::Surveyors => self.surveyor_pager.reset(),
            ViewMode::Submissions => self.submission_pager.reset(),
            ViewMode::Dashboard | ViewMode::Register => {}
        }
        self.view = view;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Refilter; always returns the submission list to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.filtered = filter_entries(&self.entries, &self.query);
        self.submission_pager.reset();
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &SurveyEntry> + '_ {
        self.filtered.iter().map(|&i| &self.entries[i])
    }

    pub fn submission_pager(&self) -> Pager {
        self.submission_pager
    }

    pub fn surveyor_pager(&self) -> Pager {
        self.surveyor_pager
    }

    pub fn go_to_submission_page(&mut self, page: usize) {
        let total = self.filtered.len();
        self.submission_pager.go_to(page, total);
    }

    pub fn go_to_surveyor_page(&mut self, page: usize) {
        let total = self.surveyors.len();
        self.surveyor_pager.go_to(page, total);
    }

    /// Current page of filtered submissions, with their positions in the
    /// full list (used to open the detail view).
    pub fn current_submissions(&self) -> Vec<(usize, &SurveyEntry)> {
        self.submission_pager
            .slice(&self.filtered)
            .iter()
            .map(|&i| (i, &self.entries[i]))
            .collect()
    }

    pub fn current_surveyors(&self) -> &[SurveyorSummary] {
        self.surveyor_pager.slice(&self.surveyors)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = Some(index);
        }
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&SurveyEntry> {
        self.selected.map(|i| &self.entries[i])
    }

    /// Export is offered only when the filter leaves something to export.
    pub fn can_export(&self) -> bool {
        !self.filtered.is_empty()
    }

    pub fn export_filename(&self, today: NaiveDate) -> String {
        export_filename(self.filtered.len(), today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(surveyor: &str, occupier: &str, address: &str, date: &str) -> SurveyEntry {
        SurveyEntry {
            surveyor_name: surveyor.to_string(),
            occupiers_name: occupier.to_string(),
            property_address: address.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    fn many(n: usize) -> Vec<SurveyEntry> {
        (0..n)
            .map(|i| entry(&format!("S{}", i % 4), "Occ", "Addr", "2025-09-01"))
            .collect()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_groups_and_tracks_latest() {
        let entries = vec![
            entry("Ravi", "A", "X", "2025-08-30"),
            entry("Asha", "B", "Y", "2025-09-02"),
            entry("Ravi", "C", "Z", "2025-09-05T09:00:00Z"),
            entry("Ravi", "D", "W", "2025-09-01"),
        ];
        let summary = summarize_surveyors(&entries);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].name, "Ravi");
        assert_eq!(summary[0].submissions, 3);
        assert_eq!(summary[0].last_submission, Some(day(2025, 9, 5)));
        assert_eq!(summary[1].submissions, 1);
    }

    #[test]
    fn test_stats_this_month() {
        let entries = vec![
            entry("Ravi", "A", "X", "2025-09-01"),
            entry("Ravi", "A", "X", "2024-09-01"),
            entry("Asha", "A", "X", "2025-08-31"),
            entry("Asha", "A", "X", "not a date"),
        ];
        let surveyors = summarize_surveyors(&entries);
        let stats = DashboardStats::compute(&entries, &surveyors, day(2025, 9, 14));
        assert_eq!(stats.total_submissions, 4);
        assert_eq!(stats.active_surveyors, 2);
        assert_eq!(stats.this_month, 1);
        assert_eq!(stats.properties_surveyed, 4);
    }

    #[test]
    fn test_search_is_case_insensitive_or_over_three_fields() {
        let mut e = entry("Ravi Kumar", "Meena Devi", "12 Mall Road", "2025-09-01");
        e.ward_no = "mall".to_string();
        e.father_name = "Zed".to_string();
        assert!(matches_query(&e, "RAVI"));
        assert!(matches_query(&e, "devi"));
        assert!(matches_query(&e, "mall road"));
        assert!(!matches_query(&e, "zed"));
        assert!(matches_query(&e, ""));
    }

    #[test]
    fn test_query_change_resets_page() {
        let mut state = DashboardState::new(many(35));
        state.show(ViewMode::Submissions);
        state.go_to_submission_page(3);
        assert_eq!(state.submission_pager().page(), 3);
        state.set_query("s1");
        assert_eq!(state.submission_pager().page(), 1);
        assert_eq!(state.filtered_len(), 9);
        state.set_query("");
        assert_eq!(state.filtered_len(), 35);
    }

    #[test]
    fn test_twenty_three_records_give_three_pages() {
        let mut state = DashboardState::new(many(23));
        let pager = state.submission_pager();
        assert_eq!(pager.page_count(23), 3);
        assert_eq!(state.current_submissions().len(), 10);
        state.go_to_submission_page(2);
        assert_eq!(state.current_submissions().len(), 10);
        state.go_to_submission_page(3);
        assert_eq!(state.current_submissions().len(), 3);
        assert_eq!(
            state.submission_pager().caption(23, "submissions"),
            "Showing 21 to 23 of 23 submissions"
        );
    }

    #[test]
    fn test_pager_bounds() {
        let mut pager = Pager::default();
        assert!(!pager.has_previous());
        assert!(pager.has_next(23));
        pager.go_to(99, 23);
        assert_eq!(pager.page(), 3);
        assert!(!pager.has_next(23));
        assert!(pager.has_previous());
        pager.go_to(0, 23);
        assert_eq!(pager.page(), 1);

        pager.last(23);
        assert_eq!(pager.page(), 3);
        pager.previous(23);
        assert_eq!(pager.page(), 2);
        pager.first(23);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_pager_empty_list() {
        let mut pager = Pager::default();
        assert_eq!(pager.page_count(0), 0);
        pager.next(0);
        assert_eq!(pager.page(), 1);
        assert!(!pager.has_next(0));
        assert!(!pager.shows_controls(0));
        assert_eq!(pager.range(0), 0..0);
        assert_eq!(pager.caption(0, "submissions"), "Showing 0 to 0 of 0 submissions");
    }

    #[test]
    fn test_lists_paginate_independently() {
        let mut state = DashboardState::new(many(45));
        state.go_to_submission_page(4);
        state.go_to_surveyor_page(2);
        assert_eq!(state.submission_pager().page(), 4);
        assert_eq!(state.surveyor_pager().page(), 1);
        assert_eq!(state.current_surveyors().len(), 4);

        state.show(ViewMode::Submissions);
        assert_eq!(state.submission_pager().page(), 1);
    }

    #[test]
    fn test_detail_selection_does_not_mutate() {
        let mut state = DashboardState::new(many(3));
        let before = state.entries().to_vec();
        state.select(1);
        assert_eq!(state.selected(), Some(&before[1]));
        state.close_details();
        assert!(state.selected().is_none());
        state.select(7);
        assert!(state.selected().is_none());
        assert_eq!(state.entries(), &before[..]);
    }

    #[test]
    fn test_export_uses_filtered_count() {
        let mut state = DashboardState::new(many(12));
        state.set_query("s2");
        assert_eq!(
            state.export_filename(day(2025, 9, 14)),
            "property_survey_3_records_2025-09-14.xlsx"
        );
        state.set_query("nobody");
        assert!(!state.can_export());
    }
}
