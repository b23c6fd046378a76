//! Client-side search, sort and paging over the fetched patient list.
//!
//! None of this goes back to the server. The table works over whatever list was last
//! fetched.

use api_shared::{PatientDto, PatientVisitDto};
use clap::ValueEnum;
use std::cmp::Ordering;

pub const PAGE_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    FirstName,
    LastName,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
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

#[derive(Clone, Debug, Default)]
pub struct PatientTable {
    patients: Vec<PatientDto>,
    search: String,
    sort: Option<(SortColumn, SortDirection)>,
}

impl PatientTable {
    pub fn new(patients: Vec<PatientDto>) -> Self {
        Self {
            patients,
            ..Self::default()
        }
    }

    /// Case-insensitive substring filter over "first last". Empty clears it.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_lowercase();
    }

    /// Selects a sort column the way a clickable header does.
    ///
    /// Selecting the active column flips its direction; selecting another column sorts
    /// it ascending.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some((active, direction)) if active == column => Some((column, direction.flipped())),
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn sort(&self) -> Option<(SortColumn, SortDirection)> {
        self.sort
    }

    /// Every patient passing the search, in sort order.
    pub fn rows(&self) -> Vec<&PatientDto> {
        let mut rows: Vec<&PatientDto> = self
            .patients
            .iter()
            .filter(|p| self.search.is_empty() || full_name(p).contains(&self.search))
            .collect();

        if let Some((column, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare(a, b, column);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn total_records(&self) -> usize {
        self.rows().len()
    }

    pub fn total_pages(&self) -> usize {
        self.total_records().div_ceil(PAGE_SIZE)
    }

    /// One page of rows, 1-based. Pages outside `1..=total_pages` are empty.
    pub fn page(&self, page: usize) -> Vec<&PatientDto> {
        if page == 0 {
            return Vec::new();
        }
        self.rows()
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }
}

fn full_name(patient: &PatientDto) -> String {
    format!("{} {}", patient.first_name, patient.last_name).to_lowercase()
}

fn compare(a: &PatientDto, b: &PatientDto, column: SortColumn) -> Ordering {
    let key = |p: &PatientDto| match column {
        SortColumn::FirstName => p.first_name.to_lowercase(),
        SortColumn::LastName => p.last_name.to_lowercase(),
    };
    key(a).cmp(&key(b))
}

/// Orders visits newest first.
pub fn newest_first(visits: &mut [PatientVisitDto]) {
    visits.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn patient(first: &str, last: &str) -> PatientDto {
        PatientDto {
            id: Uuid::new_v4(),
            first_name: first.into(),
            last_name: last.into(),
            email: "p@example.com".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            created_date: None,
        }
    }

    fn firsts(rows: &[&PatientDto]) -> Vec<String> {
        rows.iter().map(|p| p.first_name.clone()).collect()
    }

    #[test]
    fn search_matches_across_first_and_last_name() {
        let mut table = PatientTable::new(vec![
            patient("John", "Doe"),
            patient("Jane", "Roe"),
            patient("Ann", "Johnson"),
        ]);

        table.set_search("JOHN");
        assert_eq!(firsts(&table.rows()), vec!["John", "Ann"]);

        table.set_search("n d");
        assert_eq!(firsts(&table.rows()), vec!["John"]);

        table.set_search("");
        assert_eq!(table.total_records(), 3);
    }

    #[test]
    fn reselecting_column_toggles_direction() {
        let mut table = PatientTable::new(vec![
            patient("bob", "A"),
            patient("Alice", "C"),
            patient("Carol", "B"),
        ]);

        table.sort_by(SortColumn::FirstName);
        assert_eq!(firsts(&table.rows()), vec!["Alice", "bob", "Carol"]);

        table.sort_by(SortColumn::FirstName);
        assert_eq!(table.sort(), Some((SortColumn::FirstName, SortDirection::Descending)));
        assert_eq!(firsts(&table.rows()), vec!["Carol", "bob", "Alice"]);

        table.sort_by(SortColumn::LastName);
        assert_eq!(table.sort(), Some((SortColumn::LastName, SortDirection::Ascending)));
        assert_eq!(firsts(&table.rows()), vec!["bob", "Carol", "Alice"]);
    }

    #[test]
    fn pages_hold_five_rows() {
        let patients = (0..12).map(|i| patient(&format!("P{:02}", i), "X")).collect();
        let table = PatientTable::new(patients);

        assert_eq!(table.total_records(), 12);
        assert_eq!(table.total_pages(), 3);
        assert_eq!(table.page(1).len(), 5);
        assert_eq!(table.page(3).len(), 2);
        assert_eq!(firsts(&table.page(3)), vec!["P10", "P11"]);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let table = PatientTable::new(vec![patient("A", "B")]);
        assert!(table.page(0).is_empty());
        assert!(table.page(2).is_empty());
        assert_eq!(PatientTable::default().total_pages(), 0);
    }

    #[test]
    fn visits_sort_newest_first() {
        let visit = |day| PatientVisitDto {
            visit_id: Uuid::new_v4(),
            date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            hospital_name: "H".into(),
            hospital_address: "A".into(),
        };
        let mut visits = vec![visit(1), visit(20), visit(5)];

        newest_first(&mut visits);
        let days: Vec<String> = visits.iter().map(|v| v.date.format("%d").to_string()).collect();
        assert_eq!(days, vec!["20", "05", "01"]);
    }
}
