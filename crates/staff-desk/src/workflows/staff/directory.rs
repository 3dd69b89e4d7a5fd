use super::domain::{StaffId, StaffRecord, VacancyRecord};

/// Generation marker handed out by [`StaffDirectory::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Cached staff and vacancy lists plus the single expanded row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffDirectory {
    staff: Vec<StaffRecord>,
    vacancies: Vec<VacancyRecord>,
    expanded: Option<StaffId>,
    loading: bool,
    generation: u64,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staff(&self) -> &[StaffRecord] {
        &self.staff
    }

    pub fn vacancies(&self) -> &[VacancyRecord] {
        &self.vacancies
    }

    pub fn expanded(&self) -> Option<StaffId> {
        self.expanded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn record(&self, id: StaffId) -> Option<&StaffRecord> {
        self.staff.iter().find(|record| record.id == id)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Swap in both lists from one load. Returns `false` and leaves the
    /// directory untouched when a newer load has started since `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        staff: Vec<StaffRecord>,
        vacancies: Vec<VacancyRecord>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.staff = staff;
        self.vacancies = vacancies;
        self.loading = false;
        true
    }

    /// Close a failed load. Previously loaded lists stay as they were.
    pub fn fail_load(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        true
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn toggle_expand(&mut self, id: StaffId) -> Option<StaffId> {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
        self.expanded
    }

    /// Vacancies created by `staff_id`, in source order.
    pub fn vacancies_for(&self, staff_id: StaffId) -> Vec<&VacancyRecord> {
        self.vacancies
            .iter()
            .filter(|vacancy| vacancy.created_by_staff_id == Some(staff_id))
            .collect()
    }

    pub fn expanded_record(&self) -> Option<&StaffRecord> {
        self.expanded.and_then(|id| self.record(id))
    }

    pub fn expanded_vacancies(&self) -> Vec<&VacancyRecord> {
        self.expanded
            .map(|id| self.vacancies_for(id))
            .unwrap_or_default()
    }
}
