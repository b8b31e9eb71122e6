use crate::cgpa::{self, Tally};
use crate::course::{CourseId, CourseUpdate, GradeTable};
use crate::storage::{self, PersistenceAdapter, RestoreError, StorageError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CalcMode {
    /// Every change to the table recomputes the CGPA.
    #[default]
    Auto,
    /// The CGPA only changes on `calculate_now`.
    Manual,
}

/// One user's session: the course table, where it is saved, and the CGPA
/// currently on display.
///
/// Every successful edit is saved straight away. A save that fails leaves the
/// edit in place and hands the error back.
pub struct Calculator<S> {
    table: GradeTable,
    mode: CalcMode,
    cgpa: Option<f64>,
    store: S,
}

impl<S: PersistenceAdapter> Calculator<S> {
    pub fn new(table: GradeTable, store: S) -> Self {
        let cgpa = cgpa::compute(&table);
        Calculator {
            table,
            mode: CalcMode::default(),
            cgpa,
            store,
        }
    }

    /// Starts from whatever `store` holds, falling back to the default table.
    pub fn restore(store: S, on_error: impl FnOnce(&RestoreError)) -> Self {
        let table = storage::restore_table(&store, on_error);
        Self::new(table, store)
    }

    pub fn table(&self) -> &GradeTable {
        &self.table
    }

    pub fn mode(&self) -> CalcMode {
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The CGPA on display. In manual mode it may lag behind the table.
    pub fn cgpa(&self) -> Option<f64> {
        self.cgpa
    }

    pub fn tally(&self) -> Tally {
        cgpa::tally(&self.table)
    }

    pub fn add_course(&mut self) -> Result<CourseId, StorageError> {
        let id = self.table.add();
        self.changed().map(|_| id)
    }

    /// `Ok(false)` when nothing was removed.
    pub fn remove_course(&mut self, id: &CourseId) -> Result<bool, StorageError> {
        if !self.table.remove(id) {
            return Ok(false);
        }
        self.changed().map(|_| true)
    }

    /// `Ok(false)` when `id` is unknown.
    pub fn update_course(
        &mut self,
        id: &CourseId,
        update: CourseUpdate,
    ) -> Result<bool, StorageError> {
        if !self.table.update(id, update) {
            return Ok(false);
        }
        self.changed().map(|_| true)
    }

    /// Switching back to auto recomputes straight away.
    pub fn set_mode(&mut self, mode: CalcMode) {
        if mode == CalcMode::Auto && self.mode != CalcMode::Auto {
            self.calculate_now();
        }
        self.mode = mode;
    }

    pub fn toggle_auto(&mut self) {
        match self.mode {
            CalcMode::Auto => self.set_mode(CalcMode::Manual),
            CalcMode::Manual => self.set_mode(CalcMode::Auto),
        }
    }

    pub fn calculate_now(&mut self) -> Option<f64> {
        self.cgpa = cgpa::compute(&self.table);
        self.cgpa
    }

    pub fn save_now(&self) -> Result<(), StorageError> {
        storage::save_table(&self.store, &self.table)
    }

    fn changed(&mut self) -> Result<(), StorageError> {
        let saved = self.save_now();
        if self.mode == CalcMode::Auto {
            self.calculate_now();
        }
        saved
    }
}
