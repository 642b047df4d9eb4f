use biodiversity_core::{
    ChartSurface, DashboardError, RawDataset, SelectionController, SubjectId, SubjectIndex,
    DEFAULT_SUBJECT,
};

pub enum LoadState {
    Loading,
    Ready(Box<WebDashboard>),
    Failed(String),
}

/// Browser-side dashboard state, mutated only from key handlers.
pub struct WebDashboard {
    pub controller: SelectionController,
    pub surface: ChartSurface,
    pub subjects: Vec<SubjectId>,
    pub cursor: usize,
    pub status: String,
}

impl WebDashboard {
    pub fn from_dataset(dataset: RawDataset) -> Result<Self, DashboardError> {
        let index = SubjectIndex::build(dataset)?;
        let default = SubjectId::from(DEFAULT_SUBJECT);
        let start = if index.contains(&default) {
            default
        } else {
            index.first().map(|record| record.name.clone()).ok_or_else(|| {
                DashboardError::MalformedDataset("dataset contains no subjects".to_string())
            })?
        };

        let subjects = index.names().cloned().collect::<Vec<_>>();
        let cursor = subjects.iter().position(|name| *name == start).unwrap_or(0);

        let mut controller = SelectionController::new(index);
        let mut surface = ChartSurface::new();
        controller.initialize(&start)?.apply(&mut surface);

        Ok(Self {
            controller,
            surface,
            subjects,
            cursor,
            status: format!("Showing subject {start}"),
        })
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.subjects.is_empty() {
            return;
        }
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.subjects.len() - 1);
    }

    pub fn commit_cursor(&mut self) {
        let Some(subject) = self.subjects.get(self.cursor).cloned() else {
            return;
        };
        match self.controller.handle_selection_changed(&subject) {
            Ok(commands) => {
                commands.apply(&mut self.surface);
                self.status = format!("Showing subject {subject}");
            }
            Err(error) => {
                self.status = format!("Error: {error}");
            }
        }
    }

    pub fn current(&self) -> Option<&SubjectId> {
        self.controller.current()
    }
}
