use crate::config::AppConfig;
use biodiversity_core::{
    ChartSurface, DashboardError, RawDataset, RenderCommands, SelectionController, SubjectId,
    SubjectIndex,
};
use throbber_widgets_tui::ThrobberState;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Arrow keys move through the subject dropdown
    Browse,
    /// Typing a subject id to jump to
    JumpToSubject,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub load_state: LoadState,
    pub controller: Option<SelectionController>,
    pub surface: ChartSurface,
    pub subjects: Vec<SubjectId>,
    pub dropdown_index: usize,
    pub input_mode: InputMode,
    pub current_input: String,
    pub status_message: String,
    pub show_help: bool,
    pub source_label: String,
    pub default_subject: SubjectId,
    pub throbber_state: ThrobberState,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            running: true,
            load_state: LoadState::Loading,
            controller: None,
            surface: ChartSurface::new(),
            subjects: Vec::new(),
            dropdown_index: 0,
            input_mode: InputMode::Browse,
            current_input: String::new(),
            status_message: String::new(),
            show_help: false,
            source_label: config.source.describe(),
            default_subject: config.default_subject.clone(),
            throbber_state: ThrobberState::default(),
        }
    }

    pub fn update(&mut self) {
        if self.load_state == LoadState::Loading {
            self.throbber_state.calc_next();
        }
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    /// Called once when the dataset fetch resolves.
    pub fn finish_loading(&mut self, result: Result<RawDataset, DashboardError>) {
        let outcome = result.and_then(|dataset| self.install(dataset));

        if let Err(e) = outcome {
            error!(error = %e, "dashboard initialization halted");
            self.status_message = format!("Error: {e}");
            self.load_state = LoadState::Failed(e.to_string());
        }
    }

    /// Build the index, pick the starting subject and draw it.
    ///
    /// Falls back to the first subject when the configured default is not in
    /// the dataset.
    pub fn install(&mut self, dataset: RawDataset) -> Result<RenderCommands, DashboardError> {
        let index = SubjectIndex::build(dataset)?;

        let start = if index.contains(&self.default_subject) {
            self.default_subject.clone()
        } else {
            let first = index.first().map(|record| record.name.clone()).ok_or_else(|| {
                DashboardError::MalformedDataset("dataset contains no subjects".to_string())
            })?;
            warn!(
                requested = %self.default_subject,
                fallback = %first,
                "default subject not in dataset"
            );
            first
        };

        self.subjects = index.names().cloned().collect();
        info!(subjects = self.subjects.len(), "populated subject dropdown");

        let mut controller = SelectionController::new(index);
        let commands = controller.initialize(&start)?;
        commands.clone().apply(&mut self.surface);

        self.controller = Some(controller);
        self.sync_dropdown(&start);
        self.load_state = LoadState::Ready;
        self.status_message = format!("Showing subject {start}");

        Ok(commands)
    }

    /// Selection-changed event. Unknown subjects leave every chart as it was.
    pub fn select(&mut self, subject: &SubjectId) {
        let Some(controller) = self.controller.as_mut() else {
            self.status_message = "Error: dataset not loaded yet".to_string();
            return;
        };

        match controller.handle_selection_changed(subject) {
            Ok(commands) => {
                commands.apply(&mut self.surface);
                self.sync_dropdown(subject);
                self.status_message = format!("Showing subject {subject}");
            }
            Err(e) => {
                self.status_message = format!("Error: {e}");
            }
        }
    }

    pub fn current_subject(&self) -> Option<&SubjectId> {
        self.controller
            .as_ref()
            .and_then(SelectionController::current)
    }

    pub fn highlighted_subject(&self) -> Option<&SubjectId> {
        self.subjects.get(self.dropdown_index)
    }

    pub fn move_highlight(&mut self, delta: isize) {
        if self.subjects.is_empty() {
            return;
        }
        let last = self.subjects.len() - 1;
        self.dropdown_index = self.dropdown_index.saturating_add_signed(delta).min(last);
    }

    pub fn highlight_first(&mut self) {
        self.dropdown_index = 0;
    }

    pub fn highlight_last(&mut self) {
        self.dropdown_index = self.subjects.len().saturating_sub(1);
    }

    pub fn commit_highlighted(&mut self) {
        if let Some(subject) = self.highlighted_subject().cloned() {
            self.select(&subject);
        }
    }

    pub fn start_jump(&mut self) {
        self.input_mode = InputMode::JumpToSubject;
        self.current_input.clear();
    }

    pub fn cancel_jump(&mut self) {
        self.input_mode = InputMode::Browse;
        self.current_input.clear();
    }

    pub fn submit_jump(&mut self) {
        let subject = SubjectId::from(self.current_input.trim());
        self.cancel_jump();
        if subject.as_str().is_empty() {
            return;
        }
        self.select(&subject);
    }

    fn sync_dropdown(&mut self, subject: &SubjectId) {
        if let Some(position) = self.subjects.iter().position(|name| name == subject) {
            self.dropdown_index = position;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::DatasetSource;
    use biodiversity_core::{Demographic, Identifier, SampleSet};

    pub(crate) fn test_config(default_subject: &str) -> AppConfig {
        AppConfig {
            source: DatasetSource::File("samples.json".into()),
            default_subject: SubjectId::from(default_subject),
            debug: false,
        }
    }

    pub(crate) fn test_dataset(names: &[&str]) -> RawDataset {
        RawDataset {
            names: names.iter().map(|name| SubjectId::from(*name)).collect(),
            metadata: names
                .iter()
                .map(|name| Demographic {
                    id: Identifier::Text((*name).to_string()),
                    ethnicity: Some("Caucasian".to_string()),
                    gender: Some("F".to_string()),
                    age: Some(30.0),
                    location: Some("Raleigh/NC".to_string()),
                    bbtype: Some("I".to_string()),
                    wfreq: Some(3.0),
                })
                .collect(),
            samples: names
                .iter()
                .map(|_| SampleSet {
                    id: None,
                    otu_ids: vec![Identifier::Int(10), Identifier::Int(20), Identifier::Int(30)],
                    sample_values: vec![5.0, 50.0, 15.0],
                    otu_labels: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                })
                .collect(),
        }
    }

    pub(crate) fn ready_app(names: &[&str]) -> App {
        let mut app = App::new(&test_config(names.first().copied().unwrap_or("940")));
        app.finish_loading(Ok(test_dataset(names)));
        app
    }

    #[test]
    fn loading_installs_default_subject() {
        let app = ready_app(&["940", "941", "943"]);

        assert!(app.is_ready());
        assert_eq!(app.current_subject(), Some(&SubjectId::from("940")));
        assert_eq!(app.subjects.len(), 3);
        assert_eq!(app.dropdown_index, 0);
        assert_eq!(app.surface.panel_lines()[0], "id: 940");
        let bar = app.surface.bar.as_ref().map(|bar| bar.categories.clone());
        assert_eq!(
            bar,
            Some(vec!["OTU 20".to_string(), "OTU 30".to_string(), "OTU 10".to_string()])
        );
    }

    #[test]
    fn missing_default_falls_back_to_first_subject() {
        let mut app = App::new(&test_config("1601"));
        app.finish_loading(Ok(test_dataset(&["941", "943"])));

        assert!(app.is_ready());
        assert_eq!(app.current_subject(), Some(&SubjectId::from("941")));
    }

    #[test]
    fn fetch_failure_halts_initialization() {
        let mut app = App::new(&test_config("940"));
        app.finish_loading(Err(DashboardError::FetchFailure("connection refused".to_string())));

        assert!(matches!(app.load_state, LoadState::Failed(_)));
        assert!(app.controller.is_none());
        assert!(app.surface.is_blank());
        assert!(app.status_message.starts_with("Error"));
    }

    #[test]
    fn malformed_dataset_halts_initialization() {
        let mut dataset = test_dataset(&["940", "941"]);
        dataset.samples.pop();
        let mut app = App::new(&test_config("940"));
        app.finish_loading(Ok(dataset));

        assert!(matches!(app.load_state, LoadState::Failed(ref msg) if msg.contains("malformed")));
        assert!(app.controller.is_none());
    }

    #[test]
    fn empty_dataset_fails_to_initialize() {
        let mut app = App::new(&test_config("940"));
        app.finish_loading(Ok(test_dataset(&[])));

        assert!(matches!(app.load_state, LoadState::Failed(_)));
    }

    #[test]
    fn selecting_updates_surface_and_dropdown() {
        let mut app = ready_app(&["940", "941", "943"]);

        app.select(&SubjectId::from("943"));

        assert_eq!(app.current_subject(), Some(&SubjectId::from("943")));
        assert_eq!(app.dropdown_index, 2);
        assert_eq!(app.surface.panel_lines()[0], "id: 943");
        assert_eq!(app.status_message, "Showing subject 943");
    }

    #[test]
    fn unknown_subject_keeps_charts_unchanged() {
        let mut app = ready_app(&["940", "941"]);
        let before = app.surface.clone();

        app.select(&SubjectId::from("999"));

        assert_eq!(app.surface, before);
        assert_eq!(app.current_subject(), Some(&SubjectId::from("940")));
        assert_eq!(app.status_message, "Error: unknown subject: 999");
    }

    #[test]
    fn highlight_is_clamped_to_dropdown() {
        let mut app = ready_app(&["940", "941", "943"]);

        app.move_highlight(-4);
        assert_eq!(app.dropdown_index, 0);
        app.move_highlight(10);
        assert_eq!(app.dropdown_index, 2);
        app.highlight_first();
        app.move_highlight(1);
        assert_eq!(app.highlighted_subject(), Some(&SubjectId::from("941")));
    }

    #[test]
    fn jump_selects_typed_subject() {
        let mut app = ready_app(&["940", "941", "943"]);

        app.start_jump();
        app.current_input.push_str(" 941 ");
        app.submit_jump();

        assert_eq!(app.input_mode, InputMode::Browse);
        assert_eq!(app.current_subject(), Some(&SubjectId::from("941")));
        assert!(app.current_input.is_empty());
    }
}
