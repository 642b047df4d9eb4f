use crate::charts::{
    bar_spec, bubble_spec, demographic_panel, gauge_spec, BarSpec, BubbleSpec, DemographicPanel,
    GaugeSpec,
};
use crate::dataset::SubjectId;
use crate::error::{DashboardError, Result};
use crate::index::{SubjectIndex, SubjectRecord};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Subject shown before the user picks one.
pub const DEFAULT_SUBJECT: &str = "940";

/// The four fixed drawing targets of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RenderTarget {
    Bar,
    Bubble,
    Gauge,
    SampleMetadata,
}

impl RenderTarget {
    pub const ALL: [Self; 4] = [Self::Bar, Self::Bubble, Self::Gauge, Self::SampleMetadata];

    /// Heading shown on a target before any subject is drawn into it.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bar => "Top 10 OTUs",
            Self::Bubble => "OTUs",
            Self::Gauge => "Washing Frequency",
            Self::SampleMetadata => "Demographic Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "target", content = "spec", rename_all = "kebab-case")]
pub enum RenderCommand {
    Bar(BarSpec),
    Bubble(BubbleSpec),
    Gauge(GaugeSpec),
    SampleMetadata(DemographicPanel),
}

impl RenderCommand {
    pub const fn target(&self) -> RenderTarget {
        match self {
            Self::Bar(_) => RenderTarget::Bar,
            Self::Bubble(_) => RenderTarget::Bubble,
            Self::Gauge(_) => RenderTarget::Gauge,
            Self::SampleMetadata(_) => RenderTarget::SampleMetadata,
        }
    }
}

/// Everything needed to redraw the dashboard for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderCommands {
    pub subject: SubjectId,
    pub commands: Vec<RenderCommand>,
}

impl RenderCommands {
    pub fn for_subject(record: &SubjectRecord) -> Self {
        Self {
            subject: record.name.clone(),
            commands: vec![
                RenderCommand::Bar(bar_spec(record)),
                RenderCommand::Bubble(bubble_spec(record)),
                RenderCommand::Gauge(gauge_spec(record)),
                RenderCommand::SampleMetadata(demographic_panel(record)),
            ],
        }
    }

    /// Hand every command to `renderer`, in target order.
    pub fn apply<R: Renderer + ?Sized>(self, renderer: &mut R) {
        renderer.begin(&self.subject);
        for command in self.commands {
            renderer.draw(command);
        }
    }
}

/// Something that can draw chart specs into the dashboard's targets.
pub trait Renderer {
    /// Called once before the commands for `subject` are drawn.
    fn begin(&mut self, _subject: &SubjectId) {}

    fn draw(&mut self, command: RenderCommand);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Uninitialized,
    Ready(SubjectId),
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Ready(subject) => write!(f, "Ready({subject})"),
        }
    }
}

impl SelectionState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Ready(_) => "Ready",
        }
    }
}

/// Owns the subject index and the currently selected subject, and turns
/// selection events into render commands.
#[derive(Debug)]
pub struct SelectionController {
    index: SubjectIndex,
    state: SelectionState,
}

impl SelectionController {
    pub const fn new(index: SubjectIndex) -> Self {
        Self {
            index,
            state: SelectionState::Uninitialized,
        }
    }

    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    pub const fn index(&self) -> &SubjectIndex {
        &self.index
    }

    pub const fn current(&self) -> Option<&SubjectId> {
        match &self.state {
            SelectionState::Uninitialized => None,
            SelectionState::Ready(subject) => Some(subject),
        }
    }

    /// `Uninitialized -> Ready(default)`. Fires once, after the index is built.
    pub fn initialize(&mut self, default: &SubjectId) -> Result<RenderCommands> {
        if self.state != SelectionState::Uninitialized {
            return Err(self.invalid("Initialize"));
        }

        let commands = self.commands_for(default)?;
        self.state = SelectionState::Ready(default.clone());
        info!(subject = %default, "loaded initial subject");
        Ok(commands)
    }

    /// `Ready(s) -> Ready(subject)`. Reselecting the current subject
    /// recomputes; an unknown subject leaves the state untouched.
    pub fn handle_selection_changed(&mut self, subject: &SubjectId) -> Result<RenderCommands> {
        if self.state == SelectionState::Uninitialized {
            return Err(self.invalid("SelectionChanged"));
        }

        let commands = self.commands_for(subject)?;
        self.state = SelectionState::Ready(subject.clone());
        info!(subject = %subject, "loaded subject");
        Ok(commands)
    }

    fn commands_for(&self, subject: &SubjectId) -> Result<RenderCommands> {
        let Some(record) = self.index.get(subject) else {
            warn!(subject = %subject, state = %self.state, "selection references unknown subject");
            return Err(DashboardError::UnknownSubject(subject.clone()));
        };
        Ok(RenderCommands::for_subject(record))
    }

    fn invalid(&self, event: &'static str) -> DashboardError {
        DashboardError::InvalidTransition {
            from: self.state.name(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::tests::dataset;

    fn controller() -> SelectionController {
        let index = SubjectIndex::build(dataset(&[("940", 940), ("941", 941), ("943", 943)]))
            .unwrap_or_default();
        SelectionController::new(index)
    }

    #[derive(Default)]
    struct RecordingRenderer {
        subjects: Vec<SubjectId>,
        targets: Vec<RenderTarget>,
    }

    impl Renderer for RecordingRenderer {
        fn begin(&mut self, subject: &SubjectId) {
            self.subjects.push(subject.clone());
        }

        fn draw(&mut self, command: RenderCommand) {
            self.targets.push(command.target());
        }
    }

    #[test]
    fn initialize_moves_to_ready_with_four_commands() -> Result<()> {
        let mut controller = controller();
        assert_eq!(controller.state(), &SelectionState::Uninitialized);

        let commands = controller.initialize(&SubjectId::from("940"))?;

        assert_eq!(controller.current(), Some(&SubjectId::from("940")));
        assert_eq!(commands.subject, SubjectId::from("940"));
        let targets = commands
            .commands
            .iter()
            .map(RenderCommand::target)
            .collect::<Vec<_>>();
        assert_eq!(targets, RenderTarget::ALL.to_vec());
        Ok(())
    }

    #[test]
    fn selection_change_switches_subject() -> Result<()> {
        let mut controller = controller();
        controller.initialize(&SubjectId::from("940"))?;

        let commands = controller.handle_selection_changed(&SubjectId::from("943"))?;

        assert_eq!(controller.state(), &SelectionState::Ready(SubjectId::from("943")));
        match &commands.commands[0] {
            RenderCommand::Bar(bar) => assert_eq!(bar.title, "Top 10 OTUs of individual 943"),
            other => panic!("expected bar command first, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn reselecting_current_subject_recomputes() -> Result<()> {
        let mut controller = controller();
        let first = controller.initialize(&SubjectId::from("941"))?;
        let again = controller.handle_selection_changed(&SubjectId::from("941"))?;

        assert_eq!(first, again);
        Ok(())
    }

    #[test]
    fn unknown_subject_keeps_previous_state() -> Result<()> {
        let mut controller = controller();
        controller.initialize(&SubjectId::from("940"))?;

        let result = controller.handle_selection_changed(&SubjectId::from("999"));

        assert_eq!(
            result,
            Err(DashboardError::UnknownSubject(SubjectId::from("999")))
        );
        assert_eq!(controller.state(), &SelectionState::Ready(SubjectId::from("940")));
        Ok(())
    }

    #[test]
    fn unknown_default_stays_uninitialized() {
        let mut controller = controller();
        let result = controller.initialize(&SubjectId::from("999"));

        assert!(matches!(result, Err(DashboardError::UnknownSubject(_))));
        assert_eq!(controller.state(), &SelectionState::Uninitialized);
    }

    #[test]
    fn events_out_of_order_are_rejected() -> Result<()> {
        let mut controller = controller();
        let early = controller.handle_selection_changed(&SubjectId::from("940"));
        assert_eq!(
            early,
            Err(DashboardError::InvalidTransition {
                from: "Uninitialized",
                event: "SelectionChanged",
            })
        );

        controller.initialize(&SubjectId::from("940"))?;
        let twice = controller.initialize(&SubjectId::from("941"));
        assert!(matches!(
            twice,
            Err(DashboardError::InvalidTransition { from: "Ready", .. })
        ));
        assert_eq!(controller.current(), Some(&SubjectId::from("940")));
        Ok(())
    }

    #[test]
    fn every_target_has_a_distinct_heading() {
        let labels = RenderTarget::ALL.map(RenderTarget::label);
        assert_eq!(
            labels,
            ["Top 10 OTUs", "OTUs", "Washing Frequency", "Demographic Info"]
        );
    }

    #[test]
    fn initializes_on_default_subject() -> Result<()> {
        let mut controller = controller();
        controller.initialize(&SubjectId::from(DEFAULT_SUBJECT))?;
        assert_eq!(controller.current(), Some(&SubjectId::from("940")));
        Ok(())
    }

    #[test]
    fn apply_hands_every_command_to_renderer() -> Result<()> {
        let mut controller = controller();
        let mut renderer = RecordingRenderer::default();

        controller.initialize(&SubjectId::from("940"))?.apply(&mut renderer);
        controller
            .handle_selection_changed(&SubjectId::from("941"))?
            .apply(&mut renderer);

        assert_eq!(
            renderer.subjects,
            vec![SubjectId::from("940"), SubjectId::from("941")]
        );
        assert_eq!(renderer.targets.len(), 8);
        Ok(())
    }
}
