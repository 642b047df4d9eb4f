use biodiversity_core::{DashboardError, RawDataset, RenderCommand, RenderCommands};
use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use tokio::task::JoinHandle;

use crate::app::{handle_input, App};
use crate::config::DatasetSource;
use crate::loader::load_dataset;
use crate::ui;

type PendingLoad = JoinHandle<Result<RawDataset, DashboardError>>;

/// Run in headless mode: load, initialize for the default subject, print
/// the four chart specs and exit.
pub async fn run_headless(app: &mut App, source: &DatasetSource, json: bool) -> Result<()> {
    let dataset = load_dataset(source).await?;
    let commands = app.install(dataset)?;

    if json {
        let json = serde_json::to_string_pretty(&commands)?;
        println!("{json}");
    } else {
        print!("{}", headless_text(&commands));
    }

    Ok(())
}

fn headless_text(commands: &RenderCommands) -> String {
    let mut out = format!("\nSubject {}\n", commands.subject);
    out.push_str(&"=".repeat(8 + commands.subject.as_str().len()));
    out.push('\n');

    for command in &commands.commands {
        match command {
            RenderCommand::Bar(bar) => {
                out.push_str(&format!("\n{}:\n", bar.title));
                for ((category, value), label) in
                    bar.categories.iter().zip(&bar.values).zip(&bar.hover_text)
                {
                    out.push_str(&format!("- {category}: {value} ({label})\n"));
                }
            }
            RenderCommand::Bubble(bubble) => {
                out.push_str(&format!("\n{}: {} OTUs\n", bubble.title, bubble.len()));
            }
            RenderCommand::Gauge(gauge) => {
                let value = gauge
                    .value
                    .map_or_else(|| "no data".to_string(), |value| value.to_string());
                out.push_str(&format!(
                    "\n{}: {value} (range {}-{})\n",
                    gauge.title, gauge.range[0], gauge.range[1]
                ));
            }
            RenderCommand::SampleMetadata(panel) => {
                out.push_str("\nDemographic Info:\n");
                for line in &panel.lines {
                    out.push_str(&format!("- {line}\n"));
                }
            }
        }
    }

    out
}

/// Run the dashboard event loop. `pending` resolves to the dataset; until it
/// does the loading screen is shown.
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut pending: Option<PendingLoad>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        app.update();

        if pending.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = pending.take() {
                let result = handle.await.unwrap_or_else(|e| {
                    Err(DashboardError::FetchFailure(format!(
                        "dataset loader stopped: {e}"
                    )))
                });
                app.finish_loading(result);
            }
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {}
            }
        }
    }

    if let Some(handle) = pending {
        handle.abort();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{ready_app, test_config};

    #[test]
    fn headless_text_lists_every_chart() -> Result<()> {
        let mut app = App::new(&test_config("941"));
        let commands = app.install(crate::app::state::tests::test_dataset(&["940", "941"]))?;

        let text = headless_text(&commands);

        assert!(text.contains("Subject 941"));
        assert!(text.contains("Top 10 OTUs of individual 941:"));
        assert!(text.contains("- OTU 20: 50 (b)"));
        assert!(text.contains("OTUs present in individual 941: 3 OTUs"));
        assert!(text.contains("Washing Frequency (scrubs/week): 3 (range 0-9)"));
        assert!(text.contains("- wfreq: 3"));
        Ok(())
    }

    #[test]
    fn headless_json_is_tagged_by_target() -> Result<()> {
        let app = ready_app(&["940"]);
        let controller = app
            .controller
            .as_ref()
            .ok_or_else(|| color_eyre::eyre::eyre!("controller missing"))?;
        let record = controller
            .index()
            .first()
            .ok_or_else(|| color_eyre::eyre::eyre!("no subjects"))?;

        let value = serde_json::to_value(RenderCommands::for_subject(record))?;

        assert_eq!(value["subject"], "940");
        assert_eq!(value["commands"][0]["target"], "bar");
        assert_eq!(value["commands"][3]["target"], "sample-metadata");
        assert_eq!(value["commands"][2]["spec"]["range"][1], 9.0);
        Ok(())
    }
}
