use crate::usecase::event::AppEvent;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

fn app_event_to_json(ev: &AppEvent) -> serde_json::Value {
    match ev {
        AppEvent::PhaseStarted { name } => json!({"type":"phase_started","name":name}),
        AppEvent::PhaseFinished { name } => json!({"type":"phase_finished","name":name}),
        AppEvent::CasesParsed { cases } => json!({"type":"cases_parsed","cases":cases}),
        AppEvent::CaseSolved {
            index,
            vertices,
            edges,
            acyclic,
            cyclic_components,
            entries,
            runs,
            mean_ms,
        } => {
            json!({"type":"case_solved","index":index,"vertices":vertices,"edges":edges,"acyclic":acyclic,"cyclic_components":cyclic_components,"entries":entries,"runs":runs,"mean_ms":mean_ms})
        }
        AppEvent::ResultsWritten { path } => json!({"type":"results_written","path":path}),
        AppEvent::Finished { results } => json!({
            "type":"finished",
            "case_count":results.case_count,
            "total_elapsed_ms":results.total_elapsed_ms,
            "mean_elapsed_per_case_ms":results.mean_elapsed_per_case_ms(),
        }),
    }
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let line = app_event_to_json(&ev);

            // NDJSON to stdout.
            println!("{line}");
        }
    })
}
