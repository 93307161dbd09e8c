//! Pure view-model renderers.
//!
//! Each renderer maps a view model to terminal lines; rendering the
//! same view twice yields the same lines. Printing happens only in the
//! two helpers at the bottom.

use analyzer_core::{
    AnalyzeViewModel, RegionView, SelectionSummary, StepStatus, SummarizeViewModel,
    SummaryOutputView, TopicsView, UploadViewModel, SUMMARY_PLACEHOLDER,
};

const STEP_LABELS: [&str; 3] = ["Choose file", "Extract text", "Predict topics"];

pub fn upload_lines(view: &UploadViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    match &view.selection_summary {
        Some(SelectionSummary::Single { name, size_label }) => {
            lines.push(format!("Selected: {} ({})", name, size_label));
        }
        Some(SelectionSummary::Multiple { count }) => {
            lines.push(format!("Selected: {} files selected", count));
        }
        None => lines.push("No files selected".to_string()),
    }

    let flags = view.options.enabled_flags();
    if !flags.is_empty() {
        lines.push(format!("Options: {}", flags.join(", ")));
    }

    if let Some(status) = &view.status_line {
        lines.push(status.clone());
    }

    if let Some(url) = &view.navigate_to {
        lines.push(format!("Next: {}", url));
    }

    lines
}

pub fn analyze_lines(view: &AnalyzeViewModel) -> Vec<String> {
    let mut lines = vec![step_line(view)];

    if let Some(label) = &view.file_label {
        lines.push(format!("File: {}", label));
    }

    if let Some(status) = &view.status_line {
        lines.push(status.clone());
    }

    match &view.extraction_region {
        RegionView::Hidden => {}
        RegionView::Text(text) => {
            lines.push("Extracted text:".to_string());
            lines.push(text.clone());
        }
        RegionView::Error(message) => lines.push(format!("Error: {}", message)),
    }

    match &view.topics_region {
        TopicsView::Hidden => {}
        TopicsView::Topics(topics) => {
            let tags: Vec<String> = topics.iter().map(|topic| format!("[{}]", topic)).collect();
            lines.push(format!("Topics: {}", tags.join(" ")));
        }
        TopicsView::Error(message) => lines.push(format!("Error: {}", message)),
    }

    lines
}

/// One line mirroring the page's step circles: a check for completed
/// steps, the step number for the current one, blank for upcoming.
fn step_line(view: &AnalyzeViewModel) -> String {
    let slots: Vec<String> = view
        .steps
        .iter()
        .zip(STEP_LABELS)
        .map(|(step, label)| {
            let mark = match step.status {
                StepStatus::Completed => "✓".to_string(),
                StepStatus::Current => step.index.to_string(),
                StepStatus::Upcoming => " ".to_string(),
            };
            format!("[{}] {}", mark, label)
        })
        .collect();
    slots.join("  ")
}

pub fn summarize_lines(view: &SummarizeViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if !view.text.is_empty() {
        lines.push(format!("{} characters", view.char_count));
    }
    if let Some(label) = &view.file_label {
        lines.push(format!("File: {}", label));
    }
    if view.busy {
        lines.push("Summarizing...".to_string());
    }

    match &view.output {
        SummaryOutputView::Placeholder => lines.push(SUMMARY_PLACEHOLDER.to_string()),
        SummaryOutputView::Result(result) => {
            if !result.key_points.is_empty() {
                lines.push("Key points:".to_string());
                for point in &result.key_points {
                    lines.push(format!("  - {}", point));
                }
            }
            lines.push("Summary:".to_string());
            lines.push(result.summary.clone());
        }
    }

    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Stand-in for the page's blocking alert dialog.
pub fn alert(message: &str) {
    eprintln!("[!] {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::{AnalyzeMsg, AnalyzeState, FileCandidate, SummarizeState, UploadState};
    use analyzer_core::{update_analyze, UploadOptions};

    fn ready_analyze() -> AnalyzeState {
        let state = AnalyzeState::new();
        let (state, _) = update_analyze(
            state,
            AnalyzeMsg::FileChosen(FileCandidate::new("scan.png", "image/png", 2048)),
        );
        state
    }

    #[test]
    fn rendering_is_idempotent() {
        let state = ready_analyze();
        assert_eq!(analyze_lines(&state.view()), analyze_lines(&state.view()));
    }

    #[test]
    fn ready_state_marks_step_two_current() {
        let lines = analyze_lines(&ready_analyze().view());
        assert_eq!(lines[0], "[✓] Choose file  [2] Extract text  [ ] Predict topics");
        assert_eq!(lines[1], "File: scan.png");
    }

    #[test]
    fn empty_upload_form_shows_no_selection() {
        let view = UploadState::new(UploadOptions::default()).view();
        assert_eq!(upload_lines(&view), vec!["No files selected".to_string()]);
    }

    #[test]
    fn enabled_options_are_listed() {
        let options = UploadOptions {
            topic_classification: true,
            ..UploadOptions::default()
        };
        let lines = upload_lines(&UploadState::new(options).view());
        assert!(lines.contains(&"Options: topic_classification".to_string()));
    }

    #[test]
    fn summarizer_starts_with_the_placeholder() {
        let lines = summarize_lines(&SummarizeState::new().view());
        assert_eq!(lines, vec![SUMMARY_PLACEHOLDER.to_string()]);
    }
}
