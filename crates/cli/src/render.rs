use casequery_orchestrator::{PhaseState, ReportPhase, SearchPhase};
use casequery_protocol::{Jurisdiction, QueryState, ReportResult, SearchResult};

use crate::controller::SuggestionView;

pub struct Frame<'a> {
    pub query: &'a QueryState,
    pub jurisdiction_label: &'a str,
    pub suggestions: &'a SuggestionView,
    /// Canned questions, listed while the query is empty.
    pub examples: &'a [&'a str],
    pub phases: &'a PhaseState,
}

/// Display label for `value`; a value missing from the list is shown as is.
pub fn jurisdiction_label<'a>(list: &'a [Jurisdiction], value: &'a str) -> &'a str {
    list.iter()
        .find(|j| j.value == value)
        .map_or(value, |j| j.label.as_str())
}

pub fn render_frame(frame: &Frame<'_>) -> Vec<String> {
    let mut lines = vec![
        format!("Jurisdiction: {}  (Tab to change)", frame.jurisdiction_label),
        format!("> {}", frame.query.text()),
    ];

    if frame.query.text().is_empty() && !frame.examples.is_empty() {
        lines.push("Try an example (Ctrl-E):".to_string());
        lines.extend(frame.examples.iter().map(|example| format!("    {example}")));
    }

    if frame.suggestions.open {
        for (index, item) in frame.suggestions.items.iter().enumerate() {
            let marker = if frame.suggestions.selected == Some(index) {
                '▸'
            } else {
                ' '
            };
            lines.push(format!("  {marker} {item}"));
        }
    }

    lines.push(String::new());
    lines.extend(render_phases(frame.phases));
    lines
}

pub fn render_phases(phases: &PhaseState) -> Vec<String> {
    let mut lines = Vec::new();
    match &phases.search {
        SearchPhase::Idle => {}
        SearchPhase::Loading => lines.push("Searching case law...".to_string()),
        SearchPhase::Error(message) => lines.push(format!("Error: {message}")),
        SearchPhase::Success(result) => render_results(result, &mut lines),
    }

    match &phases.report {
        ReportPhase::Idle | ReportPhase::Skipped => {}
        ReportPhase::Loading => lines.push("Generating insights...".to_string()),
        ReportPhase::Unavailable => lines.push("No insights available.".to_string()),
        ReportPhase::Success(report) => render_report(report, &mut lines),
    }
    lines
}

fn render_results(result: &SearchResult, lines: &mut Vec<String>) {
    lines.push(format!(
        "{} cases found ({:.2}s)",
        result.total_results, result.processing_time
    ));
    if let Some(clarification) = result
        .clarification
        .as_ref()
        .filter(|c| c.needs_clarification)
    {
        lines.push(clarification.clarification_message.clone());
        for refinement in &clarification.suggested_refinements {
            lines.push(format!("  try: {refinement}"));
        }
    }
    for case in &result.results {
        lines.push(format!(
            "  - {} ({}, {}) {}",
            case.case_name, case.citation, case.year, case.court
        ));
    }
}

fn render_report(report: &ReportResult, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("Executive summary:".to_string());
    lines.push(format!("  {}", report.executive_summary));
    for insight in &report.key_insights {
        lines.push(format!("  [{}] {}", insight.category, insight.insight));
    }
    let sections = [
        ("Procedural recommendations", &report.procedural_recommendations),
        ("Legal warnings", &report.legal_warnings),
        ("Jurisdiction notes", &report.jurisdiction_specific_notes),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        lines.push(format!("{title}:"));
        lines.extend(items.iter().map(|item| format!("  - {item}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casequery_protocol::CaseSummary;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn result(cases: usize) -> SearchResult {
        SearchResult {
            query: "terry stop".to_string(),
            results: (0..cases)
                .map(|n| CaseSummary {
                    case_name: format!("Case {n}"),
                    citation: "392 U.S. 1".to_string(),
                    year: 1968,
                    court: "Supreme Court".to_string(),
                    summary: String::new(),
                    key_takeaways: vec![],
                    facts: String::new(),
                    legal_principle: String::new(),
                    ruling: String::new(),
                    relevance_score: 1.0,
                    full_text_link: None,
                    jurisdiction: None,
                })
                .collect(),
            total_results: cases,
            processing_time: 1.5,
            jurisdiction_filter: None,
            clarification: None,
        }
    }

    #[test]
    fn search_error_renders_banner_only() {
        let phases = PhaseState {
            search: SearchPhase::Error("service unavailable".to_string()),
            ..Default::default()
        };
        assert_eq!(render_phases(&phases), vec!["Error: service unavailable"]);
    }

    #[test]
    fn loading_report_is_shown_under_results() {
        let phases = PhaseState {
            search: SearchPhase::Success(Arc::new(result(1))),
            report: ReportPhase::Loading,
            ..Default::default()
        };
        assert_eq!(
            render_phases(&phases),
            vec![
                "1 cases found (1.50s)".to_string(),
                "  - Case 0 (392 U.S. 1, 1968) Supreme Court".to_string(),
                "Generating insights...".to_string(),
            ]
        );
    }

    #[test]
    fn frame_marks_highlighted_suggestion() {
        let query = QueryState::new("ter", "federal");
        let suggestions = SuggestionView {
            items: vec!["Terry stop".to_string(), "Terry frisk".to_string()],
            selected: Some(1),
            open: true,
        };
        let phases = PhaseState::default();
        let lines = render_frame(&Frame {
            query: &query,
            jurisdiction_label: "Federal Courts",
            suggestions: &suggestions,
            examples: &["Case law on plain view doctrine"],
            phases: &phases,
        });
        assert_eq!(lines[1], "> ter");
        assert_eq!(lines[2], "    Terry stop");
        assert_eq!(lines[3], "  ▸ Terry frisk");
        assert!(!lines.iter().any(|line| line.contains("plain view")));
    }

    #[test]
    fn empty_query_lists_examples() {
        let query = QueryState::default();
        let phases = PhaseState::default();
        let lines = render_frame(&Frame {
            query: &query,
            jurisdiction_label: "Federal Courts",
            suggestions: &SuggestionView::default(),
            examples: &["Case law on plain view doctrine", "Terry stop"],
            phases: &phases,
        });
        assert_eq!(
            lines[1..5].to_vec(),
            vec![
                "> ".to_string(),
                "Try an example (Ctrl-E):".to_string(),
                "    Case law on plain view doctrine".to_string(),
                "    Terry stop".to_string(),
            ]
        );
    }

    #[test]
    fn unlisted_jurisdiction_is_labelled_by_value() {
        let list = vec![
            Jurisdiction::new("all", "All Jurisdictions"),
            Jurisdiction::new("federal", "Federal Courts"),
        ];
        assert_eq!(jurisdiction_label(&list, "federal"), "Federal Courts");
        assert_eq!(jurisdiction_label(&list, "texas"), "texas");
    }
}
