//! Session commands: show, skip and reset the current question.

use anyhow::Result;
use console::style;

use answerdesk_types::session::SessionKey;
use answerdesk_types::view::CurrentView;

use crate::state::AppState;

/// `answerdesk next`
pub async fn next(state: &AppState, session: &SessionKey, json: bool, quiet: bool) -> Result<()> {
    let view = state.answer_service.current(session).await?;
    print_view(session, &view, json, quiet)
}

/// `answerdesk skip`
pub async fn skip(state: &AppState, session: &SessionKey, json: bool, quiet: bool) -> Result<()> {
    let view = state.answer_service.skip(session).await?;
    if !json && !quiet {
        println!("  {} Skipped.", style("→").dim());
    }
    print_view(session, &view, json, quiet)
}

/// `answerdesk reset`
pub async fn reset(state: &AppState, session: &SessionKey, json: bool, quiet: bool) -> Result<()> {
    let view = state.answer_service.reset(session).await?;
    if !json && !quiet {
        println!(
            "  {} Session '{}' reset.",
            style("✓").green(),
            style(session).cyan()
        );
    }
    print_view(session, &view, json, quiet)
}

fn print_view(session: &SessionKey, view: &CurrentView, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!();
    for line in render_view(session, view) {
        println!("  {line}");
    }
    println!();
    Ok(())
}

/// Styled lines describing the view.
fn render_view(session: &SessionKey, view: &CurrentView) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(message) = view.completion_message() {
        lines.push(format!("{} {message}", style("✓").green().bold()));
        if let CurrentView::SessionFinished { .. } = view {
            lines.push(format!(
                "{}",
                style(format!("Run `answerdesk reset --session {session}` to go through the remaining questions again.")).dim()
            ));
        }
        return lines;
    }

    let CurrentView::Question { question, options } = view else {
        return lines;
    };

    lines.push(format!(
        "{} {}",
        style(format!("Question {} of {}", question.index + 1, question.unanswered)).dim(),
        style(format!("[{}]", question.question_id)).dim()
    ));
    lines.push(format!("{}", style(&question.text).bold()));
    lines.push(String::new());

    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();
    lines.push(format!(
        "Company:        {}",
        style(or_dash(question.linked_company.as_deref())).cyan()
    ));
    lines.push(format!(
        "Robot:          {}",
        style(or_dash(question.linked_robot.as_deref())).cyan()
    ));
    let tag = if question.robotic_system.is_empty() {
        match &question.suggested_robotic_system {
            Some(suggested) => format!("- (suggested: {suggested})"),
            None => "-".to_string(),
        }
    } else {
        question.robotic_system.clone()
    };
    lines.push(format!("Robotic System: {}", style(tag).cyan()));
    lines.push(String::new());
    lines.push(format!(
        "{}",
        style(format!(
            "{} companies, {} robots, systems: {}",
            options.companies.len(),
            options.robots.len(),
            options.robotic_systems.join(", ")
        ))
        .dim()
    ));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use answerdesk_types::view::{FormOptions, QuestionView};

    fn plain(lines: Vec<String>) -> String {
        console::strip_ansi_codes(&lines.join("\n")).to_string()
    }

    #[test]
    fn test_render_all_answered() {
        let out = plain(render_view(&SessionKey::default(), &CurrentView::AllAnswered));
        assert!(out.contains("All questions have already been answered."));
    }

    #[test]
    fn test_render_session_finished_suggests_reset() {
        let out = plain(render_view(
            &SessionKey::default(),
            &CurrentView::SessionFinished { handled: 4 },
        ));
        assert!(out.contains("You have handled all questions."));
        assert!(out.contains("reset --session default"));
    }

    #[test]
    fn test_render_question() {
        let view = CurrentView::Question {
            question: QuestionView {
                question_id: "rec1".into(),
                text: "Which port?".to_string(),
                index: 1,
                unanswered: 5,
                linked_company: Some("Acme".to_string()),
                linked_robot: None,
                robotic_system: String::new(),
                suggested_robotic_system: Some("Hugo".to_string()),
            },
            options: FormOptions::default(),
        };
        let out = plain(render_view(&SessionKey::default(), &view));
        assert!(out.contains("Question 2 of 5"));
        assert!(out.contains("Which port?"));
        assert!(out.contains("Company:        Acme"));
        assert!(out.contains("Robot:          -"));
        assert!(out.contains("suggested: Hugo"));
    }
}
