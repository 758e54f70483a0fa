use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{GLYPH_HUD_SEPARATOR, Palette};
use crate::game::{GamePhase, Snapshot};

/// Renders the status row and the score row, returning the area above them.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    palette: &Palette,
) -> Rect {
    let [play_area, status_area, score_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(status_line(snapshot.phase, palette)).alignment(Alignment::Left),
        status_area,
    );

    frame.render_widget(
        Paragraph::new(score_line(
            snapshot.snake.len(),
            snapshot.score,
            snapshot.high_score,
            usize::from(score_area.width),
            palette,
        ))
        .alignment(Alignment::Right),
        score_area,
    );

    play_area
}

/// Status text shown for each phase.
#[must_use]
pub fn status_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Idle => "READY",
        GamePhase::Running => "RUNNING",
        GamePhase::Over => "GAME OVER",
    }
}

fn status_line(phase: GamePhase, palette: &Palette) -> Line<'static> {
    let color = match phase {
        GamePhase::Idle => palette.status_idle,
        GamePhase::Running => palette.status_running,
        GamePhase::Over => palette.status_over,
    };

    Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(
            status_label(phase),
            Style::default()
                .fg(palette.hud_value)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn score_line(
    length: usize,
    score: u32,
    high_score: u32,
    available_width: usize,
    palette: &Palette,
) -> Line<'static> {
    let labels = if score_line_width(length, score, high_score, &FULL_LABELS) > available_width {
        &COMPACT_LABELS
    } else {
        &FULL_LABELS
    };
    let sep = format!(" {GLYPH_HUD_SEPARATOR} ");
    let label_style = Style::default().fg(palette.hud_label);
    let value_style = Style::default().fg(palette.hud_value);

    Line::from(vec![
        Span::styled(format!("{}: ", labels.length), label_style),
        Span::styled(length.to_string(), value_style),
        Span::raw(sep.clone()),
        Span::styled(format!("{}: ", labels.score), label_style),
        Span::styled(score.to_string(), value_style.add_modifier(Modifier::BOLD)),
        Span::raw(sep),
        Span::styled(format!("{}: ", labels.high_score), label_style),
        Span::styled(high_score.to_string(), value_style),
    ])
}

struct ScoreLabels {
    length: &'static str,
    score: &'static str,
    high_score: &'static str,
}

const FULL_LABELS: ScoreLabels = ScoreLabels {
    length: "Length",
    score: "Score",
    high_score: "High score",
};

const COMPACT_LABELS: ScoreLabels = ScoreLabels {
    length: "L",
    score: "S",
    high_score: "H",
};

fn score_line_width(length: usize, score: u32, high_score: u32, labels: &ScoreLabels) -> usize {
    let sep_width = format!(" {GLYPH_HUD_SEPARATOR} ").width();

    format!("{}: {length}", labels.length).width()
        + sep_width
        + format!("{}: {score}", labels.score).width()
        + sep_width
        + format!("{}: {high_score}", labels.high_score).width()
}

#[cfg(test)]
mod tests {
    use crate::game::GamePhase;

    use super::{COMPACT_LABELS, FULL_LABELS, score_line_width, status_label};

    #[test]
    fn status_labels_follow_phase() {
        assert_eq!(status_label(GamePhase::Idle), "READY");
        assert_eq!(status_label(GamePhase::Running), "RUNNING");
        assert_eq!(status_label(GamePhase::Over), "GAME OVER");
    }

    #[test]
    fn score_line_width_counts_display_columns() {
        // "Length: 3 │ Score: 20 │ High score: 40"
        assert_eq!(score_line_width(3, 20, 40, &FULL_LABELS), 38);
        // "L: 3 │ S: 20 │ H: 40"
        assert_eq!(score_line_width(3, 20, 40, &COMPACT_LABELS), 20);
    }
}
