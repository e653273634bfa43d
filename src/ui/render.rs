use crate::animation::TokenFrame;
use crate::orchestrator::{SearchPhase, Status};
use crate::ui::app::{App, InputMode, Prompt};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::cmp::Ordering;

/// Terminal rows used by one line of tokens: lift row, chip row, index row.
const TOKEN_LINE_HEIGHT: u16 = 3;

/// Blank columns between neighbouring tokens.
const TOKEN_GAP: u16 = 1;

pub fn render(frame: &mut Frame, app: &App) {
    // Main layout: Header + Tokens + Steps/Status + Target + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(5),     // Token row
            Constraint::Length(10), // Steps + status
            Constraint::Length(3),  // Target field
            Constraint::Length(1),  // Footer
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);
    render_tokens(frame, app, main_chunks[1]);

    let bottom_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[2]);

    render_steps(frame, app, bottom_chunks[0]);
    render_status(frame, app, bottom_chunks[1]);
    render_target(frame, app, main_chunks[3]);
    render_footer(frame, app, main_chunks[4]);

    if let InputMode::Prompt(prompt) = app.mode {
        render_prompt(frame, app, prompt);
    }

    if app.show_help {
        render_help(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(vec![Span::styled(
        "  Binary Search Visualization  ",
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    )]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent)),
    )
    .style(Style::default().bg(app.theme.bg));

    frame.render_widget(header, area);
}

/// Tokens per line and the width of each token cell for `area_width`.
pub fn token_grid(label_width: usize, token_count: usize, area_width: u16) -> (u16, usize) {
    let index_width = token_count.saturating_sub(1).to_string().len();
    let cell_width = (label_width.max(index_width) + 2) as u16;
    let stride = cell_width + TOKEN_GAP;
    let per_line = ((area_width + TOKEN_GAP) / stride).max(1) as usize;
    (cell_width, per_line)
}

fn render_tokens(frame: &mut Frame, app: &App, area: Rect) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Array ({}) ", app.tokens.len()))
        .border_style(Style::default().fg(app.theme.fg_dim))
        .style(Style::default().bg(app.theme.bg));
    let inner = block.inner(area);

    if app.tokens.is_empty() {
        frame.render_widget(block, area);
        let hint = if app.orchestrator.dataset().is_unset() {
            "No data. Press [i] to input values or [g] to generate random data."
        } else {
            "The array is empty."
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(app.theme.fg_dim))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
        return;
    }

    let (cell_width, per_line) =
        token_grid(app.tokens.label_width(), app.tokens.len(), inner.width);
    let visible_lines = (inner.height / TOKEN_LINE_HEIGHT) as usize;

    // Scroll so the highlighted token stays on screen.
    let first_line = app
        .highlight
        .map(|(index, _)| (index / per_line).saturating_sub(visible_lines.saturating_sub(1)))
        .unwrap_or(0);

    let shown_start = (first_line * per_line).min(app.tokens.len());
    let shown_end = ((first_line + visible_lines) * per_line).min(app.tokens.len());
    let hidden = app.tokens.len() - (shown_end - shown_start);
    if hidden > 0 {
        block = block.title_bottom(Line::from(format!(" +{hidden} more ")).right_aligned());
    }
    frame.render_widget(block, area);

    let buffer = frame.buffer_mut();
    for token in app.tokens.iter() {
        if token.index < shown_start || token.index >= shown_end {
            continue;
        }
        let line = token.index / per_line;
        let column = (token.index % per_line) as u16;
        let x = inner.x + column * (cell_width + TOKEN_GAP);
        let y = inner.y + (line - first_line) as u16 * TOKEN_LINE_HEIGHT;
        if x + cell_width > inner.right() || y + TOKEN_LINE_HEIGHT > inner.bottom() {
            continue;
        }

        let token_frame = match app.highlight {
            Some((index, token_frame)) if index == token.index => Some(token_frame),
            _ => None,
        };
        draw_token(
            buffer,
            app,
            (x, y, cell_width),
            &token.label,
            token.index,
            token_frame,
        );
    }
}

fn draw_token(
    buffer: &mut Buffer,
    app: &App,
    (x, y, width): (u16, u16, u16),
    label: &str,
    index: usize,
    token_frame: Option<TokenFrame>,
) {
    let theme = &app.theme;
    let token_frame = token_frame.unwrap_or_default();

    let fill = blend(theme.token, theme.highlight, token_frame.fill);
    let chip_bg = blend(theme.bg, fill, token_frame.opacity);
    let chip_fg = blend(theme.bg, Color::Rgb(0, 0, 0), token_frame.opacity);
    let chip_style = Style::default()
        .fg(chip_fg)
        .bg(chip_bg)
        .add_modifier(Modifier::BOLD);

    let lifted = token_frame.offset >= 0.5;
    let chip_y = if lifted { y } else { y + 1 };
    let width = width as usize;

    buffer.set_string(x, chip_y, format!("{label:^width$}"), chip_style);
    buffer.set_string(
        x,
        y + 2,
        format!("{index:^width$}"),
        Style::default().fg(theme.fg_dim).bg(theme.bg),
    );
}

/// Linear blend between two RGB colors; `t` is clamped to `0.0..=1.0`.
/// Non-RGB colors snap to whichever end `t` is closer to.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| -> u8 {
                (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
            };
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

fn render_steps(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let items: Vec<ListItem> = match app.orchestrator.last_trace() {
        Some(trace) => trace
            .probes
            .iter()
            .enumerate()
            .map(|(step, probe)| {
                let (relation, next) = match probe.ordering {
                    Ordering::Less => ("<", "search right half"),
                    Ordering::Greater => (">", "search left half"),
                    Ordering::Equal => ("=", "found"),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>2}. ", step + 1),
                        Style::default().fg(theme.fg_dim),
                    ),
                    Span::raw(format!(
                        "left={} mid={} right={}  ",
                        probe.left, probe.mid, probe.right
                    )),
                    Span::styled(
                        format!("a[{}]={} {} {}", probe.mid, probe.value, relation, trace.target),
                        Style::default().fg(theme.secondary),
                    ),
                    Span::styled(format!("  {next}"), Style::default().fg(theme.fg_dim)),
                ]))
            })
            .collect(),
        None => vec![ListItem::new(Span::styled(
            "Run a search to see each probe.",
            Style::default().fg(theme.fg_dim),
        ))],
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Steps ")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .style(Style::default().fg(theme.fg).bg(theme.bg));

    frame.render_widget(list, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let status_style = match &app.status {
        Some(status) if status.is_error() => Style::default().fg(theme.error),
        Some(Status::Found(_)) => Style::default()
            .fg(theme.success)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(theme.fg),
    };
    let status_text = app
        .status
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();

    let dataset = app.orchestrator.dataset();
    let size = if dataset.is_unset() {
        "none".to_string()
    } else {
        dataset.len().to_string()
    };
    let phase = match app.orchestrator.phase() {
        SearchPhase::Idle => "idle",
        SearchPhase::Searching => "searching",
    };

    let text = vec![
        Line::from(Span::styled(status_text, status_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Elements: ", Style::default().fg(theme.fg_dim)),
            Span::raw(size),
        ]),
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(theme.fg_dim)),
            Span::raw(phase),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Result ")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_target(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let editing = app.mode == InputMode::EditingTarget;
    let border_color = if editing { theme.accent } else { theme.fg_dim };

    let content = if app.target_input.is_empty() && !editing {
        Span::styled("Enter target value", Style::default().fg(theme.fg_dim))
    } else {
        Span::styled(app.target_input.clone(), Style::default().fg(theme.fg))
    };

    let paragraph = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Target ")
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(paragraph, area);

    if editing {
        let cursor_x = (area.x + 1).saturating_add(text_width(&app.target_input));
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        InputMode::Normal => {
            "[t] Target  [s/Enter] Search  [i] Input  [g] Random  [r] Reset  [T] Theme  [?] Help  [q] Quit"
        }
        InputMode::EditingTarget => "[Enter] Search  [Esc] Done",
        InputMode::Prompt(_) => "[Enter] OK  [Esc] Cancel",
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(app.theme.fg_dim))
        .block(Block::default());

    frame.render_widget(footer, area);
}

fn render_prompt(frame: &mut Frame, app: &App, prompt: Prompt) {
    let theme = &app.theme;
    let area = centered_rect(60, 6, frame.area());
    frame.render_widget(Clear, area);

    let input_line = Line::from(vec![
        Span::styled(format!("{} ", prompt.label()), Style::default().fg(theme.fg_dim)),
        Span::styled(app.prompt_input.clone(), Style::default().fg(theme.fg)),
    ]);
    let text = vec![
        Line::from(Span::styled(prompt.header(), Style::default().fg(theme.fg))),
        Line::from(""),
        input_line,
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", prompt.title()))
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg)),
    );
    frame.render_widget(paragraph, area);

    let cursor_x = (area.x + 1)
        .saturating_add(text_width(prompt.label()))
        .saturating_add(1)
        .saturating_add(text_width(&app.prompt_input));
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 3));
}

fn render_help(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(50, 14, frame.area());
    frame.render_widget(Clear, area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("{k:>9}  "), Style::default().fg(theme.accent)),
            Span::styled(what, Style::default().fg(theme.fg)),
        ])
    };
    let text = vec![
        key("t", "Edit the target value"),
        key("s, Enter", "Search for the target"),
        key("i", "Input array data"),
        key("g", "Generate random data"),
        key("r", "Reset everything"),
        key("T", "Next color theme"),
        key("?", "Toggle this help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Values are sorted when loaded. With duplicates,",
            Style::default().fg(theme.fg_dim),
        )),
        Line::from(Span::styled(
            "any matching index may be reported.",
            Style::default().fg(theme.fg_dim),
        )),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg)),
    );
    frame.render_widget(paragraph, area);
}

/// Columns taken by `text`, capped at `u16::MAX`.
fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::Orchestrator;
    use crate::ui::theme::Theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Instant;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        screen_text(&terminal)
    }

    fn loaded_app(values: &str) -> App {
        let mut app = App::new(Orchestrator::default(), Theme::default_theme().clone());
        let effects = app.orchestrator.submit_array(values);
        app.apply(effects, Instant::now());
        app
    }

    #[test]
    fn test_blend_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(blend(a, b, 7.0), b);
        assert_eq!(blend(Color::Red, Color::Blue, 0.2), Color::Red);
    }

    #[test]
    fn test_token_grid() {
        // width 2 labels, 4 tokens => cells of 4 columns, stride 5
        assert_eq!(token_grid(2, 4, 20), (4, 4));
        assert_eq!(token_grid(2, 4, 3), (4, 1));
        // indices wider than labels widen the cell
        assert_eq!(token_grid(1, 150, 30).0, 5);
    }

    #[test]
    fn test_empty_screen_shows_hint() {
        let app = App::new(Orchestrator::default(), Theme::default_theme().clone());
        let screen = draw(&app);
        assert!(screen.contains("Binary Search Visualization"));
        assert!(screen.contains("No data."));
        assert!(screen.contains("Run a search to see each probe."));
    }

    #[test]
    fn test_tokens_rendered_in_sorted_order() {
        let app = loaded_app("50,30,80,10");
        let screen = draw(&app);
        let positions: Vec<usize> = ["10", "30", "50", "80"]
            .iter()
            .map(|label| screen.find(label).expect("token drawn"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(screen.contains("Array loaded with 4 elements."));
    }

    #[test]
    fn test_overflowing_tokens_show_more_marker() {
        let values: Vec<String> = (1..=100).map(|v| v.to_string()).collect();
        let app = loaded_app(&values.join(","));
        // 11 inner rows hold 3 token lines of 16 tokens each
        let screen = draw(&app);
        assert!(screen.contains("+52 more"));
        assert!(screen.contains(" 48 "));
        assert!(!screen.contains(" 49 "));
    }

    #[test]
    fn test_fitting_tokens_have_no_marker() {
        let screen = draw(&loaded_app("3,1,2"));
        assert!(!screen.contains("more"));
    }

    #[test]
    fn test_long_target_input_keeps_cursor_in_field() {
        let mut app = loaded_app("1,2");
        app.mode = InputMode::EditingTarget;
        app.target_input = "9".repeat(70_000);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|f| render(f, &app)).expect("draw");
        let cursor = terminal.get_cursor_position().expect("cursor");
        assert_eq!(cursor.x, 98);
    }

    #[test]
    fn test_prompt_popup_rendered() {
        let mut app = loaded_app("1,2");
        app.open_prompt(Prompt::RandomSize);
        app.prompt_input.push_str("12");
        let screen = draw(&app);
        assert!(screen.contains("Generate Random Data"));
        assert!(screen.contains("Size: 12"));
    }
}
