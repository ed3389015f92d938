//! Renderer - pure functions from `RenderState` to ratatui widgets

use ratatui::{prelude::*, widgets::*};

use crate::app::friends::partition;
use crate::constants::APP_NAME;
use crate::messages::render::IndicatorFrame;
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::{Friend, Language, Repository, View};

const ACTIVE_MARKER: &str = "●";
const INACTIVE_MARKER: &str = "○";

/// Draw the whole screen
pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    match state.active_view {
        View::Repos => draw_repos_view(f, state, main_chunks[1]),
        View::Friends => draw_friends_view(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// The pulsating "Loading" bar
pub fn loading_gauge(frame: &IndicatorFrame) -> Gauge<'_> {
    Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio((frame.progress / 100.0).clamp(0.0, 1.0))
        .label(Span::styled(frame.text.as_str(), Style::default().fg(Color::White).bold()))
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let tab = |view: View, key: u8, color: Color| {
        let label = format!(" {}:{} ", key, view.title());
        if state.active_view == view {
            Span::styled(label, Style::default().fg(Color::Black).bg(color).bold())
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    };

    let tabs = vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Yellow).bold()),
        tab(View::Repos, 1, Color::Cyan),
        Span::raw(" "),
        tab(View::Friends, 2, Color::Magenta),
    ];
    f.render_widget(Paragraph::new(Line::from(tabs)), area);
}

// ============================================================================
// Repos view
// ============================================================================

fn draw_repos_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Language nav
            Constraint::Length(2), // Heading
            Constraint::Min(3),    // Results
        ])
        .split(area);

    let titles: Vec<&str> = Language::ALL.iter().map(|lang| lang.as_str()).collect();
    let selected = Language::ALL
        .iter()
        .position(|lang| *lang == state.language)
        .unwrap_or(0);
    f.render_widget(render_tabs(&titles, selected), chunks[0]);

    let heading = Paragraph::new(state.language.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().bold());
    f.render_widget(heading, chunks[1]);

    if state.repos_loading || state.repos.is_empty() {
        draw_loading(f, &state.repos_indicator, chunks[2]);
    } else {
        draw_repo_list(f, &state.repos, chunks[2]);
    }
}

fn repo_item(repo: &Repository) -> ListItem<'_> {
    ListItem::new(Text::from(vec![
        Line::from(vec![
            Span::styled(repo.name.as_str(), Style::default().fg(Color::Cyan).bold().underlined()),
            Span::styled(format!("  {}", repo.html_url), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(format!("  {}", repo.owner.login)),
        Line::from(Span::styled(
            format!("  {} stars", repo.stargazers_count),
            Style::default().fg(Color::Yellow),
        )),
    ]))
}

fn draw_repo_list(f: &mut Frame, repos: &[Repository], area: Rect) {
    let items: Vec<ListItem> = repos.iter().map(repo_item).collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} repositories ", repos.len())),
    );
    f.render_widget(list, area);
}

fn draw_loading(f: &mut Frame, frame: &IndicatorFrame, area: Rect) {
    let gauge_area = Rect { height: area.height.min(3), ..area };
    f.render_widget(loading_gauge(frame), gauge_area);
}

// ============================================================================
// Friends view
// ============================================================================

fn draw_friends_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name input
            Constraint::Min(3),    // Lists
        ])
        .split(area);

    draw_friend_input(f, state, chunks[0]);

    if state.friends_loading || state.friends.is_empty() {
        draw_loading(f, &state.friends_indicator, chunks[1]);
    } else {
        draw_friend_lists(f, state, chunks[1]);
    }
}

fn draw_friend_input(f: &mut Frame, state: &RenderState, area: Rect) {
    let editing = state.input_mode == InputMode::Editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        })
        .title(" New friend (a:edit Enter:add Esc:cancel) ");

    let input = Paragraph::new(state.friend_input.as_str()).block(block);
    f.render_widget(input, area);

    if editing {
        f.set_cursor_position(Position::new(
            input_cursor_x(area, &state.friend_input),
            area.y.saturating_add(1),
        ));
    }
}

/// Cursor column after the typed text, kept inside the input border
fn input_cursor_x(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(typed).saturating_add(1).min(max_x)
}

fn friend_item(index: usize, friend: &Friend, selected: Option<usize>) -> ListItem<'_> {
    let marker = if friend.active { ACTIVE_MARKER } else { INACTIVE_MARKER };
    let mut style = Style::default();
    if friend.deleted && !friend.active {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
    }
    if selected == Some(index) {
        style = style.fg(Color::Yellow).bold();
    }
    ListItem::new(format!("{} {}", marker, friend.name)).style(style)
}

fn draw_friend_lists(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (active, inactive) = partition(&state.friends);
    let selected = state.selected_friend;

    f.render_widget(friend_sublist(" Active Friends ", active, selected, Color::Green), chunks[0]);
    f.render_widget(friend_sublist(" Inactive Friends ", inactive, selected, Color::DarkGray), chunks[1]);
}

fn friend_sublist<'a>(
    title: &'a str,
    entries: Vec<(usize, &'a Friend)>,
    selected: Option<usize>,
    color: Color,
) -> List<'a> {
    let items: Vec<ListItem> = entries
        .into_iter()
        .map(|(i, friend)| friend_item(i, friend, selected))
        .collect();
    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    )
}

// ============================================================================
// Chrome
// ============================================================================

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = match (state.active_view, state.input_mode) {
        (View::Friends, InputMode::Editing) => " Enter:add | Esc:stop editing ",
        (View::Friends, InputMode::Normal) => {
            " ↑/↓:select | Enter:toggle | d:remove | a:add | r:reset | Tab:view | ?:help | q:quit "
        }
        (View::Repos, _) => " a/j/r/p:language | ←/→:cycle | Tab:view | ?:help | q:quit ",
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 STARBOARD - Keyboard Shortcuts

 VIEWS
   1 / 2 / Tab        Popular repos / Friends / next view

 POPULAR REPOS
   a j r p            all / javascript / ruby / python
   ← / →              Previous / next language

 FRIENDS
   ↑ / ↓              Select friend
   Enter / Space      Toggle active
   d                  Remove (mark deleted)
   a                  Type a new friend, Enter to add
   r                  Reset from server

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Owner;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn render(state: &RenderState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn row_of(lines: &[String], needle: &str) -> Option<usize> {
        lines.iter().position(|line| line.contains(needle))
    }

    #[test]
    fn test_repos_loading_shows_indicator() {
        let state = RenderState {
            repos_indicator: IndicatorFrame { text: "Loading..".into(), progress: 40.0 },
            ..RenderState::default()
        };
        let lines = lines(&render(&state));
        assert!(row_of(&lines, "Loading..").is_some());
    }

    #[test]
    fn test_empty_result_still_shows_indicator() {
        let state = RenderState { repos_loading: false, ..RenderState::default() };
        let lines = lines(&render(&state));
        assert!(row_of(&lines, "Loading").is_some());
    }

    #[test]
    fn test_repos_listed_when_loaded() {
        let state = RenderState {
            repos_loading: false,
            repos: vec![Repository {
                id: 1,
                name: "react".into(),
                html_url: "https://github.com/facebook/react".into(),
                owner: Owner { login: "facebook".into() },
                stargazers_count: 220000,
            }],
            ..RenderState::default()
        };
        let lines = lines(&render(&state));
        assert!(row_of(&lines, "react").is_some());
        assert!(row_of(&lines, "facebook").is_some());
        assert!(row_of(&lines, "220000 stars").is_some());
        assert!(row_of(&lines, "Loading").is_none());
    }

    #[test]
    fn test_friends_partitioned_with_deleted_marker() {
        let state = RenderState {
            active_view: View::Friends,
            friends_loading: false,
            friends: vec![
                Friend { name: "Al".into(), active: true, deleted: false },
                Friend { name: "Bo".into(), active: false, deleted: true },
            ],
            ..RenderState::default()
        };
        let buffer = render(&state);
        let lines = lines(&buffer);

        let active_title = row_of(&lines, "Active Friends").unwrap();
        let inactive_title = row_of(&lines, "Inactive Friends").unwrap();
        let al = row_of(&lines, "● Al").unwrap();
        let bo = row_of(&lines, "○ Bo").unwrap();
        assert!(active_title < al && al < inactive_title);
        assert!(bo > inactive_title);

        let x = lines[bo].chars().position(|c| c == 'B').unwrap() as u16;
        assert!(buffer[(x, bo as u16)].modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_input_cursor_stays_inside_border() {
        let area = Rect::new(0, 2, 20, 3);
        assert_eq!(input_cursor_x(area, ""), 1);
        assert_eq!(input_cursor_x(area, "Al"), 3);
        assert_eq!(input_cursor_x(area, &"x".repeat(70_000)), 18);

        let edge = Rect::new(u16::MAX - 10, 0, 10, 3);
        assert_eq!(input_cursor_x(edge, &"x".repeat(70_000)), u16::MAX - 2);
    }

    #[test]
    fn test_long_input_renders_while_editing() {
        let state = RenderState {
            active_view: View::Friends,
            input_mode: InputMode::Editing,
            friend_input: "y".repeat(70_000),
            ..RenderState::default()
        };
        let lines = lines(&render(&state));
        assert!(row_of(&lines, "New friend").is_some());
    }
}
