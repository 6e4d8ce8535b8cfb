//! Application state and TUI event loop
//!
//! Owns the lineage session and its projector, and maps key presses onto
//! session operations. Every change re-projects the view into [`Panes`].

use std::collections::HashMap;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use super::panes::{FilterRow, NodeRow, Pane, Panes};
use crate::projection::Projector;
use crate::session::LineageSession;
use crate::visibility::NodeVisibility;

/// Scroll window of a pane list; only rows inside it are built
#[derive(Debug, Default, Clone)]
pub struct VirtualScrollState {
    /// First row in the window
    pub offset: usize,
    /// Rows the pane can show
    pub viewport_height: usize,
}

impl VirtualScrollState {
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
    }

    /// Offset that keeps `selected` in the window, moving as little as possible
    fn offset_for(&self, selected: usize) -> usize {
        if selected < self.offset {
            selected
        } else if selected >= self.offset + self.viewport_height {
            selected + 1 - self.viewport_height
        } else {
            self.offset
        }
    }

    /// Half-open row range to draw for a list of `total` rows.
    ///
    /// A list that shrank below the window is drawn from its tail so the
    /// window stays full.
    pub fn visible_range(&self, selected: usize, total: usize) -> (usize, usize) {
        if total == 0 || self.viewport_height == 0 {
            return (0, 0);
        }
        let end = (self.offset_for(selected) + self.viewport_height).min(total);
        (end.saturating_sub(self.viewport_height), end)
    }

    pub fn ensure_visible(&mut self, selected: usize, total: usize) {
        if total == 0 || self.viewport_height == 0 {
            return;
        }
        self.offset = self.offset_for(selected.min(total - 1));
    }
}

/// Selection and scroll position of one pane
#[derive(Debug, Default, Clone)]
struct PaneCursor {
    selected: usize,
    scroll: VirtualScrollState,
    list_state: ListState,
}

/// Application state
pub struct App {
    session: LineageSession,
    projector: Projector,
    /// Rows of every pane as of the last projection
    pub panes: Panes,
    /// Pane receiving navigation and toggle keys
    pub focus: Pane,
    cursors: HashMap<Pane, PaneCursor>,
    /// Indices into `panes.nodes` matching the search query
    pub filtered: Vec<usize>,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Whether search mode is active
    pub search_active: bool,
    /// Current search query over node names
    pub search_query: String,
    /// Input name shown in the header
    pub source: String,
}

impl App {
    /// Create a new application over a session
    pub fn new(session: LineageSession, source: impl Into<String>) -> Self {
        let projector = Projector::new(&session);
        let mut app = Self {
            session,
            projector,
            panes: Panes::default(),
            focus: Pane::Nodes,
            cursors: Pane::ALL.iter().map(|p| (*p, PaneCursor::default())).collect(),
            filtered: Vec::new(),
            should_quit: false,
            search_active: false,
            search_query: String::new(),
            source: source.into(),
        };
        app.refresh();
        app
    }

    pub fn session(&self) -> &LineageSession {
        &self.session
    }

    /// Re-project the session and rebuild every pane
    pub fn refresh(&mut self) {
        let relayout = self.projector.project(&mut self.session, &mut self.panes);
        self.panes.sync_controls(&self.session);
        self.update_filter();

        if relayout {
            debug!(unplaced = self.panes.unplaced, "view has unplaced nodes");
        }

        for pane in Pane::ALL {
            let total = self.list_len(pane);
            if let Some(cursor) = self.cursors.get_mut(&pane) {
                if total == 0 {
                    cursor.selected = 0;
                } else if cursor.selected >= total {
                    cursor.selected = total - 1;
                }
                cursor.list_state.select(Some(cursor.selected));
            }
        }
    }

    /// Currently selected row of a pane
    pub fn selected(&self, pane: Pane) -> usize {
        self.cursors.get(&pane).map(|c| c.selected).unwrap_or(0)
    }

    /// Number of rows a pane currently displays
    fn list_len(&self, pane: Pane) -> usize {
        if pane == Pane::Nodes && !self.search_query.is_empty() {
            self.filtered.len()
        } else {
            self.panes.len(pane)
        }
    }

    fn move_selection(&mut self, to: impl FnOnce(usize, usize, usize) -> usize) {
        let total = self.list_len(self.focus);
        if total == 0 {
            return;
        }
        if let Some(cursor) = self.cursors.get_mut(&self.focus) {
            let page = cursor.scroll.viewport_height.max(1);
            cursor.selected = to(cursor.selected, total, page).min(total - 1);
            cursor.list_state.select(Some(cursor.selected));
            cursor.scroll.ensure_visible(cursor.selected, total);
        }
    }

    /// Move selection to the next item
    pub fn select_next(&mut self) {
        self.move_selection(|i, _, _| i + 1);
    }

    /// Move selection to the previous item
    pub fn select_previous(&mut self) {
        self.move_selection(|i, _, _| i.saturating_sub(1));
    }

    /// Move selection down by a page
    pub fn page_down(&mut self) {
        self.move_selection(|i, _, page| i + page);
    }

    /// Move selection up by a page
    pub fn page_up(&mut self) {
        self.move_selection(|i, _, page| i.saturating_sub(page));
    }

    /// Jump to the first item
    pub fn select_first(&mut self) {
        self.move_selection(|_, _, _| 0);
    }

    /// Jump to the last item
    pub fn select_last(&mut self) {
        self.move_selection(|_, total, _| total - 1);
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Id of the node under the cursor in the nodes pane
    pub fn selected_node(&self) -> Option<&str> {
        let index = self.selected(Pane::Nodes);
        let index = if self.search_query.is_empty() {
            index
        } else {
            *self.filtered.get(index)?
        };
        self.panes.nodes.get(index).map(|n| n.id.as_str())
    }

    /// Toggle whatever is under the cursor in the focused pane
    pub fn toggle_selected(&mut self) {
        let index = self.selected(self.focus);
        let changed = match self.focus {
            Pane::Nodes => match self.selected_node().map(str::to_string) {
                Some(id) => self.session.toggle_node_individual(&id).is_some(),
                None => false,
            },
            Pane::Types => match self.panes.types.get(index) {
                Some(count) => {
                    let node_type = count.node_type.clone();
                    self.session.toggle_node_type(&node_type);
                    true
                }
                None => false,
            },
            Pane::Relationships => match self.panes.relationships.get(index) {
                Some(row) => {
                    let label = row.label.clone();
                    self.session.toggle_relationship_type(&label);
                    true
                }
                None => false,
            },
            Pane::Filters => match self.panes.filters.get(index).cloned() {
                Some(FilterRow::Column { column, .. }) => self.session.select_all(&column, false),
                Some(FilterRow::Value {
                    column,
                    value,
                    selected,
                }) => self.session.set_filter_value(&column, &value, !selected),
                None => false,
            },
            Pane::Edges => false,
        };

        if changed {
            self.refresh();
        }
    }

    /// Toggle the type of the selected node, from the nodes pane
    pub fn toggle_selected_type(&mut self) {
        let node_type = self
            .selected_node()
            .and_then(|id| self.session.store().node(id))
            .map(|n| n.node_type.clone());

        if let Some(node_type) = node_type {
            self.session.toggle_node_type(&node_type);
            self.refresh();
        }
    }

    /// Select every option of the column under the cursor, from the filters pane
    pub fn select_all_in_column(&mut self) {
        let column = self
            .panes
            .filters
            .get(self.selected(Pane::Filters))
            .map(|row| row.column().to_string());

        if let Some(column) = column {
            if self.session.select_all(&column, true) {
                self.refresh();
            }
        }
    }

    /// Clear every hide-set and filter
    pub fn reset(&mut self) {
        self.session.reset_all();
        self.refresh();
    }

    /// Signal that the application should quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Start search mode
    pub fn start_search(&mut self) {
        self.search_active = true;
        self.focus = Pane::Nodes;
        self.search_query.clear();
        self.update_filter();
    }

    /// Clear search and return to normal mode
    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.filtered.clear();
        self.reset_cursor(Pane::Nodes);
    }

    /// Add a character to the search query
    pub fn search_push(&mut self, c: char) {
        self.search_query.push(c);
        self.update_filter();
        self.reset_cursor(Pane::Nodes);
    }

    /// Remove the last character from the search query
    pub fn search_pop(&mut self) {
        self.search_query.pop();
        self.update_filter();
        self.reset_cursor(Pane::Nodes);
    }

    fn reset_cursor(&mut self, pane: Pane) {
        if let Some(cursor) = self.cursors.get_mut(&pane) {
            cursor.selected = 0;
            cursor.scroll.offset = 0;
            cursor.list_state.select(Some(0));
        }
    }

    /// Update the filtered node list based on the current search query
    fn update_filter(&mut self) {
        self.filtered = if self.search_query.is_empty() {
            Vec::new()
        } else {
            self.panes
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, node)| node_matches(node, &self.search_query))
                .map(|(i, _)| i)
                .collect()
        };
    }
}

/// Character positions of `text` matched by `query` as an in-order,
/// case-insensitive subsequence. `None` when the query does not match.
fn match_positions(text: &str, query: &str) -> Option<Vec<usize>> {
    let query = query.to_lowercase();
    let mut wanted = query.chars().peekable();
    let mut positions = Vec::new();

    for (i, c) in text.chars().enumerate() {
        match wanted.peek() {
            Some(&q) if c.to_lowercase().next().unwrap_or(c) == q => {
                wanted.next();
                positions.push(i);
            }
            Some(_) => {}
            None => break,
        }
    }

    wanted.peek().is_none().then_some(positions)
}

/// Search hits a node through its name or its type
fn node_matches(node: &NodeRow, query: &str) -> bool {
    match_positions(&node.id, query).is_some() || match_positions(&node.node_type, query).is_some()
}

/// Terminal colors standing in for the ten relationship style classes
const RELATIONSHIP_COLORS: [Color; 10] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::LightRed,
    Color::LightCyan,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightMagenta,
];

fn relationship_color(slot: Option<usize>) -> Color {
    slot.map(|s| RELATIONSHIP_COLORS[s % RELATIONSHIP_COLORS.len()])
        .unwrap_or(Color::Gray)
}

/// Color for a node row
///
/// - Visible and in view: Green
/// - Visible but filtered out: DarkGray
/// - Hidden by type: Yellow
/// - Hidden individually: Red
/// - Hidden both ways: Magenta
fn node_color(state: NodeVisibility, in_view: bool) -> Color {
    match state {
        NodeVisibility::Visible if in_view => Color::Green,
        NodeVisibility::Visible => Color::DarkGray,
        NodeVisibility::HiddenByType => Color::Yellow,
        NodeVisibility::HiddenIndividual => Color::Red,
        NodeVisibility::HiddenBoth => Color::Magenta,
    }
}

/// Run the TUI application
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if app.search_active {
                    match key.code {
                        KeyCode::Esc => app.clear_search(),
                        KeyCode::Enter => {
                            // Exit search mode but keep the filter active
                            app.search_active = false;
                        }
                        KeyCode::Backspace => app.search_pop(),
                        KeyCode::Char(c) => app.search_push(c),
                        KeyCode::Down => app.select_next(),
                        KeyCode::Up => app.select_previous(),
                        _ => {}
                    }
                } else {
                    match key.code {
                        KeyCode::Char('q') => app.quit(),
                        KeyCode::Esc => {
                            if !app.search_query.is_empty() {
                                app.clear_search();
                            } else {
                                app.quit();
                            }
                        }
                        KeyCode::Char('/') => app.start_search(),
                        KeyCode::Tab => app.focus_next(),
                        KeyCode::BackTab => app.focus_previous(),
                        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
                        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
                        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
                        KeyCode::Char('t') => app.toggle_selected_type(),
                        KeyCode::Char('a') => app.select_all_in_column(),
                        KeyCode::Char('r') => app.reset(),
                        KeyCode::PageDown | KeyCode::Char('d') => app.page_down(),
                        KeyCode::PageUp | KeyCode::Char('u') => app.page_up(),
                        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
                        KeyCode::End | KeyCode::Char('G') => app.select_last(),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Render the application UI
fn render(frame: &mut Frame, app: &mut App) {
    let show_search = app.search_active || !app.search_query.is_empty();

    let mut constraints = vec![Constraint::Length(3)];
    if show_search {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut next = 0;
    let mut take = || {
        let area = chunks[next];
        next += 1;
        area
    };

    render_header(frame, app, take());
    if show_search {
        render_search_bar(frame, app, take());
    }
    let body = take();
    let details = take();
    let footer = take();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(body);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[0]);
    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(left[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[1]);

    render_pane(frame, app, Pane::Nodes, left[0]);
    render_pane(frame, app, Pane::Types, controls[0]);
    render_pane(frame, app, Pane::Relationships, controls[1]);
    render_pane(frame, app, Pane::Filters, right[0]);
    render_pane(frame, app, Pane::Edges, right[1]);
    render_details(frame, app, details);
    render_footer(frame, app, footer);
}

/// Render the header with the view status
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = &app.panes.status;
    let mut spans = vec![
        Span::styled(
            "LineageScope ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{}  ", app.source), Style::default().fg(Color::Gray)),
        Span::raw(format!(
            "Nodes {}/{} visible  Edges {} direct, {} indirect",
            status.visible_nodes, status.total_nodes, status.direct_edges, status.indirect_edges
        )),
    ];
    if status.skipped_rows > 0 {
        spans.push(Span::styled(
            format!("  {} rows skipped", status.skipped_rows),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the search bar
fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (border_color, title) = if app.search_active {
        (Color::Yellow, "Search (Enter to confirm, Esc to cancel)")
    } else {
        (Color::Gray, "Filter (/ to edit, Esc to clear)")
    };

    let search_display = format!("/{}", app.search_query);
    let cursor = if app.search_active { "_" } else { "" };
    let result_count = if !app.search_query.is_empty() {
        format!(" ({} matches)", app.filtered.len())
    } else {
        String::new()
    };

    let content = Line::from(vec![
        Span::styled(search_display, Style::default().fg(Color::White)),
        Span::styled(
            cursor,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
        ),
        Span::styled(result_count, Style::default().fg(Color::DarkGray)),
    ]);

    let search_bar = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(search_bar, area);
}

/// Build the list item for one row of a pane
fn pane_item(app: &App, pane: Pane, index: usize) -> ListItem<'static> {
    let panes = &app.panes;
    let line = match pane {
        Pane::Nodes => {
            let node = &panes.nodes[index];
            let color = node_color(node.state, node.in_view);
            let mut spans = vec![Span::styled(
                format!("{} ", node.state.indicator()),
                Style::default().fg(color),
            )];
            spans.extend(highlight_matches(&node.id, &app.search_query, color));
            let dim = Style::default().fg(Color::DarkGray);
            spans.push(Span::styled(" (", dim));
            spans.extend(highlight_matches(&node.node_type, &app.search_query, Color::DarkGray));
            spans.push(Span::styled(")", dim));
            Line::from(spans)
        }
        Pane::Types => {
            let count = &panes.types[index];
            let color = if count.hidden { Color::Yellow } else { Color::White };
            Line::from(Span::styled(count.label(), Style::default().fg(color)))
        }
        Pane::Relationships => {
            let row = &panes.relationships[index];
            let marker = if row.hidden { "[x] " } else { "[ ] " };
            let style = if row.hidden {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(relationship_color(row.slot))
            };
            Line::from(vec![Span::raw(marker), Span::styled(row.label.clone(), style)])
        }
        Pane::Filters => match &panes.filters[index] {
            FilterRow::Column { column, summary } => Line::from(vec![
                Span::styled(
                    column.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(": {}", summary), Style::default().fg(Color::Gray)),
            ]),
            FilterRow::Value {
                value, selected, ..
            } => {
                let marker = if *selected { "  [*] " } else { "  [ ] " };
                Line::from(vec![Span::raw(marker), Span::raw(value.clone())])
            }
        },
        Pane::Edges => {
            let row = &panes.edges[index];
            let edge = &row.edge;
            let slot = app.projector.palette().slot(&edge.relationship);
            let rel_style = Style::default().fg(relationship_color(slot));
            let mut spans = vec![
                Span::raw(edge.source.clone()),
                Span::styled(format!(" -[{}]-> ", edge.relationship), rel_style),
                Span::raw(edge.target.clone()),
            ];
            if let (Some(via), Some(via_rel)) = (edge.via(), edge.via_relationship()) {
                spans.push(Span::styled(
                    format!("  via {} ({})", via, via_rel),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ));
            }
            if row.offset != 0.0 {
                spans.push(Span::styled(
                    format!("  {:+}", row.offset),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
    };
    ListItem::new(line)
}

/// Render one pane with virtual scrolling
///
/// Only builds list items for the rows inside the viewport.
fn render_pane(frame: &mut Frame, app: &mut App, pane: Pane, area: Rect) {
    let total = app.list_len(pane);
    let viewport_height = (area.height as usize).saturating_sub(2);

    let (start_idx, end_idx) = match app.cursors.get_mut(&pane) {
        Some(cursor) => {
            cursor.scroll.set_viewport_height(viewport_height);
            cursor.scroll.ensure_visible(cursor.selected, total);
            cursor.scroll.visible_range(cursor.selected, total)
        }
        None => (0, 0),
    };

    let items: Vec<ListItem> = (start_idx..end_idx)
        .map(|i| {
            let row = if pane == Pane::Nodes && !app.search_query.is_empty() {
                app.filtered[i]
            } else {
                i
            };
            pane_item(app, pane, row)
        })
        .collect();

    let title = if total > viewport_height && total > 0 {
        format!("{} ({}-{} of {})", pane.title(), start_idx + 1, end_idx, total)
    } else {
        format!("{} ({})", pane.title(), total)
    };

    let focused = app.focus == pane;
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(if focused { "► " } else { "  " });

    if let Some(cursor) = app.cursors.get_mut(&pane) {
        let relative = cursor.selected.saturating_sub(start_idx);
        cursor.list_state.select(if total == 0 { None } else { Some(relative) });
        frame.render_stateful_widget(list, area, &mut cursor.list_state);
    }
}

/// Render the detail line for the selected node
fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.selected_node() {
        Some(id) => match app.panes.neighbour_summary(id) {
            Some(summary) => format!("{}: {}", id, summary),
            None => format!("{}: not in the current view", id),
        },
        None => String::new(),
    };

    let details = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .title(format!("Hidden: {}", app.panes.status.hidden_list()))
                .borders(Borders::ALL),
        );
    frame.render_widget(details, area);
}

/// Split `text` into spans, emphasising the characters the search matched
fn highlight_matches(text: &str, query: &str, base_color: Color) -> Vec<Span<'static>> {
    let base = Style::default().fg(base_color);
    let matched = match_positions(text, query).unwrap_or_default();
    if matched.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let emphasis = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let style = |in_match: bool| if in_match { emphasis } else { base };

    let mut spans = Vec::new();
    let mut segment = String::new();
    let mut in_match = false;
    for (i, c) in text.chars().enumerate() {
        let is_match = matched.binary_search(&i).is_ok();
        if is_match != in_match && !segment.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut segment), style(in_match)));
        }
        segment.push(c);
        in_match = is_match;
    }
    if !segment.is_empty() {
        spans.push(Span::styled(segment, style(in_match)));
    }

    spans
}

/// Render the footer with help text and legend
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let help_text = if app.search_active {
        Line::from(vec![
            key("Type"),
            Span::raw(" to search  "),
            key("↑/↓"),
            Span::raw(" Navigate  "),
            key("Enter"),
            Span::raw(" Confirm  "),
            key("Esc"),
            Span::raw(" Cancel"),
        ])
    } else {
        Line::from(vec![
            key("Tab"),
            Span::raw(" Pane  "),
            key("j/k"),
            Span::raw(" Nav  "),
            key("Space"),
            Span::raw(" Toggle  "),
            key("t"),
            Span::raw(" Type  "),
            key("a"),
            Span::raw(" All  "),
            key("r"),
            Span::raw(" Reset  "),
            key("/"),
            Span::raw(" Search  "),
            key("q"),
            Span::raw(" Quit  │  "),
            Span::styled("[t]", Style::default().fg(Color::Yellow)),
            Span::raw(" Type  "),
            Span::styled("[x]", Style::default().fg(Color::Red)),
            Span::raw(" Node  "),
            Span::styled("[X]", Style::default().fg(Color::Magenta)),
            Span::raw(" Both"),
        ])
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
