use std::io;

use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::constants::PREVIEW_SIZE;
use crate::game::{Cell, GameSession};

pub const GAME_OVER_TEXT: &str = "Game Over! Press R to Restart";

/// Where a cell is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Board,
    Preview,
}

/// Where a line of text is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSlot {
    Score,
    Lines,
    Overlay,
}

/// Drawing capability the game reports its contents to. Visual styling is
/// left entirely to the implementation.
pub trait Renderer {
    fn draw_cell(&mut self, surface: Surface, row: usize, col: usize, color: Color);
    fn draw_text(&mut self, text: &str, slot: TextSlot);
    fn present_frame(&mut self) -> io::Result<()>;
}

/// Reports one full frame of `session` to `renderer` and presents it.
///
/// The falling piece and the preview are only shown while playing.
pub fn render_session<R: Renderer>(session: &GameSession, renderer: &mut R) -> io::Result<()> {
    let board = &session.board;
    for (row, cells) in board.iter_rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Cell::Filled(color) = *cell {
                renderer.draw_cell(Surface::Board, row, col, color);
            }
        }
    }

    if !session.is_game_over() {
        if let Some(piece) = session.controller.current() {
            for (row, col) in piece.cells() {
                // A rotation can leave part of the piece outside the grid
                if board.get(row, col).is_some() {
                    renderer.draw_cell(Surface::Board, row as usize, col as usize, piece.color);
                }
            }
        }

        if let Some(next) = session.controller.next() {
            for (row, col) in next.shape.cells() {
                renderer.draw_cell(Surface::Preview, row, col, next.color);
            }
        }
    }

    renderer.draw_text(&format!("Score: {}", session.score()), TextSlot::Score);
    renderer.draw_text(&format!("Lines: {}", session.lines_cleared()), TextSlot::Lines);
    if session.is_game_over() {
        renderer.draw_text(GAME_OVER_TEXT, TextSlot::Overlay);
    }

    renderer.present_frame()
}

/// Everything reported for the frame being built.
#[derive(Debug, Default)]
struct Scene {
    board: Vec<Vec<Option<Color>>>,
    preview: [[Option<Color>; PREVIEW_SIZE]; PREVIEW_SIZE],
    score: String,
    lines: String,
    overlay: Option<String>,
}

impl Scene {
    fn new(rows: usize, columns: usize) -> Self {
        Self {
            board: vec![vec![None; columns]; rows],
            ..Self::default()
        }
    }

    fn clear(&mut self) {
        for row in &mut self.board {
            row.fill(None);
        }
        self.preview = Default::default();
        self.score.clear();
        self.lines.clear();
        self.overlay = None;
    }

    fn rows(&self) -> usize {
        self.board.len()
    }

    fn columns(&self) -> usize {
        self.board.first().map_or(0, Vec::len)
    }
}

/// Draws with ratatui onto any backend.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    scene: Scene,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, rows: usize, columns: usize) -> Self {
        Self {
            terminal,
            scene: Scene::new(rows, columns),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn draw_cell(&mut self, surface: Surface, row: usize, col: usize, color: Color) {
        let slot = match surface {
            Surface::Board => self.scene.board.get_mut(row).and_then(|r| r.get_mut(col)),
            Surface::Preview => self.scene.preview.get_mut(row).and_then(|r| r.get_mut(col)),
        };
        if let Some(slot) = slot {
            *slot = Some(color);
        }
    }

    fn draw_text(&mut self, text: &str, slot: TextSlot) {
        match slot {
            TextSlot::Score => self.scene.score = text.to_string(),
            TextSlot::Lines => self.scene.lines = text.to_string(),
            TextSlot::Overlay => self.scene.overlay = Some(text.to_string()),
        }
    }

    fn present_frame(&mut self) -> io::Result<()> {
        let scene = &self.scene;
        self.terminal.draw(|f| draw_scene(f, scene))?;
        self.scene.clear();
        Ok(())
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn draw_scene(f: &mut Frame, scene: &Scene) {
    let size = f.size();

    // Two characters per cell plus the border
    let board_height = to_u16(scene.rows() + 2);
    let board_width = to_u16(scene.columns() * 2 + 2);

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(board_height),
            Constraint::Min(1),
        ])
        .split(size);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(board_width),
            Constraint::Length(18),
            Constraint::Min(1),
        ])
        .split(vertical_chunks[1]);

    let board_area = horizontal_chunks[1];
    let info_area = horizontal_chunks[2];

    render_board(f, scene, board_area);
    render_info(f, scene, info_area);

    if let Some(text) = &scene.overlay {
        render_overlay(f, text, board_area);
    }
}

fn cell_span(color: Option<Color>, row: usize, col: usize) -> Span<'static> {
    match color {
        Some(color) => Span::styled("██", Style::default().fg(color)),
        // Checkerboard for empty cells
        None if (row + col) % 2 == 0 => Span::styled("░░", Style::default().fg(Color::DarkGray)),
        None => Span::raw("  "),
    }
}

fn render_board(f: &mut Frame, scene: &Scene, area: Rect) {
    let board_lines: Vec<Line> = scene
        .board
        .iter()
        .enumerate()
        .map(|(y, row)| {
            Line::from(
                row.iter()
                    .enumerate()
                    .map(|(x, &color)| cell_span(color, y, x))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let board_widget = Paragraph::new(board_lines)
        .block(Block::default().borders(Borders::ALL).title("blockfall"));

    f.render_widget(board_widget, area);
}

fn render_info(f: &mut Frame, scene: &Scene, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(to_u16(PREVIEW_SIZE + 2)),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .split(area);

    render_preview(f, scene, chunks[0]);
    render_stats(f, scene, chunks[1]);
    render_controls(f, chunks[2]);
}

fn render_preview(f: &mut Frame, scene: &Scene, area: Rect) {
    let next_lines: Vec<Line> = scene
        .preview
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|color| match color {
                        Some(color) => Span::styled("██", Style::default().fg(*color)),
                        None => Span::raw("  "),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let next_widget = Paragraph::new(next_lines)
        .block(Block::default().borders(Borders::ALL).title("Next"))
        .alignment(Alignment::Center);

    f.render_widget(next_widget, area);
}

fn render_stats(f: &mut Frame, scene: &Scene, area: Rect) {
    let stats_text = vec![
        Line::from(Span::styled(scene.score.as_str(), Style::default().fg(Color::Cyan))),
        Line::from(Span::raw(scene.lines.as_str())),
    ];

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(stats_widget, area);
}

fn render_controls(f: &mut Frame, area: Rect) {
    let controls = vec![
        Line::from("←/→  move"),
        Line::from("↑    rotate"),
        Line::from("↓    drop"),
        Line::from("R    restart"),
        Line::from("Q    quit"),
    ];

    let controls_widget = Paragraph::new(controls)
        .block(Block::default().borders(Borders::ALL).title("Keys"));

    f.render_widget(controls_widget, area);
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

fn render_overlay(f: &mut Frame, text: &str, area: Rect) {
    let popup_area = centered_rect(100, 30, area);
    f.render_widget(Clear, popup_area);

    let overlay = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(overlay, popup_area);
}
