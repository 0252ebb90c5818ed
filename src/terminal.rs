// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based capture control
//!
//! Draws the control with braille canvas shapes and drives it with the
//! mouse: click the shutter for a photo, hold it to record, drag upwards
//! while holding to change focus. A simulated camera consumer reacts to the
//! emitted intents.

use crate::config::ControlConfig;
use crate::constants::ui;
use crate::control::{
    Button, CaptureControl, ControlEvent, ControlState, EventLog, Point, PressRecognizer,
    SystemClock,
};
use crate::errors::{AppError, AppResult};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout as TuiLayout, Rect as TuiRect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        Block, Paragraph,
        canvas::{Canvas, Circle, Context, Points, Rectangle},
    },
};
use std::collections::VecDeque;
use std::io::{self, stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Lines kept in the event panel
const HISTORY_LEN: usize = 6;

/// Run the terminal capture control
pub fn run(config: &ControlConfig) -> AppResult<()> {
    config.validate()?;

    // Set up terminal
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(terminal_error)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

    // Run the app
    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode().map_err(terminal_error)?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;

    if let Err(e) = &result {
        error!("Terminal control failed: {}", e);
    }
    result
}

fn terminal_error(err: io::Error) -> AppError {
    AppError::Terminal(err.to_string())
}

/// Stand-in for the screen that owns the camera session
///
/// Holds the only strong reference to the event log the control reports
/// into, and reacts once the control has finished handling each input.
struct Consumer {
    log: Rc<EventLog>,
    history: VecDeque<String>,
    front_camera: bool,
    focus: f64,
    quit: bool,
    /// Confirmed captures ask for a fresh control
    restart: bool,
}

impl Consumer {
    fn new() -> Self {
        Self {
            log: Rc::new(EventLog::new()),
            history: VecDeque::with_capacity(HISTORY_LEN),
            front_camera: false,
            focus: 0.0,
            quit: false,
            restart: false,
        }
    }

    fn push_history(&mut self, line: String) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(line);
    }

    /// Handle everything the control emitted since the last call
    fn react(&mut self, control: &mut CaptureControl<SystemClock>) {
        for event in self.log.drain() {
            info!(?event, "Capture intent");
            let line = match event {
                ControlEvent::TakePhoto => {
                    // A real consumer waits for the still image first
                    control.show_complete_animation();
                    "Photo taken".to_string()
                }
                ControlEvent::BeginRecording => "Recording...".to_string(),
                ControlEvent::EndRecording => {
                    control.show_complete_animation();
                    format!(
                        "Video finished ({:.2}s)",
                        control.record_time().as_secs_f64()
                    )
                }
                ControlEvent::FocusChanged { focus } => {
                    self.focus = focus;
                    // Drags fire constantly; keep the panel readable
                    if let Some(last) = self.history.back()
                        && last.starts_with("Focus")
                    {
                        self.history.pop_back();
                    }
                    format!("Focus {:.1}", focus)
                }
                ControlEvent::ChangeCamera => {
                    self.front_camera = !self.front_camera;
                    format!("Switched to {} camera", self.camera_name())
                }
                ControlEvent::ClickBack => "Capture discarded".to_string(),
                ControlEvent::Exit => {
                    self.quit = true;
                    "Exit".to_string()
                }
                ControlEvent::Complete => {
                    self.restart = true;
                    "Capture saved".to_string()
                }
            };
            self.push_history(line);
        }
    }

    fn camera_name(&self) -> &'static str {
        if self.front_camera { "front" } else { "back" }
    }
}

fn new_control(config: &ControlConfig, consumer: &Consumer) -> CaptureControl<SystemClock> {
    let mut control = CaptureControl::new(config.frame(), config, SystemClock);
    control.set_listener(&consumer.log);
    control
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ControlConfig,
) -> AppResult<()> {
    let mut consumer = Consumer::new();
    let mut control = new_control(config, &consumer);
    let mut recognizer = PressRecognizer::new(config.long_press_duration());
    let mut control_area = TuiRect::default();

    info!("Terminal control started");

    loop {
        let now = Instant::now();
        if let Some(gesture) = recognizer.poll(control.layout(), now) {
            control.handle_gesture(gesture);
        }
        control.poll_timers();
        consumer.react(&mut control);

        if consumer.quit {
            break;
        }
        if consumer.restart {
            consumer.restart = false;
            recognizer = PressRecognizer::new(config.long_press_duration());
            control = new_control(config, &consumer);
        }

        terminal
            .draw(|f| control_area = draw(f, &control, &consumer))
            .map_err(terminal_error)?;

        // Short poll timeout keeps the ring and animations moving
        if !event::poll(Duration::from_millis(10)).map_err(terminal_error)? {
            continue;
        }

        match event::read().map_err(terminal_error)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Ctrl+C and 'q' quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('s') => control.click(Button::SwitchCamera),
                    KeyCode::Char('r') => control.click(Button::Retake),
                    KeyCode::Enter => control.click(Button::Confirm),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                handle_mouse(mouse, control_area, &mut control, &mut recognizer);
            }
            Event::Resize(_, _) => {
                if let Some(gesture) = recognizer.cancel() {
                    control.handle_gesture(gesture);
                }
            }
            _ => {}
        }
    }

    info!("Terminal control stopped");
    Ok(())
}

fn handle_mouse(
    mouse: MouseEvent,
    area: TuiRect,
    control: &mut CaptureControl<SystemClock>,
    recognizer: &mut PressRecognizer,
) {
    let bounds = control.layout().bounds;
    let dragging = matches!(mouse.kind, MouseEventKind::Drag(MouseButton::Left));
    let point = if dragging && recognizer.is_holding() {
        // Focus keeps ramping while the drag leaves the control
        project_cell(area, bounds.width(), bounds.height(), mouse.column, mouse.row)
    } else {
        cell_to_point(area, bounds.width(), bounds.height(), mouse.column, mouse.row)
    };
    let Some(point) = point else {
        // Releasing outside the control abandons the press
        if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
            && let Some(gesture) = recognizer.cancel()
        {
            control.handle_gesture(gesture);
        }
        return;
    };
    let now = Instant::now();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(button) = control.hit_test(point) {
                control.click(button);
            } else if control.visibility().shutter {
                recognizer.press(control.layout(), point, now);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let scale = control.transforms().shutter_scale.value_at(now);
            if let Some(gesture) = recognizer.drag(control.layout(), point, scale, now) {
                control.handle_gesture(gesture);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            for gesture in recognizer.release(control.layout(), point, now) {
                control.handle_gesture(gesture);
            }
        }
        _ => {}
    }
}

/// Map a terminal cell to the widget point at its center
fn cell_to_point(area: TuiRect, width: f64, height: f64, column: u16, row: u16) -> Option<Point> {
    if column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    project_cell(area, width, height, column, row)
}

/// Like [`cell_to_point`], but cells outside `area` extrapolate past its edges
fn project_cell(area: TuiRect, width: f64, height: f64, column: u16, row: u16) -> Option<Point> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let x = (f64::from(column) - f64::from(area.x) + 0.5) * width / f64::from(area.width);
    let y = (f64::from(row) - f64::from(area.y) + 0.5) * height / f64::from(area.height);
    Some(Point::new(x, y))
}

/// Largest rect inside `area` that shows the widget without distortion
fn fit_area(area: TuiRect, width: f64, height: f64) -> TuiRect {
    let aspect = width / height * CELL_ASPECT;
    let mut cols = f64::from(area.width);
    let mut rows = cols / aspect;
    if rows > f64::from(area.height) {
        rows = f64::from(area.height);
        cols = rows * aspect;
    }
    let cols = cols.floor() as u16;
    let rows = rows.floor() as u16;
    TuiRect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

/// Draw the whole screen; returns the area the control occupies
fn draw(f: &mut Frame, control: &CaptureControl<SystemClock>, consumer: &Consumer) -> TuiRect {
    let [title_area, control_slot, history_area, status_area] = TuiLayout::vertical([
        Constraint::Length(1),
        Constraint::Min(6),
        Constraint::Length(HISTORY_LEN as u16 + 2),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let title = format!(
        " {} camera | focus {:.1} | {:?}",
        consumer.camera_name(),
        consumer.focus,
        control.state()
    );
    f.render_widget(Paragraph::new(title), title_area);

    let bounds = control.layout().bounds;
    let control_area = fit_area(control_slot, bounds.width(), bounds.height());
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, bounds.width()])
        .y_bounds([0.0, bounds.height()])
        .paint(|ctx| paint_control(ctx, control));
    f.render_widget(canvas, control_area);

    let lines: Vec<Line> = consumer
        .history
        .iter()
        .map(|entry| Line::from(entry.as_str()))
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Events ")),
        history_area,
    );

    let status = match control.state() {
        ControlState::Idle => "click: photo | hold: video | 's' switch | 'q' quit",
        ControlState::Recording => "drag up: focus | release: stop",
        ControlState::Captured => "'r' retake | Enter confirm | 'q' quit",
    };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        status_area,
    );

    control_area
}

fn paint_control(ctx: &mut Context, control: &CaptureControl<SystemClock>) {
    let layout = control.layout();
    let height = layout.bounds.height();
    let now = Instant::now();
    // Canvas y grows upwards
    let flip = |y: f64| height - y;

    let visibility = control.visibility();
    if visibility.shutter {
        let center = layout.shutter.center();
        let shutter_scale = control.transforms().shutter_scale.value_at(now);
        let dot_scale = control.transforms().center_dot_scale.value_at(now);

        fill_circle(
            ctx,
            Point::new(center.x, flip(center.y)),
            layout.shutter.width() * 0.5 * shutter_scale,
            Color::Gray,
        );
        ctx.layer();
        fill_circle(
            ctx,
            Point::new(center.x, flip(center.y)),
            layout.center_dot.width() * 0.5 * dot_scale * shutter_scale,
            Color::White,
        );
        ctx.layer();

        let mut ring = layout.ring;
        ring.radius *= shutter_scale;
        let arc: Vec<(f64, f64)> = ring
            .arc(control.ring_fraction(), 96)
            .into_iter()
            .map(|p| (p.x, flip(p.y)))
            .collect();
        let (r, g, b) = ui::RING_COLOR;
        ctx.draw(&Points {
            coords: &arc,
            color: Color::Rgb(r, g, b),
        });
    }

    let mut buttons = Vec::new();
    if visibility.switch_camera {
        buttons.push((layout.switch_camera, "switch"));
    }
    if visibility.exit {
        buttons.push((layout.exit, "exit"));
    }
    if visibility.retake {
        buttons.push((control.retake_frame(), "retake"));
    }
    if visibility.confirm {
        buttons.push((control.confirm_frame(), "done"));
    }

    for (frame, label) in buttons {
        ctx.draw(&Rectangle {
            x: frame.x(),
            y: flip(frame.max_y()),
            width: frame.width(),
            height: frame.height(),
            color: Color::White,
        });
        let center = frame.center();
        ctx.print(
            center.x - label.len() as f64 * 2.5,
            flip(center.y),
            label,
        );
    }
}

/// Canvas circles are outlines; stack them to fill a disc
fn fill_circle(ctx: &mut Context, center: Point, radius: f64, color: Color) {
    let mut r = radius;
    while r > 0.0 {
        ctx.draw(&Circle {
            x: center.x,
            y: center.y,
            radius: r,
            color,
        });
        r -= 2.0;
    }
}
