use std::fs::File;
use std::io::{self, Stdout, Write};
use std::rc::Rc;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode};
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use simplelog::{Config, LevelFilter, WriteLogger};
use trellis::{
    color, Alignment, Batch, ButtonStyle, Change, Color, DebugLines, Drawable, Edges, LabelStyle,
    PointerEvent, Rect, SolidDrawable, Stage,
};

/// Draws into the terminal, one cell per unit.
struct TerminalBatch {
    out: Stdout,
    color: Color,
    clips: Vec<Rect>,
}

impl TerminalBatch {
    fn new() -> Self {
        Self {
            out: io::stdout(),
            color: color::white(),
            clips: Vec::new(),
        }
    }

    fn visible(&self, rect: Rect) -> Option<Rect> {
        match self.clips.last() {
            Some(clip) => clip.intersect(&rect),
            None => Some(rect),
        }
        .filter(|rect| !rect.is_empty())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

fn terminal_color(color: Color) -> style::Color {
    let rgb: palette::Srgb<u8> = color.color.into_format();
    style::Color::Rgb {
        r: rgb.red,
        g: rgb.green,
        b: rgb.blue,
    }
}

impl Batch for TerminalBatch {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn fill_rect(&mut self, rect: Rect) {
        let Some(rect) = self.visible(rect) else {
            return;
        };
        let width = rect.width.round() as usize;
        for row in rect.y.round() as u16..(rect.y + rect.height).round() as u16 {
            let _ = queue!(
                self.out,
                cursor::MoveTo(rect.x.round() as u16, row),
                SetBackgroundColor(terminal_color(self.color)),
                Print(" ".repeat(width)),
                ResetColor
            );
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        if self.visible(Rect::new(x, y, 1.0, 1.0)).is_none() {
            return;
        }
        let _ = queue!(
            self.out,
            cursor::MoveTo(x.round() as u16, y.round() as u16),
            SetForegroundColor(terminal_color(self.color)),
            Print(text),
            ResetColor
        );
    }

    fn debug_rect(&mut self, rect: Rect, color: Color) {
        let corners = [
            (rect.x, rect.y),
            (rect.x + rect.width - 1.0, rect.y),
            (rect.x, rect.y + rect.height - 1.0),
            (rect.x + rect.width - 1.0, rect.y + rect.height - 1.0),
        ];
        for (x, y) in corners {
            let _ = queue!(
                self.out,
                cursor::MoveTo(x.max(0.0) as u16, y.max(0.0) as u16),
                SetForegroundColor(terminal_color(color)),
                Print("+"),
                ResetColor
            );
        }
    }

    fn push_clip(&mut self, rect: Rect) -> bool {
        match self.visible(rect) {
            Some(rect) => {
                self.clips.push(rect);
                true
            }
            None => false,
        }
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }
}

fn solid(r: f32, g: f32, b: f32) -> Rc<dyn Drawable> {
    Rc::new(
        SolidDrawable::new(color::rgba(r, g, b, 1.0))
            .with_min_size(12.0, 3.0)
            .with_insets(Edges::new(1.0, 2.0, 1.0, 2.0)),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("buttons.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut stage = Stage::new();
    let root = stage.new_table();
    stage.align(root, Alignment::CENTER)?;
    stage.add_root(root)?;

    let title = stage.new_label("Pick at most one. q quits, d toggles debug lines.", LabelStyle::default());
    stage.add(root, Some(title))?.colspan(3).pad_bottom(1.0);
    stage.row(root)?;

    let style = ButtonStyle::new()
        .up(solid(0.25, 0.25, 0.3))
        .down(solid(0.45, 0.45, 0.5))
        .checked(solid(0.2, 0.55, 0.3))
        .pressed_offset(1.0, 0.0);
    let group = stage.new_group_with(0, 1);
    for name in ["Red", "Green", "Blue"] {
        let caption = stage.new_label(name, LabelStyle::default());
        let button = stage.new_button_with(caption, style.clone())?;
        stage.group_add(group, button)?;
        stage.on_change(button, move |change| {
            log::info!("{} is now {}", name, if change.checked { "on" } else { "off" });
            Change::Keep
        })?;
        stage.add(root, Some(button))?.pad(Edges::horizontal(1.0));
    }

    let (columns, rows) = terminal::size()?;
    stage.set_size(root, f32::from(columns), f32::from(rows))?;

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let mut batch = TerminalBatch::new();
    let mut debug = false;
    let result = (|| -> Result<(), Box<dyn std::error::Error>> {
        loop {
            queue!(batch.out, Clear(ClearType::All))?;
            stage.draw(&mut batch);
            batch.flush()?;

            match event::read()? {
                Event::Key(key) if key.code == KeyCode::Char('q') => return Ok(()),
                Event::Key(key) if key.code == KeyCode::Char('d') => {
                    debug = !debug;
                    let lines = if debug { DebugLines::ALL } else { DebugLines::NONE };
                    stage.debug(root, lines)?;
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = PointerEvent::from_mouse(mouse) {
                        if let Some(outcome) = stage.handle(pointer) {
                            log::debug!("click: {:?}", outcome);
                        }
                    }
                }
                Event::Resize(columns, rows) => {
                    stage.set_size(root, f32::from(columns), f32::from(rows))?;
                }
                _ => {}
            }
        }
    })();

    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;
    result
}
