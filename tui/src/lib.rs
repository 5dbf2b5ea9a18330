//! TUI rendering for Lumen using ratatui.
//!
//! Layout:
//!
//! ```text
//! ┌ Landmark Detection ┐┌ Map of Last Location ──────────────┐
//! │ category list      ││   world-map canvas with host pin   │
//! │                    │└────────────────────────────────────┘
//! │ result line        │ Events │ Alerts
//! └────────────────────┘┌ table ─────────────────────────────┐
//!                       └────────────────────────────────────┘
//! ```
//!
//! Rendering is pure: `draw` reads [`App`] and paints; all mutation happens
//! through [`handle_key`].

mod input;
mod theme;

pub use input::{Action, handle_key};
pub use theme::{Palette, palette};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};
use unicode_width::UnicodeWidthStr;

use lumen_engine::{App, Resolution, Tab};
use lumen_types::{Coordinate, EventTable};

const SIDEBAR_WIDTH: u16 = 30;
const RESULT_HEIGHT: u16 = 6;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = palette();

    let bg = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg, frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(frame.area());

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(RESULT_HEIGHT)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    draw_category_list(frame, app, sidebar[0], &palette);
    draw_result(frame, app, sidebar[1], &palette);
    draw_map(frame, app.location(), right[0], &palette);
    draw_tables(frame, app, right[1], &palette);
    draw_hints(frame, right[2], &palette);
}

fn draw_category_list(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .title(Span::styled(" Landmark Detection ", palette.panel_title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border());

    let items: Vec<ListItem> = app
        .kinds()
        .iter()
        .map(|kind| {
            ListItem::new(Line::from(Span::styled(
                format!("  {}", kind.display_name()),
                Style::default().fg(palette.text_primary),
            )))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selection())
        .highlight_symbol("▸ ");

    let mut state = ListState::default().with_selected(Some(app.selected_index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_result(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border());

    let (text, style) = result_line(app.resolution(), palette);
    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// The sidebar result line for each resolution state. A provider failure
/// keeps its own styling and wording; it never reads like "nothing nearby".
fn result_line(resolution: &Resolution, palette: &Palette) -> (String, Style) {
    match resolution {
        Resolution::Idle => (
            "Select a category and press Enter.".to_string(),
            Style::default().fg(palette.text_muted),
        ),
        Resolution::Resolved {
            kind,
            landmark: Some(landmark),
        } => (
            format!("The closest {} is: {}", kind.display_name(), landmark.name),
            palette.info_line(),
        ),
        Resolution::Resolved {
            landmark: None, ..
        } => ("No landmark found.".to_string(), palette.warning_line()),
        Resolution::Failed { message, .. } => (message.clone(), palette.error_line()),
    }
}

fn draw_map(frame: &mut Frame, location: Coordinate, area: Rect, palette: &Palette) {
    let title = format!(
        " Map of Last Location ({:.4}, {:.4}) ",
        location.latitude(),
        location.longitude()
    );
    let block = Block::default()
        .title(Span::styled(title, palette.panel_title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border());

    let (x_bounds, y_bounds) = map_bounds(location);
    let lat = location.latitude();
    let lon = location.longitude();
    let land = palette.map_land;
    let pin = palette.map_pin;

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: land,
            });
            ctx.draw(&Points {
                coords: &[(lon, lat)],
                color: pin,
            });
            ctx.print(lon, lat, Span::styled("⊙", Style::default().fg(pin)));
        });
    frame.render_widget(canvas, area);
}

/// A regional window around the pin, clamped to the world.
fn map_bounds(location: Coordinate) -> ([f64; 2], [f64; 2]) {
    const LON_SPAN: f64 = 40.0;
    const LAT_SPAN: f64 = 20.0;

    let x_min = (location.longitude() - LON_SPAN / 2.0).clamp(-180.0, 180.0 - LON_SPAN);
    let y_min = (location.latitude() - LAT_SPAN / 2.0).clamp(-90.0, 90.0 - LAT_SPAN);
    ([x_min, x_min + LON_SPAN], [y_min, y_min + LAT_SPAN])
}

fn draw_tables(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let tab = app.active_tab();
    let titles = [Tab::Events.title(), Tab::Alerts.title()];
    let tabs = Tabs::new(titles.iter().map(|t| Line::from(*t)))
        .select(match tab {
            Tab::Events => 0,
            Tab::Alerts => 1,
        })
        .style(Style::default().fg(palette.text_muted))
        .highlight_style(palette.panel_title());
    frame.render_widget(tabs, rows[0]);

    let view = match tab {
        Tab::Events => app.events(),
        Tab::Alerts => app.alerts(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border());

    match view {
        Ok(table) => draw_event_table(frame, table, block, rows[1], palette),
        Err(error) => {
            // A broken store must read as broken, not as an empty table.
            let line = Line::from(Span::styled(
                format!("Events unavailable: {error}"),
                palette.error_line(),
            ));
            let paragraph = Paragraph::new(line).block(block).wrap(Wrap { trim: true });
            frame.render_widget(paragraph, rows[1]);
        }
    }
}

fn draw_event_table(
    frame: &mut Frame,
    table: &EventTable,
    block: Block<'_>,
    area: Rect,
    palette: &Palette,
) {
    if table.columns.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let column_count = table.columns.len();
    let cell_width = usize::from((area.width.saturating_sub(2)) / column_count as u16).max(1);

    let header = Row::new(
        table
            .columns
            .iter()
            .map(|name| truncate_cell(name, cell_width)),
    )
    .style(palette.panel_title());

    let rows = table.rows.iter().map(|row| {
        Row::new(
            row.cells
                .iter()
                .map(|cell| truncate_cell(cell, cell_width)),
        )
        .style(Style::default().fg(palette.text_primary))
    });

    let widths = vec![Constraint::Ratio(1, column_count as u32); column_count];
    let widget = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(widget, area);
}

fn draw_hints(frame: &mut Frame, area: Rect, palette: &Palette) {
    let hints = Line::from(Span::styled(
        " ↑/↓ select · Enter resolve · Tab events/alerts · q quit",
        Style::default().fg(palette.text_muted),
    ));
    frame.render_widget(Paragraph::new(hints), area);
}

/// Clip a cell to the column width, ellipsizing by display width.
fn truncate_cell(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.to_string().width();
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
