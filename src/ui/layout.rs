use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub title_bar: Rect,
    pub forms: Vec<Rect>,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect, form_count: usize) -> AppLayout {
    // Main vertical split: title | forms | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(12),   // Forms
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let count = form_count.max(1) as u32;
    let form_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(main_chunks[1]);

    AppLayout {
        title_bar: main_chunks[0],
        forms: form_chunks.to_vec(),
        status_bar: main_chunks[2],
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
