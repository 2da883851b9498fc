use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub list_area: Rect,
    pub timer_area: Rect,
    pub stats_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: task list (60%) | timer above stats (40%)
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let horizontal_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Task list
            Constraint::Percentage(40), // Timer + stats
        ])
        .split(main_chunks[1]);

    let side_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Timer
            Constraint::Min(0),    // Stats + quote
        ])
        .split(horizontal_split[1]);

    MainLayout {
        list_area: horizontal_split[0],
        timer_area: side_split[0],
        stats_area: side_split[1],
        keybindings_area: main_chunks[0],
    }
}

/// Create centered modal area of the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// Three-row strip in the bottom-right corner for toasts
pub fn create_toast_area(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let height = 3.min(area.height);
    Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert!(layout.list_area.height > 0);
        assert!(layout.stats_area.height > 0);
        assert_eq!(layout.timer_area.height, 9);
        assert_eq!(layout.keybindings_area.height, 1);
        assert!(layout.list_area.width > layout.timer_area.width);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area, 12);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 12);
    }

    #[test]
    fn test_toast_area_fits_inside() {
        let area = Rect::new(0, 0, 30, 10);
        let toast = create_toast_area(area, 50);

        assert_eq!(toast.width, 30);
        assert_eq!(toast.height, 3);
        assert_eq!(toast.y + toast.height, area.height);
    }
}
