use ratatui::style::{Color, Modifier, Style};

/// Entry names wider than the last usable column are cut to `width - 4`
/// characters plus an ellipsis.
pub(crate) fn display_name(name: &str, width: u16) -> String {
    let width = usize::from(width);
    if name.chars().count() <= width.saturating_sub(1) {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(width.saturating_sub(4)).collect();
    cut.push_str("...");
    cut
}

/// Style matrix for a browser entry: selection gets its own colors, the
/// cursor reverses an unselected row and switches palette on a selected one.
pub(crate) fn item_style(selected: bool, cursor: bool) -> Style {
    match (selected, cursor) {
        (true, true) => Style::default().fg(Color::White).bg(Color::Red),
        (true, false) => Style::default().fg(Color::Yellow).bg(Color::Blue),
        (false, true) => Style::default().add_modifier(Modifier::REVERSED),
        (false, false) => Style::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_pass_through() {
        assert_eq!(display_name("a.txt", 20), "a.txt");
    }

    #[test]
    fn names_at_the_width_limit_are_cut_with_an_ellipsis() {
        // 10 columns: anything over 9 chars becomes 6 chars + "...".
        assert_eq!(display_name("123456789", 10), "123456789");
        assert_eq!(display_name("1234567890", 10), "123456...");
    }

    #[test]
    fn tiny_widths_do_not_panic() {
        assert_eq!(display_name("abcdef", 2), "...");
    }

    #[test]
    fn cursor_reverses_unselected_rows() {
        let style = item_style(false, true);
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn selected_rows_have_their_own_palettes() {
        assert_eq!(item_style(true, false).bg, Some(Color::Blue));
        assert_eq!(item_style(true, true).bg, Some(Color::Red));
        assert_eq!(item_style(false, false), Style::default());
    }
}
