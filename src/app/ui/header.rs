use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};

use crate::models::User;
use crate::state::ShellState;

const PRODUCT: &str = "ResQ AI";
const SUBTITLE: &str = "Emergency Care Assistant";

/// Product name and the signed-in user on the first row, feature tabs on
/// the second.
pub fn render(f: &mut Frame, area: Rect, shell: &ShellState, user: &User) {
    let [top, tabs] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let [brand, identity] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);

    f.render_widget(
        Line::from(vec![
            Span::styled(
                PRODUCT,
                Style::default()
                    .fg(Color::Rgb(255, 140, 105))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(SUBTITLE, Style::default().fg(Color::Gray)),
        ]),
        brand,
    );

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(user.display_name().to_string()).bold(),
            Span::raw(" <"),
            Span::raw(user.email().to_string()).gray(),
            Span::raw("> "),
            Span::raw(format!("[{}]", user.role())).light_cyan(),
        ]))
        .alignment(Alignment::Right),
        identity,
    );

    let titles = shell
        .tabs()
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.label())))
        .collect::<Vec<_>>();
    f.render_widget(
        Tabs::new(titles)
            .select(shell.active_index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│"),
        tabs,
    );
}
