pub mod bubble;
pub mod bubble_list;
pub mod details;
pub mod header;
pub mod help;
pub mod loading;
pub mod notice;
pub mod question;
pub mod scroll;
pub mod sidebar;
pub mod syntaxes;
pub mod textarea;
pub mod utils;

pub use bubble::Bubble;
pub use bubble_list::BubbleList;
pub use help::HelpScreen;
pub use loading::Loading;
pub use notice::Notice;
pub use question::Question;
pub use scroll::Scroll;
pub use textarea::TextArea;

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::Block,
};

pub trait Dim {
    fn dim_bg(&mut self);
}

impl Dim for ratatui::Frame<'_> {
    fn dim_bg(&mut self) {
        self.render_widget(
            Block::default().style(
                Style::default()
                    .bg(Color::Rgb(0, 0, 0))
                    .add_modifier(Modifier::DIM),
            ),
            self.area(),
        );
    }
}
