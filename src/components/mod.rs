pub mod app;
pub mod controls_panel;
pub mod game_over_overlay;
pub mod game_view;
pub mod intro_overlay;
pub mod legend;
pub mod legend_panel;
pub mod level_select;
pub mod notice_banner;
pub mod settings_modal;
pub mod stats_panel;
