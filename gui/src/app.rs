//! Main window

use crate::chart;
use crate::theme::Theme;
use coinchart_core::{CoinSummary, Timespan};
use coinchart_engine::{RequestKind, Session};
use egui::{Color32, RichText};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const CHART_HEIGHT: f32 = 320.0;

/// Things the user did this frame. Applied after all panels are drawn.
#[derive(Debug, Clone, PartialEq)]
enum UiAction {
    SelectCoin(String),
    SelectTimespan(Timespan),
    Refresh,
    DismissDialog,
    ToggleTheme,
}

pub struct CoinchartApp {
    session: Session,
    theme: Theme,
}

impl CoinchartApp {
    /// Hook the session up to the window and start the first fetches
    pub fn new(ctx: &egui::Context, mut session: Session, theme: Theme) -> Self {
        let repaint = ctx.clone();
        session.set_waker(Arc::new(move || repaint.request_repaint()));
        ctx.set_visuals(theme.visuals());

        session.refresh_all();
        info!("Window ready, initial fetches dispatched");

        Self { session, theme }
    }

    fn handle(&mut self, ctx: &egui::Context, action: UiAction) {
        debug!("UI action: {:?}", action);
        match action {
            UiAction::SelectCoin(id) => self.session.select_currency(&id),
            UiAction::SelectTimespan(timespan) => {
                self.session.select_timespan(timespan);
            }
            UiAction::Refresh => self.session.refresh_all(),
            UiAction::DismissDialog => self.session.dismiss_dialog(),
            UiAction::ToggleTheme => {
                self.theme.toggle();
                ctx.set_visuals(self.theme.visuals());
            }
        }
    }

    fn ui_top_bar(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.heading("Coinchart");
            ui.separator();

            if ui.button("⟳ Refresh").clicked() {
                actions.push(UiAction::Refresh);
            }
            if ui.button(self.theme.toggle_label()).clicked() {
                actions.push(UiAction::ToggleTheme);
            }

            if self.session.in_flight() > 0 {
                ui.spinner();
            }
        });
    }

    fn ui_coin_list(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let theme = self.theme;

        if let Some(global) = &self.session.view().global {
            ui.label(global.volume_label());
            ui.label(global.market_cap_label());
        } else if self.session.is_loading(RequestKind::Global) {
            ui.label("Loading market totals...");
        }
        ui.separator();

        ui.add(egui::TextEdit::singleline(self.session.search_mut()).hint_text("Search coins"));
        ui.add_space(4.0);

        let view = self.session.view();
        if view.coins.is_empty() && self.session.is_loading(RequestKind::Markets) {
            ui.spinner();
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for coin in view.filtered_coins() {
                    if coin_row(ui, coin, coin.id == view.selected, theme) {
                        actions.push(UiAction::SelectCoin(coin.id.clone()));
                    }
                }
            });
    }

    fn ui_coin_detail(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let view = self.session.view();
        let name = view.selected_name();

        ui.horizontal(|ui| {
            ui.heading(&name);
            if self.session.is_loading(RequestKind::Price) {
                ui.spinner();
            }
        });
        ui.label(RichText::new(&view.price_text).size(28.0).strong());
        ui.label(
            RichText::new(&view.badge.text)
                .size(16.0)
                .color(self.theme.sentiment_color(view.badge.sentiment)),
        );

        ui.horizontal(|ui| {
            ui.label(&view.high_label);
            ui.separator();
            ui.label(&view.low_label);
            ui.separator();
            ui.label(&view.volume_label);
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            for timespan in Timespan::ALL {
                if ui
                    .selectable_label(view.timespan == timespan, timespan.label())
                    .clicked()
                {
                    actions.push(UiAction::SelectTimespan(timespan));
                }
            }
            if let Some(pending) = view.pending_timespan {
                ui.label(RichText::new(format!("loading {}", pending)).color(Color32::GRAY));
            }
            if self.session.is_loading(RequestKind::Series) {
                ui.spinner();
            }
        });

        match &view.series {
            Some(series) => {
                let color = self.theme.chart_color(view.badge.sentiment);
                chart::show(ui, series, &name, color, CHART_HEIGHT);
            }
            None => {
                ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No chart data").color(Color32::GRAY));
                    });
                });
            }
        }

        ui.separator();
        self.ui_coin_info(ui);
    }

    fn ui_coin_info(&self, ui: &mut egui::Ui) {
        let Some(info) = &self.session.view().coin_info else {
            if self.session.is_loading(RequestKind::CoinInfo) {
                ui.spinner();
            }
            return;
        };

        let links = info.social_links();
        if !links.is_empty() {
            ui.horizontal(|ui| {
                for (label, url) in links {
                    ui.hyperlink_to(label, url);
                }
            });
        }

        if !info.description.is_empty() {
            egui::CollapsingHeader::new(format!("About {}", info.name))
                .default_open(true)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .max_height(160.0)
                        .show(ui, |ui| ui.label(&info.description));
                });
        }
    }

    fn ui_error_dialog(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let Some(dialog) = &self.session.view().dialog else {
            return;
        };

        egui::Window::new(&dialog.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&dialog.message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    actions.push(UiAction::DismissDialog);
                }
            });
    }
}

/// One line of the coin list. Returns true when clicked.
fn coin_row(ui: &mut egui::Ui, coin: &CoinSummary, selected: bool, theme: Theme) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        let text = format!(
            "{} {} ({})",
            coin.rank_label(),
            coin.name,
            coin.symbol.to_uppercase()
        );
        clicked = ui.selectable_label(selected, text).clicked();

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(change) = coin.change_24h() {
                let sentiment = coinchart_core::Sentiment::for_change(change);
                ui.colored_label(theme.sentiment_color(sentiment), change.to_string());
            }
            ui.label(coin.price_label());
        });
    })
    .response
    .on_hover_text(format!("Market cap: {}", coin.market_cap_label()));
    clicked
}

impl eframe::App for CoinchartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let changed = self.session.pump();
        if changed > 0 {
            debug!("Applied {} completion(s)", changed);
        }

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.ui_top_bar(ui, &mut actions);
        });

        egui::SidePanel::left("coin_list")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                self.ui_coin_list(ui, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.ui_coin_detail(ui, &mut actions));
        });

        self.ui_error_dialog(ctx, &mut actions);

        for action in actions {
            self.handle(ctx, action);
        }

        // Waker covers completions; this only keeps spinners animating
        if self.session.in_flight() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Window closing, cancelling {} fetch(es)", self.session.in_flight());
        self.session.cancel_all();
    }
}
