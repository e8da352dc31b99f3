//! Main application for the Xiangqi viewer

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::GameState;
use super::theme::*;
use crate::board::Side;
use crate::rules::Outcome;

/// Main Xiangqi application
pub struct XiangqiApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl Default for XiangqiApp {
    fn default() -> Self {
        Self {
            state: GameState::default(),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::First => "RED",
        Side::Second => "BLACK",
    }
}

fn side_accent(side: Side) -> egui::Color32 {
    match side {
        Side::First => FIRST_INK,
        Side::Second => egui::Color32::from_rgb(70, 70, 75),
    }
}

impl XiangqiApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.state.reset();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo (U)").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Flip Board (F)").clicked() {
                        self.board_view.toggle_flip();
                        ui.close_menu();
                    }
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let view = if self.board_view.is_flipped() { "black at bottom" } else { "red at bottom" };
                    ui.label(format!("Hotseat - {view}"));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(260.0)
            .max_width(300.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                let outcome = self.state.outcome();
                if outcome.is_terminal() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, outcome);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("XIANGQI").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("rules engine viewer").size(11.0).color(TEXT_MUTED));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let side = self.state.side_to_move();

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, PIECE_FACE);
                ui.painter().circle_stroke(rect.center(), 22.0, egui::Stroke::new(3.0, side_accent(side)));
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "K",
                    egui::FontId::proportional(24.0),
                    side_accent(side),
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(side_name(side)).size(18.0).strong().color(TEXT_PRIMARY));

                    let moves = self.state.legal_moves().len();
                    let status = if self.state.is_over() {
                        ("Game Over".to_string(), WIN_HIGHLIGHT)
                    } else {
                        (format!("{moves} legal moves"), TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let elapsed = self.state.move_timer.elapsed();
            ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));

            if let Some(last) = self.state.move_timer.last_move_duration {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last move: {:.1}s", last.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn_frame = Frame::new()
                    .fill(egui::Color32::from_rgb(50, 53, 58))
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                let button = |ui: &mut egui::Ui, text: &str| {
                    btn_frame
                        .show(ui, |ui| {
                            ui.add(
                                egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY))
                                    .sense(egui::Sense::click()),
                            )
                            .clicked()
                        })
                        .inner
                };

                if button(ui, "Undo") {
                    self.state.undo();
                }
                ui.add_space(4.0);
                if button(ui, "Flip") {
                    self.board_view.toggle_flip();
                }
                ui.add_space(4.0);
                if button(ui, "New") {
                    self.state.reset();
                }
            });

            ui.add_space(8.0);
            let last = self
                .state
                .last_move()
                .map_or_else(|| "-".to_string(), |mv| mv.to_string());
            ui.label(
                RichText::new(format!("Move #{}  last {last}", self.state.move_count()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Fingerprint, repetition count and the fixed-layout text board
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let fingerprint = self.state.fingerprint();
                let hex = fingerprint.to_hex();
                ui.label(RichText::new(&hex[..32]).monospace().size(10.0).color(TEXT_SECONDARY));
                ui.label(RichText::new(&hex[32..]).monospace().size(10.0).color(TEXT_SECONDARY));
                ui.label(RichText::new(fingerprint.to_base64()).monospace().size(10.0).color(TEXT_MUTED));

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!(
                        "seen {}x (draw at {})",
                        self.state.repetitions(),
                        self.state.config().repetition_limit
                    ))
                    .size(10.0)
                    .color(TEXT_SECONDARY),
                );

                ui.add_space(6.0);
                ui.label(
                    RichText::new(self.state.rendered().as_str())
                        .monospace()
                        .size(11.0)
                        .color(TEXT_PRIMARY),
                );
            });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, outcome: Outcome) {
        let (headline, detail, accent) = match outcome.winner() {
            Some(side) => {
                let detail = if self.state.board().general_pos(side.opponent()).is_none() {
                    "general captured"
                } else {
                    "no legal move"
                };
                (format!("{} WINS!", side_name(side)), detail, side_accent(side))
            }
            None => ("DRAW".to_string(), "by repetition", TEXT_PRIMARY),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(accent));
                    ui.add_space(4.0);
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            let label = egui::Label::new(RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY))
                                .sense(egui::Sense::click());
                            if ui.add(label).clicked() {
                                self.state.reset();
                            }
                        });
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TIMER_WARNING));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let targets = self.state.targets();
            let overlay = BoardOverlay {
                side_to_move: self.state.side_to_move(),
                selected: self.state.selected,
                targets: &targets,
                last_move: self.state.last_move(),
                game_over: self.state.is_over(),
            };

            if let Some(pos) = self.board_view.show(ui, self.state.board(), &overlay) {
                if let Err(msg) = self.state.click(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }
            if i.key_pressed(egui::Key::F) {
                self.board_view.toggle_flip();
            }
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for XiangqiApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Keep the move timer ticking
        if !self.state.is_over() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
